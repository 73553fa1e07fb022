//! Application layer services implementing business logic.
//!
//! Services consume the domain's repository and resolver traits and expose
//! a small API to whatever web layer embeds the crate.
//!
//! # Available Services
//!
//! - [`services::shortlink_service::ShortlinkService`] - Create and resolve facade
//! - [`services::slug_allocator::SlugAllocator`] - Collision-safe slug allocation
//! - [`services::url_normalizer::UrlNormalizer`] - Destination normalization
//! - [`services::address_classifier::AddressClassifier`] - SSRF guard

pub mod services;

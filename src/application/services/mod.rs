//! Business logic services for the application layer.

pub mod address_classifier;
pub mod shortlink_service;
pub mod slug_allocator;
pub mod url_normalizer;

pub use address_classifier::AddressClassifier;
pub use shortlink_service::{ServiceOptions, ShortlinkService};
pub use slug_allocator::{SlugAllocator, SlugStrategy};
pub use url_normalizer::UrlNormalizer;

//! Pure helpers used across the application.
//!
//! - [`base62`] - Bijective identifier/slug codec
//! - [`slug_rules`] - Custom slug validation and random slug generation
//! - [`url_normalizer`] - Syntactic destination normalization
//! - [`ip_classification`] - Public/private address classification

pub mod base62;
pub mod ip_classification;
pub mod slug_rules;
pub mod url_normalizer;

//! Domain entities.

pub mod short_link;

pub use short_link::{NewShortLink, ShortLink};

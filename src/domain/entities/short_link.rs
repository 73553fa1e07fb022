//! ShortLink entity mapping a slug to a destination URL.

use chrono::{DateTime, Utc};
use serde::Serialize;

/// A persisted short link.
///
/// Created once through the allocation pipeline and never mutated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ShortLink {
    pub id: i64,
    pub slug: String,
    pub destination: String,
    pub custom: bool,
    pub created_at: DateTime<Utc>,
}

impl ShortLink {
    /// Creates a new ShortLink instance.
    pub fn new(
        id: i64,
        slug: String,
        destination: String,
        custom: bool,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            slug,
            destination,
            custom,
            created_at,
        }
    }
}

/// Input data for inserting a new link.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewShortLink {
    pub slug: String,
    pub destination: String,
    pub custom: bool,
}

impl NewShortLink {
    pub fn custom(slug: impl Into<String>, destination: impl Into<String>) -> Self {
        Self {
            slug: slug.into(),
            destination: destination.into(),
            custom: true,
        }
    }

    pub fn generated(slug: impl Into<String>, destination: impl Into<String>) -> Self {
        Self {
            slug: slug.into(),
            destination: destination.into(),
            custom: false,
        }
    }
}

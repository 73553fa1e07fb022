//! DTOs for shortlink creation and lookup.

use crate::domain::entities::ShortLink;
use chrono::{DateTime, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;
use validator::Validate;

/// Error title for failed creations.
pub const CREATE_FAILED: &str = "Failed to create shortlink";

/// Compiled regex for custom slug validation.
static SLUG_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[A-Za-z0-9_-]+$").unwrap());

/// Request to create a shortlink.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateShortLinkRequest {
    /// Destination, with or without a scheme. The length limit counts
    /// characters, not bytes.
    #[validate(length(
        min = 1,
        max = 2048,
        message = "must be between 1 and 2048 characters"
    ))]
    pub url: String,

    /// Optional custom slug.
    #[validate(length(
        min = 1,
        max = 50,
        message = "must be between 1 and 50 characters"
    ))]
    #[validate(regex(
        path = *SLUG_REGEX,
        message = "can only contain letters, numbers, hyphens, and underscores"
    ))]
    pub slug: Option<String>,
}

impl CreateShortLinkRequest {
    /// Trims both fields; a blank slug becomes `None`.
    pub fn normalized(self) -> Self {
        let slug = self
            .slug
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty());

        Self {
            url: self.url.trim().to_string(),
            slug,
        }
    }
}

/// Successful creation (`201 Created`).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CreateShortLinkResponse {
    pub slug: String,
    pub short_url: String,
    pub destination: String,
    pub created_at: DateTime<Utc>,
}

impl CreateShortLinkResponse {
    pub fn new(link: &ShortLink, short_url: String) -> Self {
        Self {
            slug: link.slug.clone(),
            short_url,
            destination: link.destination.clone(),
            created_at: link.created_at,
        }
    }
}

/// Failed creation (`422 Unprocessable Entity`).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CreateErrorResponse {
    pub error: String,
    pub messages: Vec<String>,
}

impl CreateErrorResponse {
    pub fn new(messages: Vec<String>) -> Self {
        Self {
            error: CREATE_FAILED.to_string(),
            messages,
        }
    }
}

/// Successful lookup.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DecodeResponse {
    pub slug: String,
    pub destination: String,
    pub custom: bool,
    pub created_at: DateTime<Utc>,
}

impl From<ShortLink> for DecodeResponse {
    fn from(link: ShortLink) -> Self {
        Self {
            slug: link.slug,
            destination: link.destination,
            custom: link.custom,
            created_at: link.created_at,
        }
    }
}

/// Error body rendered by [`crate::error::AppError`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}

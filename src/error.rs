//! Error taxonomy for the allocation and validation pipeline.
//!
//! Every failure a request can produce is a variant of [`AppError`]. Axum
//! handlers return it directly; [`IntoResponse`] renders `{ "error": ... }`
//! with [`AppError::status_code`].

use std::borrow::Cow;

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::api::dto::shortlink::ErrorResponse;

/// Name of the case-insensitive unique index on `short_links.slug`.
pub const SLUG_UNIQUE_INDEX: &str = "index_short_links_on_slug_lower";

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Destination is not a valid URL: {0}")]
    MalformedUrl(String),

    #[error("Destination must be a valid HTTP or HTTPS URL (got scheme '{scheme}')")]
    UnsafeScheme { scheme: String },

    #[error("Destination cannot point to private or internal addresses: {host}")]
    UnsafeDestination { host: String },

    #[error("Destination is too long (maximum is {max} characters, got {length})")]
    TooLong { length: usize, max: usize },

    #[error("Slug {0}")]
    InvalidSlugFormat(String),

    #[error("Slug '{0}' is reserved and cannot be used")]
    ReservedSlug(String),

    #[error("Slug '{0}' has already been taken")]
    SlugTaken(String),

    #[error("Failed to allocate a unique slug after {attempts} attempts")]
    AllocationExhausted { attempts: usize },

    #[error("Shortlink not found")]
    NotFound { slug: String },

    #[error("'{0}' is not a valid base62 slug")]
    InvalidSlug(String),

    #[error("Storage error: {0}")]
    Storage(String),
}

impl AppError {
    /// Stable identifier for the error kind.
    pub fn kind(&self) -> &'static str {
        match self {
            AppError::MalformedUrl(_) => "malformed_url",
            AppError::UnsafeScheme { .. } => "unsafe_scheme",
            AppError::UnsafeDestination { .. } => "unsafe_destination",
            AppError::TooLong { .. } => "too_long",
            AppError::InvalidSlugFormat(_) => "invalid_slug_format",
            AppError::ReservedSlug(_) => "reserved_slug",
            AppError::SlugTaken(_) => "slug_taken",
            AppError::AllocationExhausted { .. } => "allocation_exhausted",
            AppError::NotFound { .. } => "not_found",
            AppError::InvalidSlug(_) => "invalid_slug",
            AppError::Storage(_) => "storage_error",
        }
    }

    /// HTTP status the web layer should answer with.
    ///
    /// Input problems are `422 Unprocessable Entity`, a missing slug is
    /// `404`, and anything the caller cannot fix is `500`.
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::NotFound { .. } => StatusCode::NOT_FOUND,
            AppError::AllocationExhausted { .. } | AppError::Storage(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            _ => StatusCode::UNPROCESSABLE_ENTITY,
        }
    }

    /// Returns true if the error was caused by the caller's input.
    pub fn is_client_error(&self) -> bool {
        self.status_code().is_client_error()
    }

    /// Message safe to show to the caller. Server-side failures are logged
    /// and replaced with a generic text.
    pub fn public_message(&self) -> Cow<'static, str> {
        if self.is_client_error() {
            Cow::Owned(self.to_string())
        } else {
            tracing::error!(error = %self, kind = self.kind(), "Request failed");
            Cow::Borrowed("Internal server error")
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let body = ErrorResponse::new(self.public_message());
        (self.status_code(), Json(body)).into_response()
    }
}

impl From<sqlx::Error> for AppError {
    fn from(e: sqlx::Error) -> Self {
        if let Some(db) = e.as_database_error()
            && db.is_unique_violation()
            && matches!(db.constraint(), Some(SLUG_UNIQUE_INDEX))
        {
            // The slug value is not part of the driver error; callers that
            // know it rebuild the variant.
            return AppError::SlugTaken(String::new());
        }

        tracing::error!("Database error: {}", e);
        AppError::Storage(e.to_string())
    }
}

impl From<sqlx::migrate::MigrateError> for AppError {
    fn from(e: sqlx::migrate::MigrateError) -> Self {
        AppError::Storage(format!("migration failed: {e}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(
            AppError::MalformedUrl("x".into()).status_code(),
            StatusCode::UNPROCESSABLE_ENTITY
        );
        assert_eq!(
            AppError::UnsafeDestination {
                host: "localhost".into()
            }
            .status_code(),
            StatusCode::UNPROCESSABLE_ENTITY
        );
        assert_eq!(
            AppError::NotFound {
                slug: "gh".into()
            }
            .status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            AppError::AllocationExhausted { attempts: 10 }.status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            AppError::Storage("boom".into()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_client_error_classification() {
        assert!(AppError::ReservedSlug("api".into()).is_client_error());
        assert!(AppError::SlugTaken("gh".into()).is_client_error());
        assert!(!AppError::Storage("boom".into()).is_client_error());
    }

    #[test]
    fn test_messages() {
        assert_eq!(
            AppError::ReservedSlug("api".into()).to_string(),
            "Slug 'api' is reserved and cannot be used"
        );
        assert_eq!(
            AppError::SlugTaken("duplicate".into()).to_string(),
            "Slug 'duplicate' has already been taken"
        );
        assert!(
            AppError::UnsafeDestination {
                host: "10.0.0.1".into()
            }
            .to_string()
            .contains("private or internal")
        );
    }

    #[test]
    fn test_storage_errors_are_hidden() {
        let message = AppError::Storage("password=secret".into()).public_message();
        assert_eq!(message, "Internal server error");

        let message = AppError::UnsafeScheme {
            scheme: "javascript".into(),
        }
        .public_message();
        assert!(message.contains("javascript"));
    }

    #[test]
    fn test_into_response_status() {
        let response = AppError::NotFound {
            slug: "nope".into(),
        }
        .into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let response = AppError::Storage("boom".into()).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_non_database_sqlx_error_is_storage() {
        let err: AppError = sqlx::Error::RowNotFound.into();
        assert!(matches!(err, AppError::Storage(_)));
    }
}

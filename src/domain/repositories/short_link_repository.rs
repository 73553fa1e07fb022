//! Repository trait for short link storage.

use crate::domain::entities::{NewShortLink, ShortLink};
use crate::error::AppError;
use async_trait::async_trait;

/// Storage for short links.
///
/// Implementations must enforce slug uniqueness case-insensitively at the
/// storage engine level. Application-side checks are not enough once several
/// processes allocate slugs concurrently.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgShortLinkRepository`] - PostgreSQL implementation
/// - [`crate::infrastructure::persistence::MemoryShortLinkRepository`] - in-process store
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ShortLinkRepository: Send + Sync {
    /// Inserts a new link atomically.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::SlugTaken`] if a link with the same slug exists
    /// under case-insensitive comparison.
    ///
    /// Returns [`AppError::Storage`] on storage failures.
    async fn insert(&self, new_link: NewShortLink) -> Result<ShortLink, AppError>;

    /// Finds a link by slug, ignoring letter case.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Storage`] on storage failures.
    async fn find_by_slug(&self, slug: &str) -> Result<Option<ShortLink>, AppError>;

    /// Returns the highest identifier assigned so far, or 0 for an empty store.
    async fn max_assigned_id(&self) -> Result<i64, AppError>;

    /// Lists the most recently created links, newest first.
    async fn recent(&self, limit: i64) -> Result<Vec<ShortLink>, AppError>;
}

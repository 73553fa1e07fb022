//! Unique slug allocation with bounded collision retry.

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use tracing::{debug, warn};

use crate::domain::entities::{NewShortLink, ShortLink};
use crate::domain::repositories::ShortLinkRepository;
use crate::error::AppError;
use crate::utils::base62;
use crate::utils::slug_rules::{generate_random_slug, is_reserved, validate_custom_slug};

/// Attempts made before allocation gives up.
pub const DEFAULT_MAX_ATTEMPTS: usize = 10;

/// How slugs are produced when the caller does not supply one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SlugStrategy {
    /// Seven symbols drawn uniformly from the Base62 alphabet.
    #[default]
    Random,
    /// Base62 encoding of the next free row identifier.
    Sequential,
}

impl FromStr for SlugStrategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "random" => Ok(SlugStrategy::Random),
            "sequential" => Ok(SlugStrategy::Sequential),
            other => Err(format!(
                "unknown slug strategy '{other}' (expected 'random' or 'sequential')"
            )),
        }
    }
}

impl fmt::Display for SlugStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SlugStrategy::Random => f.write_str("random"),
            SlugStrategy::Sequential => f.write_str("sequential"),
        }
    }
}

/// Produces and persists a unique slug for a new link.
///
/// The repository's unique index decides every race. Pre-checks done here
/// only avoid insert attempts that are certain to fail.
pub struct SlugAllocator<L: ShortLinkRepository> {
    repository: Arc<L>,
    strategy: SlugStrategy,
    max_attempts: usize,
}

impl<L: ShortLinkRepository> SlugAllocator<L> {
    /// Creates an allocator. `max_attempts` is raised to at least 1.
    pub fn new(repository: Arc<L>, strategy: SlugStrategy, max_attempts: usize) -> Self {
        Self {
            repository,
            strategy,
            max_attempts: max_attempts.max(1),
        }
    }

    /// Persists a link for `destination` under a custom or generated slug.
    ///
    /// # Custom slugs
    ///
    /// Validated, then inserted exactly once. A collision is reported as
    /// [`AppError::SlugTaken`]; another slug is never substituted.
    ///
    /// # Generated slugs
    ///
    /// Collisions are retried with a new candidate up to the configured
    /// number of attempts.
    ///
    /// # Errors
    ///
    /// - [`AppError::InvalidSlugFormat`] / [`AppError::ReservedSlug`] for bad custom slugs
    /// - [`AppError::SlugTaken`] if a custom slug is in use
    /// - [`AppError::AllocationExhausted`] when every attempt collided
    /// - [`AppError::Storage`] on repository failures
    pub async fn allocate(
        &self,
        destination: String,
        custom_slug: Option<String>,
    ) -> Result<ShortLink, AppError> {
        match custom_slug {
            Some(slug) => self.allocate_custom(slug, destination).await,
            None => match self.strategy {
                SlugStrategy::Random => self.allocate_random(destination).await,
                SlugStrategy::Sequential => self.allocate_sequential(destination).await,
            },
        }
    }

    async fn allocate_custom(&self, slug: String, destination: String) -> Result<ShortLink, AppError> {
        validate_custom_slug(&slug)?;

        match self
            .repository
            .insert(NewShortLink::custom(slug.clone(), destination))
            .await
        {
            Err(AppError::SlugTaken(_)) => {
                debug!(slug, "Custom slug already taken");
                Err(AppError::SlugTaken(slug))
            }
            other => other,
        }
    }

    async fn allocate_random(&self, destination: String) -> Result<ShortLink, AppError> {
        for attempt in 1..=self.max_attempts {
            let slug = generate_random_slug();
            if is_reserved(&slug) {
                continue;
            }

            match self
                .repository
                .insert(NewShortLink::generated(slug.clone(), destination.clone()))
                .await
            {
                Ok(link) => return Ok(link),
                Err(AppError::SlugTaken(_)) => {
                    debug!(attempt, slug, "Random slug collision, retrying");
                }
                Err(e) => return Err(e),
            }
        }

        warn!(attempts = self.max_attempts, "Random slug allocation exhausted");
        Err(AppError::AllocationExhausted {
            attempts: self.max_attempts,
        })
    }

    /// Walks identifiers upward from the store's highest one until an
    /// encoding is free. Encodings that are reserved or already claimed in
    /// any letter case are skipped without spending an attempt; only inserts
    /// that lose a race count against the bound.
    ///
    /// Skips are finite: each one matches a reserved word or a stored row.
    async fn allocate_sequential(&self, destination: String) -> Result<ShortLink, AppError> {
        let max_id = self.repository.max_assigned_id().await?;
        let mut candidate = u64::try_from(max_id).unwrap_or(0) + 1;
        let mut attempts = 0;

        while attempts < self.max_attempts {
            let slug = base62::encode(candidate);
            candidate = candidate
                .checked_add(1)
                .ok_or(AppError::AllocationExhausted { attempts })?;

            if is_reserved(&slug) {
                debug!(slug, "Sequential slug is reserved, skipping");
                continue;
            }

            if self.repository.find_by_slug(&slug).await?.is_some() {
                debug!(slug, "Sequential slug already claimed, skipping");
                continue;
            }

            attempts += 1;
            match self
                .repository
                .insert(NewShortLink::generated(slug.clone(), destination.clone()))
                .await
            {
                Ok(link) => return Ok(link),
                Err(AppError::SlugTaken(_)) => {
                    debug!(attempt = attempts, slug, "Sequential slug lost a race, retrying");
                }
                Err(e) => return Err(e),
            }
        }

        warn!(attempts, "Sequential slug allocation exhausted");
        Err(AppError::AllocationExhausted { attempts })
    }
}

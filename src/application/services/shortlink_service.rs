//! Shortlink creation and resolution facade.

use std::sync::Arc;
use std::time::Duration;

use tracing::info;

use crate::application::services::address_classifier::{AddressClassifier, DEFAULT_DNS_TIMEOUT};
use crate::application::services::slug_allocator::{
    DEFAULT_MAX_ATTEMPTS, SlugAllocator, SlugStrategy,
};
use crate::application::services::url_normalizer::UrlNormalizer;
use crate::config::Config;
use crate::domain::entities::ShortLink;
use crate::domain::repositories::ShortLinkRepository;
use crate::domain::resolver::HostResolver;
use crate::error::AppError;
use crate::utils::slug_rules::{MAX_SLUG_LENGTH, validate_custom_slug};

/// Default page size for [`ShortlinkService::recent`].
pub const DEFAULT_RECENT_LIMIT: i64 = 10;

/// Upper bound for [`ShortlinkService::recent`].
pub const MAX_RECENT_LIMIT: i64 = 100;

/// Tunables for [`ShortlinkService`].
#[derive(Debug, Clone)]
pub struct ServiceOptions {
    pub strategy: SlugStrategy,
    pub max_attempts: usize,
    pub dns_timeout: Duration,
    /// Prefix for short URLs, e.g. `https://sho.rt`.
    pub base_url: String,
}

impl Default for ServiceOptions {
    fn default() -> Self {
        Self {
            strategy: SlugStrategy::default(),
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            dns_timeout: DEFAULT_DNS_TIMEOUT,
            base_url: "http://localhost:3000".to_string(),
        }
    }
}

impl From<&Config> for ServiceOptions {
    fn from(config: &Config) -> Self {
        Self {
            strategy: config.slug_strategy,
            max_attempts: config.slug_max_attempts,
            dns_timeout: Duration::from_millis(config.dns_timeout_ms),
            base_url: config.base_url.clone(),
        }
    }
}

/// Entry point for the web layer.
///
/// `create` runs a fixed pipeline and stops at the first failure:
///
/// 1. custom slug syntax and reserved-name checks
/// 2. destination normalization and address safety
/// 3. slug allocation, which persists the link
///
/// Nothing is written unless every step succeeds.
pub struct ShortlinkService<L: ShortLinkRepository, R: HostResolver> {
    repository: Arc<L>,
    normalizer: UrlNormalizer<R>,
    allocator: SlugAllocator<L>,
    base_url: String,
}

impl<L: ShortLinkRepository, R: HostResolver> ShortlinkService<L, R> {
    pub fn new(repository: Arc<L>, resolver: Arc<R>, options: ServiceOptions) -> Self {
        let classifier = AddressClassifier::new(resolver, options.dns_timeout);

        Self {
            allocator: SlugAllocator::new(
                Arc::clone(&repository),
                options.strategy,
                options.max_attempts,
            ),
            normalizer: UrlNormalizer::new(classifier),
            repository,
            base_url: options.base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Creates a short link.
    ///
    /// A blank `custom_slug` is treated as absent.
    ///
    /// # Errors
    ///
    /// Any error from slug validation, [`UrlNormalizer::normalize`] or
    /// [`SlugAllocator::allocate`], unchanged.
    pub async fn create(
        &self,
        raw_url: &str,
        custom_slug: Option<&str>,
    ) -> Result<ShortLink, AppError> {
        let custom_slug = custom_slug.map(str::trim).filter(|s| !s.is_empty());

        if let Some(slug) = custom_slug {
            validate_custom_slug(slug)?;
        }

        let destination = self.normalizer.normalize(raw_url).await?;

        let link = self
            .allocator
            .allocate(destination, custom_slug.map(str::to_string))
            .await?;

        info!(
            slug = %link.slug,
            destination = %link.destination,
            custom = link.custom,
            "Shortlink created"
        );
        Ok(link)
    }

    /// Looks up a link by slug, ignoring letter case.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no link matches.
    pub async fn resolve(&self, slug: &str) -> Result<ShortLink, AppError> {
        let slug = slug.trim();
        let not_found = || AppError::NotFound {
            slug: slug.to_string(),
        };

        // No stored slug can match these
        if slug.is_empty() || slug.chars().count() > MAX_SLUG_LENGTH {
            return Err(not_found());
        }

        self.repository
            .find_by_slug(slug)
            .await?
            .ok_or_else(not_found)
    }

    /// Builds the public short URL for a slug.
    pub fn short_url(&self, slug: &str) -> String {
        format!("{}/{}", self.base_url, slug)
    }

    /// Lists the newest links first. `limit` is clamped to 1..=100.
    pub async fn recent(&self, limit: i64) -> Result<Vec<ShortLink>, AppError> {
        self.repository
            .recent(limit.clamp(1, MAX_RECENT_LIMIT))
            .await
    }

    /// Runs destination validation alone, without allocating anything.
    pub async fn check_destination(&self, raw_url: &str) -> Result<String, AppError> {
        self.normalizer.normalize(raw_url).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::NewShortLink;
    use crate::domain::repositories::MockShortLinkRepository;
    use crate::domain::resolver::MockHostResolver;
    use chrono::Utc;
    use std::net::IpAddr;

    fn link(slug: &str, destination: &str, custom: bool) -> ShortLink {
        ShortLink::new(
            1,
            slug.to_string(),
            destination.to_string(),
            custom,
            Utc::now(),
        )
    }

    fn stored(new_link: &NewShortLink) -> ShortLink {
        link(&new_link.slug, &new_link.destination, new_link.custom)
    }

    fn public_resolver() -> MockHostResolver {
        let mut mock = MockHostResolver::new();
        mock.expect_resolve()
            .returning(|_| Ok(vec!["140.82.112.3".parse::<IpAddr>().unwrap()]));
        mock
    }

    fn untouched_resolver() -> MockHostResolver {
        let mut mock = MockHostResolver::new();
        mock.expect_resolve().times(0);
        mock
    }

    fn service(
        repo: MockShortLinkRepository,
        resolver: MockHostResolver,
    ) -> ShortlinkService<MockShortLinkRepository, MockHostResolver> {
        ShortlinkService::new(
            Arc::new(repo),
            Arc::new(resolver),
            ServiceOptions {
                base_url: "https://sho.rt/".to_string(),
                ..ServiceOptions::default()
            },
        )
    }

    #[tokio::test]
    async fn test_create_with_custom_slug() {
        let mut repo = MockShortLinkRepository::new();
        repo.expect_insert()
            .withf(|new_link| {
                new_link.slug == "gh" && new_link.destination == "https://github.com"
            })
            .times(1)
            .returning(|new_link| Ok(stored(&new_link)));

        let service = service(repo, public_resolver());
        let result = service.create("github.com", Some("gh")).await.unwrap();

        assert_eq!(result.slug, "gh");
        assert_eq!(result.destination, "https://github.com");
        assert!(result.custom);
    }

    #[tokio::test]
    async fn test_create_with_generated_slug() {
        let mut repo = MockShortLinkRepository::new();
        repo.expect_insert()
            .times(1)
            .returning(|new_link| Ok(stored(&new_link)));

        let service = service(repo, public_resolver());
        let result = service.create("https://example.com", None).await.unwrap();

        assert_eq!(result.slug.len(), 7);
        assert!(!result.custom);
    }

    #[tokio::test]
    async fn test_blank_custom_slug_is_treated_as_absent() {
        let mut repo = MockShortLinkRepository::new();
        repo.expect_insert()
            .withf(|new_link| !new_link.custom)
            .times(1)
            .returning(|new_link| Ok(stored(&new_link)));

        let service = service(repo, public_resolver());
        let result = service.create("https://example.com", Some("  ")).await;

        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_reserved_slug_rejected_before_destination_checks() {
        let mut repo = MockShortLinkRepository::new();
        repo.expect_insert().times(0);

        let service = service(repo, untouched_resolver());

        for destination in ["https://example.com", "javascript:alert(1)", "http://10.0.0.1"] {
            let result = service.create(destination, Some("api")).await;
            assert!(
                matches!(result, Err(AppError::ReservedSlug(_))),
                "{destination} should fail on the slug"
            );
        }
    }

    #[tokio::test]
    async fn test_invalid_slug_format_rejected() {
        let mut repo = MockShortLinkRepository::new();
        repo.expect_insert().times(0);

        let service = service(repo, untouched_resolver());
        let result = service
            .create("https://example.com", Some("invalid slug"))
            .await;

        assert!(matches!(result, Err(AppError::InvalidSlugFormat(_))));
    }

    #[tokio::test]
    async fn test_unsafe_destination_persists_nothing() {
        let mut repo = MockShortLinkRepository::new();
        repo.expect_insert().times(0);

        let service = service(repo, untouched_resolver());
        let result = service
            .create("http://169.254.169.254/latest/meta-data", None)
            .await;

        assert!(matches!(result, Err(AppError::UnsafeDestination { .. })));
    }

    #[tokio::test]
    async fn test_resolve_found() {
        let mut repo = MockShortLinkRepository::new();
        repo.expect_find_by_slug()
            .withf(|slug| slug == "GitHub")
            .times(1)
            .returning(|_| Ok(Some(link("github", "https://github.com", true))));

        let service = service(repo, untouched_resolver());
        let result = service.resolve("GitHub").await.unwrap();

        assert_eq!(result.slug, "github");
    }

    #[tokio::test]
    async fn test_resolve_not_found() {
        let mut repo = MockShortLinkRepository::new();
        repo.expect_find_by_slug().times(1).returning(|_| Ok(None));

        let service = service(repo, untouched_resolver());
        let result = service.resolve("nonexistent").await;

        assert!(matches!(
            result,
            Err(AppError::NotFound { ref slug }) if slug == "nonexistent"
        ));
    }

    #[tokio::test]
    async fn test_resolve_skips_lookup_for_impossible_slugs() {
        let mut repo = MockShortLinkRepository::new();
        repo.expect_find_by_slug().times(0);

        let service = service(repo, untouched_resolver());

        assert!(matches!(
            service.resolve("").await,
            Err(AppError::NotFound { .. })
        ));
        assert!(matches!(
            service.resolve(&"a".repeat(51)).await,
            Err(AppError::NotFound { .. })
        ));
    }

    #[test]
    fn test_short_url_trims_trailing_slash() {
        let service = service(MockShortLinkRepository::new(), MockHostResolver::new());
        assert_eq!(service.short_url("gh"), "https://sho.rt/gh");
    }

    #[tokio::test]
    async fn test_recent_limit_is_clamped() {
        let mut repo = MockShortLinkRepository::new();
        repo.expect_recent()
            .withf(|limit| *limit == 100)
            .times(1)
            .returning(|_| Ok(vec![]));
        repo.expect_recent()
            .withf(|limit| *limit == 1)
            .times(1)
            .returning(|_| Ok(vec![]));

        let service = service(repo, untouched_resolver());

        assert!(service.recent(5000).await.unwrap().is_empty());
        assert!(service.recent(0).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_check_destination_does_not_persist() {
        let mut repo = MockShortLinkRepository::new();
        repo.expect_insert().times(0);

        let service = service(repo, public_resolver());
        let result = service.check_destination("example.com/docs").await;

        assert_eq!(result.unwrap(), "https://example.com/docs");
    }
}

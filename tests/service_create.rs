mod common;

use std::collections::HashSet;

use shortlink::application::services::SlugStrategy;
use shortlink::error::AppError;
use shortlink::utils::base62;

#[tokio::test]
async fn test_create_adds_https_scheme() {
    let (_, service) = common::create_service(SlugStrategy::Random);

    let link = service.create("example.com", None).await.unwrap();

    assert_eq!(link.destination, "https://example.com");
}

#[tokio::test]
async fn test_create_keeps_http_scheme() {
    let (_, service) = common::create_service(SlugStrategy::Random);

    let link = service.create("http://example.com", None).await.unwrap();

    assert_eq!(link.destination, "http://example.com");
}

#[tokio::test]
async fn test_create_with_custom_slug_and_resolve_any_case() {
    let (_, service) = common::create_service(SlugStrategy::Random);

    let link = service
        .create("https://github.com", Some("GitHub"))
        .await
        .unwrap();
    assert_eq!(link.slug, "GitHub");
    assert!(link.custom);

    let found = service.resolve("github").await.unwrap();
    assert_eq!(found.id, link.id);

    let found = service.resolve("GITHUB").await.unwrap();
    assert_eq!(found.destination, "https://github.com");
}

#[tokio::test]
async fn test_resolve_lowercase_slug_with_mixed_case_query() {
    let (_, service) = common::create_service(SlugStrategy::Random);
    service
        .create("https://github.com", Some("github"))
        .await
        .unwrap();

    let found = service.resolve("GitHub").await.unwrap();

    assert_eq!(found.slug, "github");
}

#[tokio::test]
async fn test_custom_slug_taken_in_other_case() {
    let (repository, service) = common::create_service(SlugStrategy::Random);
    service
        .create("https://github.com", Some("duplicate"))
        .await
        .unwrap();

    let result = service.create("https://gitlab.com", Some("DUPLICATE")).await;

    assert!(matches!(result, Err(AppError::SlugTaken(ref slug)) if slug == "DUPLICATE"));
    assert_eq!(repository.len(), 1);
}

#[tokio::test]
async fn test_reserved_slugs_rejected_regardless_of_destination() {
    let (repository, service) = common::create_service(SlugStrategy::Random);

    for slug in ["api", "admin", "up", "short_links", "health", "Admin"] {
        for destination in ["https://example.com", "javascript:alert(1)", "localhost"] {
            let result = service.create(destination, Some(slug)).await;
            assert!(
                matches!(result, Err(AppError::ReservedSlug(_))),
                "{slug} with {destination} should be reserved"
            );
        }
    }

    assert!(repository.is_empty());
}

#[tokio::test]
async fn test_unsafe_schemes_rejected() {
    let (repository, service) = common::create_service(SlugStrategy::Random);

    for input in [
        "javascript:alert(1)",
        "data:text/html,<script>alert(1)</script>",
        "vbscript:msgbox",
        "ftp://example.com/file.txt",
        "file:///etc/passwd",
    ] {
        let result = service.create(input, None).await;
        assert!(
            matches!(result, Err(AppError::UnsafeScheme { .. })),
            "{input} should be rejected"
        );
    }

    assert!(repository.is_empty());
}

#[tokio::test]
async fn test_http_scheme_without_slashes_not_stored() {
    let (repository, service) = common::create_service(SlugStrategy::Random);

    for input in ["http:example.com", "https:/example.com"] {
        let result = service.create(input, None).await;
        assert!(
            matches!(result, Err(AppError::MalformedUrl(_))),
            "{input} should be rejected"
        );
    }

    assert!(repository.is_empty());
}

#[tokio::test]
async fn test_internal_destinations_rejected() {
    let (repository, service) = common::create_service(SlugStrategy::Random);

    for input in [
        "http://127.0.0.1/admin",
        "http://10.0.0.1/admin",
        "http://192.168.1.1/router",
        "http://172.16.0.1/internal",
        "http://169.254.169.254/latest/meta-data",
        "http://localhost/admin",
        "localhost:3000",
        "http://internal.corp/",
        "http://metadata.attacker.test/",
        "http://mixed.example.com/",
        "http://mapped.example.com/",
        "http://unknown-host.test/",
    ] {
        let result = service.create(input, None).await;
        assert!(
            matches!(result, Err(AppError::UnsafeDestination { .. })),
            "{input} should be rejected"
        );
    }

    assert!(repository.is_empty());
}

#[tokio::test]
async fn test_public_literal_address_accepted() {
    let (_, service) = common::create_service(SlugStrategy::Random);

    let link = service.create("http://8.8.8.8", None).await.unwrap();

    assert_eq!(link.destination, "http://8.8.8.8");
}

#[tokio::test]
async fn test_too_long_destination_rejected() {
    let (_, service) = common::create_service(SlugStrategy::Random);
    let url = format!("https://example.com/{}", "a".repeat(2048));

    let result = service.create(&url, None).await;

    assert!(matches!(result, Err(AppError::TooLong { .. })));
}

#[tokio::test]
async fn test_blank_destination_rejected() {
    let (_, service) = common::create_service(SlugStrategy::Random);

    let result = service.create("   ", None).await;

    assert!(matches!(result, Err(AppError::MalformedUrl(_))));
}

#[tokio::test]
async fn test_sequential_slugs_follow_identifiers() {
    let (_, service) = common::create_service(SlugStrategy::Sequential);

    let first = service.create("https://example.com", None).await.unwrap();
    let second = service.create("https://github.com", None).await.unwrap();

    assert_eq!(first.slug, base62::encode(1));
    assert_eq!(second.slug, base62::encode(2));
    assert!(!first.custom);
}

#[tokio::test]
async fn test_sequential_skips_slugs_claimed_by_custom_links() {
    let (_, service) = common::create_service(SlugStrategy::Sequential);

    // ids 1 and 2 claim the encodings of 3 and 4 ("d" and "e")
    service
        .create("https://github.com", Some("d"))
        .await
        .unwrap();
    service
        .create("https://gitlab.com", Some("E"))
        .await
        .unwrap();

    let link = service.create("https://example.com", None).await.unwrap();

    assert_eq!(link.slug, "f");
    assert_eq!(service.resolve("d").await.unwrap().destination, "https://github.com");
}

#[tokio::test]
async fn test_sequential_survives_case_fold_runs() {
    let (_, service) = common::create_service(SlugStrategy::Sequential);
    let mut seen = HashSet::new();

    // past 26 the upper-case encodings fold onto stored lower-case slugs
    for n in 1..=150 {
        let link = service
            .create("https://example.com", None)
            .await
            .unwrap_or_else(|e| panic!("create #{n} failed: {e:?}"));
        assert!(seen.insert(link.slug.to_lowercase()), "duplicate slug {}", link.slug);
    }

    assert_eq!(seen.len(), 150);
    for slug in &seen {
        assert_eq!(service.resolve(slug).await.unwrap().destination, "https://example.com");
    }
}

#[tokio::test]
async fn test_resolve_unknown_slug() {
    let (_, service) = common::create_service(SlugStrategy::Random);

    let result = service.resolve("nonexistent").await;

    assert!(matches!(result, Err(AppError::NotFound { .. })));
}

#[tokio::test]
async fn test_recent_returns_newest_first() {
    let (_, service) = common::create_service(SlugStrategy::Random);
    for slug in ["one", "two", "three"] {
        service
            .create("https://example.com", Some(slug))
            .await
            .unwrap();
    }

    let recent = service.recent(2).await.unwrap();
    let slugs: Vec<&str> = recent.iter().map(|l| l.slug.as_str()).collect();

    assert_eq!(slugs, vec!["three", "two"]);
}

#[tokio::test]
async fn test_short_url_uses_base_url() {
    let (_, service) = common::create_service(SlugStrategy::Random);

    assert_eq!(service.short_url("gh"), "https://sho.rt/gh");
}

#![allow(dead_code)]

use axum_test::TestServer;
use shortlink::api::routes::app_router;
use shortlink::application::services::{ServiceOptions, ShortlinkService, SlugStrategy};
use shortlink::state::AppState;
use std::net::IpAddr;
use std::sync::Arc;
use shortlink::infrastructure::dns::StaticResolver;
use shortlink::infrastructure::persistence::MemoryShortLinkRepository;

pub type TestService = ShortlinkService<MemoryShortLinkRepository, StaticResolver>;

pub const BASE_URL: &str = "https://sho.rt";

fn ip(s: &str) -> IpAddr {
    s.parse().unwrap()
}

/// Host table shared by the integration tests.
pub fn resolver() -> StaticResolver {
    StaticResolver::new()
        .with_host("github.com", &[ip("140.82.112.3")])
        .with_host("gitlab.com", &[ip("172.65.251.78")])
        .with_host("example.com", &[ip("93.184.216.34"), ip("2606:2800:220:1::1")])
        .with_host("google.com", &[ip("142.250.185.78")])
        .with_host("internal.corp", &[ip("10.0.0.5")])
        .with_host("metadata.attacker.test", &[ip("169.254.169.254")])
        .with_host("mixed.example.com", &[ip("8.8.8.8"), ip("192.168.1.10")])
        .with_host("mapped.example.com", &[ip("::ffff:127.0.0.1")])
}

pub fn options(strategy: SlugStrategy) -> ServiceOptions {
    ServiceOptions {
        strategy,
        base_url: BASE_URL.to_string(),
        ..ServiceOptions::default()
    }
}

pub fn create_service(strategy: SlugStrategy) -> (Arc<MemoryShortLinkRepository>, TestService) {
    create_service_with(options(strategy))
}

pub fn create_service_with(
    options: ServiceOptions,
) -> (Arc<MemoryShortLinkRepository>, TestService) {
    let repository = Arc::new(MemoryShortLinkRepository::new());
    let service = ShortlinkService::new(Arc::clone(&repository), Arc::new(resolver()), options);
    (repository, service)
}

/// Test server over the full route table and a fresh in-memory store.
pub fn create_server(strategy: SlugStrategy) -> (Arc<MemoryShortLinkRepository>, TestServer) {
    let (repository, service) = create_service(strategy);
    let server = TestServer::new(app_router(AppState::new(service))).unwrap();
    (repository, server)
}

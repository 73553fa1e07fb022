//! Resolver answering from a fixed table.

use async_trait::async_trait;
use std::collections::HashMap;
use std::net::IpAddr;

use crate::domain::resolver::{HostResolver, ResolutionError};

/// Answers lookups from an in-memory host table.
///
/// Host names are matched case-insensitively with any trailing dot removed.
/// Unknown hosts fail like NXDOMAIN.
#[derive(Debug, Clone, Default)]
pub struct StaticResolver {
    hosts: HashMap<String, Vec<IpAddr>>,
}

impl StaticResolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or replaces the addresses for `host`.
    pub fn with_host(mut self, host: &str, addresses: &[IpAddr]) -> Self {
        self.hosts.insert(normalize(host), addresses.to_vec());
        self
    }
}

fn normalize(host: &str) -> String {
    host.trim_end_matches('.').to_ascii_lowercase()
}

#[async_trait]
impl HostResolver for StaticResolver {
    async fn resolve(&self, host: &str) -> Result<Vec<IpAddr>, ResolutionError> {
        self.hosts
            .get(&normalize(host))
            .cloned()
            .ok_or_else(|| ResolutionError::new(host, "no such host"))
    }
}

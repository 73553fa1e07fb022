//! Resolver backed by the operating system's DNS configuration.

use async_trait::async_trait;
use hickory_resolver::TokioResolver;
use std::net::IpAddr;
use tracing::debug;

use crate::domain::resolver::{HostResolver, ResolutionError};

/// Looks hosts up with hickory using `/etc/resolv.conf` (or the platform
/// equivalent).
///
/// Both A and AAAA answers are returned. Timeouts are left to
/// [`crate::application::services::AddressClassifier`].
pub struct SystemResolver {
    resolver: TokioResolver,
}

impl SystemResolver {
    /// Builds a resolver from the system configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ResolutionError`] if the system configuration cannot be read.
    pub fn from_system_conf() -> Result<Self, ResolutionError> {
        let resolver = TokioResolver::builder_tokio()
            .map_err(|e| ResolutionError::new("system", e.to_string()))?
            .build();

        Ok(Self { resolver })
    }
}

#[async_trait]
impl HostResolver for SystemResolver {
    async fn resolve(&self, host: &str) -> Result<Vec<IpAddr>, ResolutionError> {
        let response = self
            .resolver
            .lookup_ip(host)
            .await
            .map_err(|e| ResolutionError::new(host, e.to_string()))?;

        let addresses: Vec<IpAddr> = response.iter().collect();
        debug!(host, count = addresses.len(), "DNS lookup completed");

        Ok(addresses)
    }
}

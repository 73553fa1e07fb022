//! Hostname resolution capability used by address classification.

use async_trait::async_trait;
use std::net::IpAddr;
use thiserror::Error;

/// Failure to resolve a hostname.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("DNS error for {host}: {message}")]
pub struct ResolutionError {
    pub host: String,
    pub message: String,
}

impl ResolutionError {
    pub fn new(host: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            message: message.into(),
        }
    }
}

/// Resolves a hostname to the full set of addresses it points at.
///
/// Implementations return every address they find, not just the first one,
/// so that a single private record among public ones is still detected.
/// Timeouts are applied by the caller.
///
/// # Implementations
///
/// - [`crate::infrastructure::dns::SystemResolver`] - system DNS configuration
/// - [`crate::infrastructure::dns::StaticResolver`] - fixed address table
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait HostResolver: Send + Sync {
    async fn resolve(&self, host: &str) -> Result<Vec<IpAddr>, ResolutionError>;
}

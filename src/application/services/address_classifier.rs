//! SSRF guard deciding whether a destination host is safe to store.

use std::net::IpAddr;
use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, warn};
use url::Host;

use crate::domain::resolver::HostResolver;
use crate::error::AppError;
use crate::utils::ip_classification::first_unsafe;

/// Resolution budget used when none is configured.
pub const DEFAULT_DNS_TIMEOUT: Duration = Duration::from_millis(300);

/// Resolves hosts and rejects any that point at non-public addresses.
///
/// # Policy
///
/// - `localhost` and `*.localhost` are rejected without resolution
/// - Literal IP hosts are classified directly
/// - Domain names are resolved with a bounded timeout; **every** returned
///   address must be public
/// - Resolution failures, timeouts, and empty answers are rejected
pub struct AddressClassifier<R: HostResolver> {
    resolver: Arc<R>,
    timeout: Duration,
}

impl<R: HostResolver> AddressClassifier<R> {
    /// Creates a classifier with the given resolver and per-lookup timeout.
    pub fn new(resolver: Arc<R>, timeout: Duration) -> Self {
        Self { resolver, timeout }
    }

    /// Checks a host parsed out of a URL.
    ///
    /// Returns the addresses that were verified.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::UnsafeDestination`] if the host is rejected.
    pub async fn check_host(&self, host: &Host<&str>) -> Result<Vec<IpAddr>, AppError> {
        match host {
            Host::Ipv4(ip) => check_addresses(&ip.to_string(), vec![IpAddr::V4(*ip)]),
            Host::Ipv6(ip) => check_addresses(&ip.to_string(), vec![IpAddr::V6(*ip)]),
            Host::Domain(domain) => self.check_hostname(domain).await,
        }
    }

    /// Checks a hostname or literal address given as text.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::UnsafeDestination`] if the host is rejected.
    pub async fn check_hostname(&self, host: &str) -> Result<Vec<IpAddr>, AppError> {
        let host = host.trim_end_matches('.');

        if is_localhost(host) {
            warn!(host, "Rejected destination: localhost");
            return Err(unsafe_destination(host));
        }

        let literal = host.trim_start_matches('[').trim_end_matches(']');
        if let Ok(ip) = literal.parse::<IpAddr>() {
            return check_addresses(host, vec![ip]);
        }

        let addresses = match tokio::time::timeout(self.timeout, self.resolver.resolve(host)).await
        {
            Ok(Ok(addresses)) => addresses,
            Ok(Err(e)) => {
                warn!(host, error = %e, "Rejected destination: resolution failed");
                return Err(unsafe_destination(host));
            }
            Err(_) => {
                warn!(
                    host,
                    timeout_ms = self.timeout.as_millis() as u64,
                    "Rejected destination: resolution timed out"
                );
                return Err(unsafe_destination(host));
            }
        };

        if addresses.is_empty() {
            warn!(host, "Rejected destination: no addresses found");
            return Err(unsafe_destination(host));
        }

        debug!(host, ?addresses, "Resolved destination host");
        check_addresses(host, addresses)
    }
}

fn check_addresses(host: &str, addresses: Vec<IpAddr>) -> Result<Vec<IpAddr>, AppError> {
    if let Some((ip, class)) = first_unsafe(&addresses) {
        warn!(host, %ip, %class, "Rejected destination: non-public address");
        return Err(unsafe_destination(host));
    }

    Ok(addresses)
}

fn is_localhost(host: &str) -> bool {
    let lower = host.to_ascii_lowercase();
    lower == "localhost" || lower.ends_with(".localhost")
}

fn unsafe_destination(host: &str) -> AppError {
    AppError::UnsafeDestination {
        host: host.to_string(),
    }
}

//! Destination normalization with address safety checks.

use tracing::debug;

use crate::application::services::address_classifier::AddressClassifier;
use crate::domain::resolver::HostResolver;
use crate::error::AppError;
use crate::utils::url_normalizer::normalize_url;

/// Turns raw user input into a destination that is safe to store.
///
/// Runs the syntactic rules of [`normalize_url`] and then checks the host
/// with an [`AddressClassifier`].
pub struct UrlNormalizer<R: HostResolver> {
    classifier: AddressClassifier<R>,
}

impl<R: HostResolver> UrlNormalizer<R> {
    pub fn new(classifier: AddressClassifier<R>) -> Self {
        Self { classifier }
    }

    /// Normalizes and validates a raw destination.
    ///
    /// The returned string is scheme-safe and was address-safe at the time
    /// of the check. DNS answers can change afterwards.
    ///
    /// # Errors
    ///
    /// - [`AppError::MalformedUrl`] for blank or unparsable input
    /// - [`AppError::UnsafeScheme`] for non-HTTP(S) schemes
    /// - [`AppError::TooLong`] past 2048 characters
    /// - [`AppError::UnsafeDestination`] if the host is local, private, or
    ///   cannot be resolved
    pub async fn normalize(&self, raw: &str) -> Result<String, AppError> {
        let parsed = normalize_url(raw)?;

        let host = parsed
            .url
            .host()
            .ok_or_else(|| AppError::MalformedUrl("URL must have a host".to_string()))?;
        self.classifier.check_host(&host).await?;

        debug!(destination = %parsed.normalized, "Destination validated");
        Ok(parsed.normalized)
    }
}

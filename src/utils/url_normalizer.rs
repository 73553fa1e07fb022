//! Syntactic normalization of user-supplied destinations.
//!
//! This covers everything that can be decided without the network: scheme
//! detection and defaulting, length limits, and URL parsing. Address safety
//! of the host is checked afterwards by
//! [`crate::application::services::UrlNormalizer`].

use crate::error::AppError;
use regex::Regex;
use std::sync::LazyLock;
use url::Url;

/// Maximum length of a stored destination, counted in characters rather
/// than bytes. The `char_length` check in the migration and the request
/// validator count the same way.
pub const MAX_DESTINATION_LENGTH: usize = 2048;

/// Scheme prepended when the input has none.
pub const DEFAULT_SCHEME_PREFIX: &str = "https://";

/// Leading `scheme:` plus the character that follows it, if any.
static SCHEME_PREFIX_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([A-Za-z][A-Za-z0-9+.\-]*):(.?)").unwrap());

/// A destination that passed syntactic validation.
#[derive(Debug, Clone)]
pub struct ParsedDestination {
    /// The string that will be stored.
    pub normalized: String,
    /// Parsed form of `normalized`, used to extract the host.
    pub url: Url,
}

/// Normalizes a raw destination.
///
/// # Normalization Rules
///
/// 1. Surrounding whitespace is trimmed
/// 2. `http://` and `https://` inputs are kept as they are; `http:` without
///    the `//` is rejected
/// 3. Any other explicit scheme (`javascript:`, `data:`, `ftp:` ...) is rejected
/// 4. Inputs without a scheme get `https://` prepended, `host:port` included
/// 5. The result must be at most [`MAX_DESTINATION_LENGTH`] characters
/// 6. The result must parse as an absolute URL with a host
///
/// # Errors
///
/// - [`AppError::MalformedUrl`] for blank or unparsable input
/// - [`AppError::UnsafeScheme`] for non-HTTP(S) schemes
/// - [`AppError::TooLong`] when the normalized string exceeds the limit
///
/// # Examples
///
/// ```
/// use shortlink::utils::url_normalizer::normalize_url;
///
/// assert_eq!(normalize_url("example.com").unwrap().normalized, "https://example.com");
/// assert_eq!(normalize_url("http://example.com").unwrap().normalized, "http://example.com");
/// assert!(normalize_url("javascript:alert(1)").is_err());
/// ```
pub fn normalize_url(input: &str) -> Result<ParsedDestination, AppError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(AppError::MalformedUrl("destination can't be blank".to_string()));
    }

    let normalized = match explicit_scheme(trimmed) {
        Some(scheme) if is_http_scheme(scheme) => {
            if !trimmed[scheme.len() + 1..].starts_with("//") {
                return Err(AppError::MalformedUrl(format!(
                    "expected '{}://' before the host",
                    scheme.to_ascii_lowercase()
                )));
            }
            trimmed.to_string()
        }
        Some(scheme) => {
            return Err(AppError::UnsafeScheme {
                scheme: scheme.to_ascii_lowercase(),
            });
        }
        None => format!("{DEFAULT_SCHEME_PREFIX}{trimmed}"),
    };

    let length = normalized.chars().count();
    if length > MAX_DESTINATION_LENGTH {
        return Err(AppError::TooLong {
            length,
            max: MAX_DESTINATION_LENGTH,
        });
    }

    let url = Url::parse(&normalized).map_err(|e| AppError::MalformedUrl(e.to_string()))?;

    if !is_http_scheme(url.scheme()) {
        return Err(AppError::UnsafeScheme {
            scheme: url.scheme().to_string(),
        });
    }

    if url.host().is_none() {
        return Err(AppError::MalformedUrl("URL must have a host".to_string()));
    }

    Ok(ParsedDestination { normalized, url })
}

/// Returns the scheme the input starts with, if it has one.
///
/// `name:` followed by a digit is a `host:port` pair, not a scheme.
fn explicit_scheme(input: &str) -> Option<&str> {
    let captures = SCHEME_PREFIX_REGEX.captures(input)?;
    let scheme = captures.get(1)?.as_str();
    let next = captures.get(2).map_or("", |m| m.as_str());

    if next.starts_with(|c: char| c.is_ascii_digit()) {
        return None;
    }

    Some(scheme)
}

fn is_http_scheme(scheme: &str) -> bool {
    scheme.eq_ignore_ascii_case("http") || scheme.eq_ignore_ascii_case("https")
}

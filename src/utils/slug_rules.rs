//! Slug generation and validation rules.
//!
//! Custom slugs are checked by a fixed sequence of [`SlugRule`]s that stops
//! at the first failure. Random slugs are sampled from the Base62 alphabet.

use crate::error::AppError;
use crate::utils::base62::ALPHABET;
use rand::Rng;

/// Length of randomly generated slugs.
pub const RANDOM_SLUG_LENGTH: usize = 7;

/// Maximum length of any slug.
pub const MAX_SLUG_LENGTH: usize = 50;

/// Slugs that collide with the application's own routes.
pub const RESERVED_SLUGS: &[&str] = &["api", "admin", "up", "short_links", "health"];

/// A single check applied to a caller-supplied slug.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlugRule {
    /// 1 to [`MAX_SLUG_LENGTH`] characters.
    Length,
    /// ASCII letters, digits, `-` and `_` only.
    Charset,
    /// Not one of [`RESERVED_SLUGS`], compared case-insensitively.
    NotReserved,
}

/// Rules applied to custom slugs, in order.
pub const CUSTOM_SLUG_RULES: [SlugRule; 3] =
    [SlugRule::Length, SlugRule::Charset, SlugRule::NotReserved];

impl SlugRule {
    /// Applies this rule to `slug`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::InvalidSlugFormat`] for length and charset
    /// violations and [`AppError::ReservedSlug`] for reserved names.
    pub fn check(self, slug: &str) -> Result<(), AppError> {
        match self {
            SlugRule::Length if slug.is_empty() => {
                Err(AppError::InvalidSlugFormat("can't be blank".to_string()))
            }
            SlugRule::Length if slug.chars().count() > MAX_SLUG_LENGTH => {
                Err(AppError::InvalidSlugFormat(format!(
                    "is too long (maximum is {MAX_SLUG_LENGTH} characters)"
                )))
            }
            SlugRule::Charset
                if !slug
                    .chars()
                    .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_') =>
            {
                Err(AppError::InvalidSlugFormat(
                    "can only contain letters, numbers, hyphens, and underscores".to_string(),
                ))
            }
            SlugRule::NotReserved if is_reserved(slug) => {
                Err(AppError::ReservedSlug(slug.to_string()))
            }
            _ => Ok(()),
        }
    }
}

/// Validates a user-provided custom slug.
///
/// # Errors
///
/// Returns the error of the first rule in [`CUSTOM_SLUG_RULES`] that fails.
///
/// # Examples
///
/// ```
/// use shortlink::utils::slug_rules::validate_custom_slug;
///
/// assert!(validate_custom_slug("valid-slug_123").is_ok());
/// assert!(validate_custom_slug("invalid slug").is_err());
/// assert!(validate_custom_slug("API").is_err());
/// ```
pub fn validate_custom_slug(slug: &str) -> Result<(), AppError> {
    CUSTOM_SLUG_RULES.iter().try_for_each(|rule| rule.check(slug))
}

/// Returns true if `slug` matches a reserved route segment in any letter case.
pub fn is_reserved(slug: &str) -> bool {
    RESERVED_SLUGS
        .iter()
        .any(|reserved| reserved.eq_ignore_ascii_case(slug))
}

/// Generates a random slug of [`RANDOM_SLUG_LENGTH`] Base62 symbols.
///
/// Each symbol is drawn uniformly and independently from the alphabet, so
/// the space holds 62^7 (about 3.5 * 10^12) slugs.
pub fn generate_random_slug() -> String {
    generate_random_slug_with(&mut rand::rng())
}

/// Same as [`generate_random_slug`] with a caller-provided generator.
pub fn generate_random_slug_with<R: Rng + ?Sized>(rng: &mut R) -> String {
    (0..RANDOM_SLUG_LENGTH)
        .map(|_| ALPHABET[rng.random_range(0..ALPHABET.len())] as char)
        .collect()
}

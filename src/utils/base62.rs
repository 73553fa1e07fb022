//! Bijective Base62 codec between row identifiers and slugs.
//!
//! The alphabet order is fixed (`a-z`, `A-Z`, `0-9`), so `0` encodes to `"a"`
//! and `62` encodes to `"ba"`. Encoded slugs carry no padding.

use crate::error::AppError;

/// Symbols in value order; index 0 is `a`.
pub const ALPHABET: &[u8; 62] = b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

const BASE: u64 = 62;

/// Encodes an identifier as a Base62 slug.
///
/// # Examples
///
/// ```
/// use shortlink::utils::base62::encode;
///
/// assert_eq!(encode(0), "a");
/// assert_eq!(encode(61), "9");
/// assert_eq!(encode(62), "ba");
/// assert_eq!(encode(123), "b9");
/// ```
pub fn encode(mut n: u64) -> String {
    if n == 0 {
        return (ALPHABET[0] as char).to_string();
    }

    // 62^11 > u64::MAX
    let mut buf = [0u8; 11];
    let mut i = buf.len();
    while n > 0 {
        i -= 1;
        buf[i] = ALPHABET[(n % BASE) as usize];
        n /= BASE;
    }

    buf[i..].iter().map(|&b| b as char).collect()
}

/// Decodes a Base62 slug back into its identifier.
///
/// # Errors
///
/// Returns [`AppError::InvalidSlug`] if the slug is empty, contains a
/// character outside [`ALPHABET`], or does not fit in a `u64`.
pub fn decode(slug: &str) -> Result<u64, AppError> {
    if slug.is_empty() {
        return Err(AppError::InvalidSlug(slug.to_string()));
    }

    slug.bytes().try_fold(0u64, |acc, byte| {
        let digit = symbol_value(byte).ok_or_else(|| AppError::InvalidSlug(slug.to_string()))?;
        acc.checked_mul(BASE)
            .and_then(|v| v.checked_add(digit))
            .ok_or_else(|| AppError::InvalidSlug(slug.to_string()))
    })
}

/// Returns true if every character of `slug` belongs to the alphabet.
pub fn is_base62(slug: &str) -> bool {
    !slug.is_empty() && slug.bytes().all(|b| symbol_value(b).is_some())
}

fn symbol_value(byte: u8) -> Option<u64> {
    match byte {
        b'a'..=b'z' => Some(u64::from(byte - b'a')),
        b'A'..=b'Z' => Some(u64::from(byte - b'A') + 26),
        b'0'..=b'9' => Some(u64::from(byte - b'0') + 52),
        _ => None,
    }
}

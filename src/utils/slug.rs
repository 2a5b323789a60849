//! Vanity slug generation and validation.
//!
//! Slugs are short random strings drawn from a fixed keyspace with a
//! cryptographically secure generator, then normalized to the registry's
//! allowed character set.

use crate::error::AppError;
use rand::Rng;
use serde_json::json;

/// Characters a generated slug is drawn from. The `!` survives the draw but
/// not normalization, mildly biasing output toward shorter slugs.
pub const KEYSPACE: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ-_$.!*()";

/// Characters a stored slug may contain.
pub const ALLOWED: &str = "-_$.*()";

/// Default length of a freshly drawn slug, before normalization.
pub const DEFAULT_SLUG_LENGTH: usize = 8;

/// Maximum stored slug length.
pub const MAX_SLUG_LENGTH: usize = 20;

fn is_allowed_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || ALLOWED.contains(c)
}

/// Draws a random slug of `length` characters from [`KEYSPACE`] and
/// normalizes it to the allowed character set.
///
/// The generator is caller-supplied so collision tests can use a seeded
/// [`rand::rngs::StdRng`]; production callers pass an OS-seeded one.
/// Normalization can shorten the result but never empties it for any
/// realistic length.
pub fn random_slug<R: Rng + ?Sized>(rng: &mut R, length: usize) -> String {
    let raw: String = (0..length)
        .map(|_| KEYSPACE[rng.random_range(0..KEYSPACE.len())] as char)
        .collect();
    normalize_slug(&raw)
}

/// Strips characters outside the allowed slug character set.
pub fn normalize_slug(raw: &str) -> String {
    raw.chars().filter(|c| is_allowed_char(*c)).collect()
}

/// Validates a slug against the registry's rules: 1-20 characters, all from
/// the allowed set.
///
/// # Errors
///
/// Returns [`AppError::Validation`] naming the offending rule.
pub fn validate_slug(slug: &str) -> Result<(), AppError> {
    if slug.is_empty() || slug.len() > MAX_SLUG_LENGTH {
        return Err(AppError::bad_request(
            "Slug must be 1-20 characters",
            json!({ "provided_length": slug.len() }),
        ));
    }

    if !slug.chars().all(is_allowed_char) {
        return Err(AppError::bad_request(
            "Slug contains characters outside [0-9a-zA-Z-_$.*()]",
            json!({ "slug": slug }),
        ));
    }

    Ok(())
}

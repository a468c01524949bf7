//! Short code generation and validation utilities.
//!
//! Codes are drawn from the 62-character alphanumeric alphabet. Generated
//! codes are 7 characters long; user-supplied codes may be 6 to 8.

use rand::Rng;
use regex::Regex;
use std::sync::LazyLock;

/// Alphabet used for generated codes: `A-Z`, `a-z`, `0-9`.
const ALPHABET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789";

/// Length of codes produced by the registry when no custom code is given.
pub const DEFAULT_CODE_LENGTH: usize = 7;

/// Accepted format for any short code, generated or custom.
pub static SHORT_CODE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9]{6,8}$").unwrap());

/// Generates a random short code of `length` characters.
///
/// Uses the thread-local RNG; each character is picked independently and
/// uniformly from [`ALPHABET`]. Uniqueness is not checked here.
///
/// # Examples
///
/// ```ignore
/// let code = generate_short_code(DEFAULT_CODE_LENGTH);
/// assert_eq!(code.len(), 7);
/// assert!(code.chars().all(|c| c.is_ascii_alphanumeric()));
/// ```
pub fn generate_short_code(length: usize) -> String {
    let mut rng = rand::rng();

    (0..length)
        .map(|_| {
            let idx = rng.random_range(0..ALPHABET.len());
            ALPHABET[idx] as char
        })
        .collect()
}

/// Returns true iff `code` is 6-8 characters from `[A-Za-z0-9]`.
pub fn is_valid_short_code(code: &str) -> bool {
    SHORT_CODE_REGEX.is_match(code)
}

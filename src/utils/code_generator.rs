//! Short code generation.
//!
//! Codes are 3 symbols drawn uniformly, with replacement, from the 62-symbol
//! alphabet `[0-9A-Za-z]`, giving 62^3 = 238,328 possible codes. Uniqueness
//! is not decided here: see
//! [`BookmarkService`](crate::application::services::BookmarkService), which
//! retries against persisted bookmarks, and the `bookmarks_short_url_key`
//! constraint, which has the final say.

use rand::Rng;

/// Number of symbols in a short code.
pub const SHORT_CODE_LENGTH: usize = 3;

/// Symbols a short code may contain.
pub const ALPHABET: &str = "0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz";

/// Size of the code space.
pub const CODE_SPACE: usize = ALPHABET.len().pow(SHORT_CODE_LENGTH as u32);

/// Generates a random short code.
///
/// # Examples
///
/// ```ignore
/// let code = generate_code();
/// assert_eq!(code.len(), 3);
/// assert!(is_valid_code(&code));
/// ```
pub fn generate_code() -> String {
    let symbols = ALPHABET.as_bytes();
    let mut rng = rand::rng();

    (0..SHORT_CODE_LENGTH)
        .map(|_| char::from(symbols[rng.random_range(0..symbols.len())]))
        .collect()
}

/// Returns true if `code` has the shape of a generated short code.
///
/// Used to reject obviously foreign paths before touching the database.
pub fn is_valid_code(code: &str) -> bool {
    code.len() == SHORT_CODE_LENGTH && code.bytes().all(|b| ALPHABET.as_bytes().contains(&b))
}

//! Bookmark URL validation.
//!
//! URLs are stored exactly as submitted, so validation never rewrites the
//! input; it only decides whether it is acceptable.

use url::Url;

/// Longest URL accepted, in bytes. Keeps `bookmarks_url_key` entries well
/// under the btree row limit.
pub const MAX_URL_LENGTH: usize = 2048;

/// Reasons a URL is rejected.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum UrlValidationError {
    #[error("Invalid URL format: {0}")]
    InvalidFormat(String),

    #[error("Only HTTP and HTTPS protocols are allowed")]
    UnsupportedProtocol,

    #[error("URL must include a host")]
    MissingHost,

    #[error("URL must not contain surrounding whitespace")]
    SurroundingWhitespace,

    #[error("URL is longer than {MAX_URL_LENGTH} bytes")]
    TooLong,
}

/// Checks that `input` is a well-formed absolute HTTP(S) URL with a host.
///
/// # Errors
///
/// - [`UrlValidationError::InvalidFormat`] for anything the URL parser rejects
/// - [`UrlValidationError::UnsupportedProtocol`] for schemes such as
///   `javascript:`, `ftp:`, or `file:`
/// - [`UrlValidationError::MissingHost`] when no host is present
/// - [`UrlValidationError::SurroundingWhitespace`] for leading or trailing
///   whitespace, which the parser would otherwise strip silently
/// - [`UrlValidationError::TooLong`] beyond [`MAX_URL_LENGTH`] bytes
pub fn validate_url(input: &str) -> Result<(), UrlValidationError> {
    if input.len() > MAX_URL_LENGTH {
        return Err(UrlValidationError::TooLong);
    }

    if input.trim() != input {
        return Err(UrlValidationError::SurroundingWhitespace);
    }

    let url = Url::parse(input).map_err(|e| UrlValidationError::InvalidFormat(e.to_string()))?;

    match url.scheme() {
        "http" | "https" => {}
        _ => return Err(UrlValidationError::UnsupportedProtocol),
    }

    match url.host_str() {
        Some(host) if !host.is_empty() => Ok(()),
        _ => Err(UrlValidationError::MissingHost),
    }
}

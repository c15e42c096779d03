//! Long URL validation.
//!
//! A long URL is accepted when it parses as an absolute URI with a scheme and
//! a non-empty authority. The submitted text is kept as-is (minus surrounding
//! whitespace) so a redirect sends the client exactly where it asked to go.

use url::Url;

/// Errors that can occur while validating a long URL.
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum UrlValidationError {
    #[error("Please provide a URL")]
    Empty,

    #[error("Invalid URL format provided")]
    InvalidFormat(String),

    #[error("Invalid URL format provided")]
    MissingAuthority,
}

/// Validates `input` and returns the trimmed URL to store.
///
/// # Errors
///
/// Returns [`UrlValidationError::Empty`] for blank input.
/// Returns [`UrlValidationError::InvalidFormat`] if the text is not an absolute URI.
/// Returns [`UrlValidationError::MissingAuthority`] for URIs without a host,
/// such as `mailto:` or `data:` links.
///
/// # Examples
///
/// ```ignore
/// assert_eq!(validate_long_url(" https://example.com/a ").unwrap(), "https://example.com/a");
/// assert!(validate_long_url("not-a-url").is_err());
/// ```
pub fn validate_long_url(input: &str) -> Result<String, UrlValidationError> {
    let trimmed = input.trim();

    if trimmed.is_empty() {
        return Err(UrlValidationError::Empty);
    }

    // The parser silently drops embedded tabs and newlines; the stored text
    // must survive as a Location header.
    if trimmed.chars().any(char::is_control) {
        return Err(UrlValidationError::InvalidFormat(
            "control character in URL".to_string(),
        ));
    }

    let url = Url::parse(trimmed).map_err(|e| UrlValidationError::InvalidFormat(e.to_string()))?;

    match url.host_str() {
        Some(host) if !host.is_empty() => Ok(trimmed.to_string()),
        _ => Err(UrlValidationError::MissingAuthority),
    }
}

//! Format checks and normalization for the settings form fields.

use url::Url;

/// Longest header or secret the backend accepts.
pub const MAX_SHORT_TEXT_CHARS: usize = 255;

const REQUIRED_SCHEME: &str = "https";

/// Whether `value` is an absolute `https` URL without a trailing slash.
#[must_use]
pub fn validate_address(value: &str) -> bool {
    let trimmed = value.trim();
    if trimmed.is_empty() || trimmed.ends_with('/') {
        return false;
    }
    Url::parse(trimmed).is_ok_and(|url| {
        url.scheme() == REQUIRED_SCHEME && url.host_str().is_some_and(|host| !host.is_empty())
    })
}

/// Whether `value` is non-blank and short enough for a header or secret.
#[must_use]
pub fn validate_short_text(value: &str) -> bool {
    let trimmed = value.trim();
    !trimmed.is_empty() && trimmed.chars().count() <= MAX_SHORT_TEXT_CHARS
}

/// Trim whitespace and trailing slashes from an address as typed.
#[must_use]
pub fn normalize_address(value: &str) -> String {
    value.trim().trim_end_matches('/').to_string()
}

/// Normalize an address for storage, defaulting to `https://` when no scheme is given.
#[must_use]
pub fn normalize_address_for_save(value: &str) -> String {
    let normalized = normalize_address(value);
    if normalized.is_empty() || normalized.contains("://") {
        return normalized;
    }
    format!("{REQUIRED_SCHEME}://{normalized}")
}

//! Build-time configuration for the plugin UI.
//!
//! # Design
//! - Values come from the build environment (`option_env!`), not the page.
//! - A bad demo-duration value falls back to the default instead of failing boot.

use crate::error::ConfigError;
use tracing::warn;
use url::Url;

/// Days a demo connection stays usable when nothing else is configured.
pub const DEFAULT_DEMO_EXPIRATION_DAYS: u32 = 30;

/// Log filter used when none is configured.
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Environment variable holding the backend base URL.
pub const BACKEND_URL_ENV: &str = "DOCBOARD_BACKEND_URL";

/// Environment variable holding the demo duration in days.
pub const DEMO_EXPIRATION_DAYS_ENV: &str = "DOCBOARD_DEMO_EXPIRATION_DAYS";

/// Environment variable holding the log filter.
pub const LOG_LEVEL_ENV: &str = "DOCBOARD_LOG";

/// Resolved UI configuration.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UiConfig {
    /// Backend base URL without a trailing slash.
    pub backend_url: String,
    /// Demo duration in days.
    pub demo_expiration_days: u32,
    /// Tracing filter directive.
    pub log_level: String,
}

impl UiConfig {
    /// Build a configuration from raw values.
    ///
    /// # Errors
    /// Returns an error when the backend URL is empty or not an absolute URL.
    pub fn from_values(
        backend_url: &str,
        demo_expiration_days: Option<&str>,
        log_level: Option<&str>,
    ) -> Result<Self, ConfigError> {
        let trimmed = backend_url.trim().trim_end_matches('/');
        if trimmed.is_empty() {
            return Err(ConfigError::MissingBackendUrl);
        }
        Url::parse(trimmed).map_err(|err| ConfigError::InvalidBackendUrl {
            value: trimmed.to_string(),
            reason: err.to_string(),
        })?;

        Ok(Self {
            backend_url: trimmed.to_string(),
            demo_expiration_days: parse_demo_days(demo_expiration_days),
            log_level: log_level
                .map(str::trim)
                .filter(|level| !level.is_empty())
                .unwrap_or(DEFAULT_LOG_LEVEL)
                .to_string(),
        })
    }

    /// Build a configuration from values baked in at compile time, using
    /// `fallback_url` when no backend URL was provided.
    ///
    /// # Errors
    /// Returns an error when the resulting backend URL is invalid.
    pub fn from_build_env(fallback_url: &str) -> Result<Self, ConfigError> {
        Self::from_values(
            option_env!("DOCBOARD_BACKEND_URL").unwrap_or(fallback_url),
            option_env!("DOCBOARD_DEMO_EXPIRATION_DAYS"),
            option_env!("DOCBOARD_LOG"),
        )
    }

    /// Absolute URL for a backend-relative path such as `api/settings`.
    #[must_use]
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.backend_url, path.trim_start_matches('/'))
    }
}

fn parse_demo_days(raw: Option<&str>) -> u32 {
    let Some(raw) = raw.map(str::trim).filter(|value| !value.is_empty()) else {
        return DEFAULT_DEMO_EXPIRATION_DAYS;
    };
    raw.parse::<u32>().ok().filter(|days| *days > 0).unwrap_or_else(|| {
        warn!(
            variable = DEMO_EXPIRATION_DAYS_ENV,
            value = raw,
            fallback = DEFAULT_DEMO_EXPIRATION_DAYS,
            "invalid demo expiration; using default"
        );
        DEFAULT_DEMO_EXPIRATION_DAYS
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_apply_when_optional_values_missing() {
        let config = UiConfig::from_values("https://api.example.com/", None, None)
            .expect("valid config");
        assert_eq!(config.backend_url, "https://api.example.com");
        assert_eq!(config.demo_expiration_days, DEFAULT_DEMO_EXPIRATION_DAYS);
        assert_eq!(config.log_level, DEFAULT_LOG_LEVEL);
    }

    #[test]
    fn invalid_demo_days_fall_back() {
        let config = UiConfig::from_values("https://api.example.com", Some("soon"), Some("debug"))
            .expect("valid config");
        assert_eq!(config.demo_expiration_days, DEFAULT_DEMO_EXPIRATION_DAYS);
        assert_eq!(config.log_level, "debug");

        let config = UiConfig::from_values("https://api.example.com", Some(" 7 "), None)
            .expect("valid config");
        assert_eq!(config.demo_expiration_days, 7);

        let config = UiConfig::from_values("https://api.example.com", Some("0"), None)
            .expect("valid config");
        assert_eq!(config.demo_expiration_days, DEFAULT_DEMO_EXPIRATION_DAYS);
    }

    #[test]
    fn backend_url_is_required_and_parsed() {
        assert_eq!(
            UiConfig::from_values("  ", None, None),
            Err(ConfigError::MissingBackendUrl)
        );
        assert!(matches!(
            UiConfig::from_values("not a url", None, None),
            Err(ConfigError::InvalidBackendUrl { .. })
        ));
    }

    #[test]
    fn endpoint_joins_paths() {
        let config = UiConfig::from_values("https://api.example.com", None, None)
            .expect("valid config");
        assert_eq!(
            config.endpoint("api/settings"),
            "https://api.example.com/api/settings"
        );
        assert_eq!(
            config.endpoint("/api/authorize"),
            "https://api.example.com/api/authorize"
        );
    }
}

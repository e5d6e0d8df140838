#![forbid(unsafe_code)]
#![warn(
    unreachable_pub,
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    rustdoc::broken_intra_doc_links,
    rustdoc::bare_urls,
    missing_docs
)]
#![allow(clippy::module_name_repetitions)]
//! Shared HTTP DTOs for the docboard settings backend.
//!
//! The backend owns these shapes; the UI only decodes what it reads and
//! encodes what it posts. Keep field names aligned with the wire format.
use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// Header carrying the host-issued signature token.
pub const SIGNATURE_HEADER: &str = "x-miro-signature";

/// Relative path of the settings resource.
pub const SETTINGS_PATH: &str = "api/settings";

/// Relative path of the token-issuing resource.
pub const AUTHORIZE_PATH: &str = "api/authorize";

/// Demo-mode block attached to a board's settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct DemoSettings {
    /// Whether demo mode is switched on for the board.
    #[serde(default)]
    pub enabled: bool,
    /// When demo mode was first switched on.
    #[serde(default, deserialize_with = "deserialize_optional_timestamp")]
    pub started: Option<DateTime<Utc>>,
}

/// Settings record returned by `GET api/settings`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct SettingsResponse {
    /// Document server address.
    #[serde(default)]
    pub address: String,
    /// Authorization header name used by the document server.
    #[serde(default)]
    pub header: String,
    /// Shared secret for the document server.
    #[serde(default)]
    pub secret: String,
    /// Demo-mode state.
    #[serde(default)]
    pub demo: DemoSettings,
}

impl SettingsResponse {
    /// Settings shape used when the board has nothing configured yet.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Whether address, header and secret are all present.
    #[must_use]
    pub fn has_credentials(&self) -> bool {
        !self.address.is_empty() && !self.header.is_empty() && !self.secret.is_empty()
    }
}

/// Settings values submitted by the form, before the board id is attached.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct SettingsRequest {
    /// Document server address.
    pub address: String,
    /// Authorization header name.
    pub header: String,
    /// Shared secret.
    pub secret: String,
    /// Whether demo mode is requested.
    pub demo: bool,
}

/// Body posted to `POST api/settings`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SaveSettingsBody {
    /// Board the settings belong to.
    pub board_id: String,
    /// Document server address.
    pub address: String,
    /// Authorization header name.
    pub header: String,
    /// Shared secret.
    pub secret: String,
    /// Whether demo mode is requested.
    pub demo: bool,
}

impl SaveSettingsBody {
    /// Attach a board id to a settings request.
    #[must_use]
    pub fn new(board_id: impl Into<String>, request: SettingsRequest) -> Self {
        Self {
            board_id: board_id.into(),
            address: request.address,
            header: request.header,
            secret: request.secret,
            demo: request.demo,
        }
    }
}

/// Error document returned by the backend on rejected saves.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ErrorBody {
    /// Translation key or message describing the failure.
    #[serde(default)]
    pub error: Option<String>,
}

/// Token issued by `GET api/authorize`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AuthorizationResponse {
    /// Bearer token for follow-up calls.
    pub token: String,
    /// Expiry as seconds since the Unix epoch.
    #[serde(rename = "expiresAt", alias = "expires_at")]
    pub expires_at: i64,
}

fn deserialize_optional_timestamp<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(value) => DateTime::parse_from_rfc3339(value)
            .map(|parsed| Some(parsed.with_timezone(&Utc)))
            .map_err(serde::de::Error::custom),
    }
}

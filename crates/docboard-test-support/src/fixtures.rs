//! Canned payloads, instants, and test logging.

use chrono::{DateTime, TimeZone, Utc};
use docboard_api_models::{DemoSettings, SettingsResponse};
use docboard_core::ports::HttpResponse;
use serde::Serialize;

/// Board id reported by [`crate::mocks::FakeHost`] by default.
pub const BOARD_ID: &str = "uXjVOfjkmAk=";

/// Signature token reported by [`crate::mocks::FakeHost`] by default.
pub const ID_TOKEN: &str = "signed.jwt.token";

/// Backend base URL used by suites.
pub const BASE_URL: &str = "https://backend.example.com";

/// Fixed "now" for deterministic suites: 2025-03-15T12:00:00Z.
#[must_use]
pub fn fixed_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 3, 15, 12, 0, 0)
        .single()
        .unwrap_or(DateTime::UNIX_EPOCH)
}

/// Settings with a complete credential triple and no demo.
#[must_use]
pub fn credentials() -> SettingsResponse {
    SettingsResponse {
        address: "https://docs.example.com".into(),
        header: "Authorization".into(),
        secret: "s3cret".into(),
        demo: DemoSettings::default(),
    }
}

/// Demo-only settings started at `started`.
#[must_use]
pub fn demo_started(started: DateTime<Utc>) -> SettingsResponse {
    SettingsResponse {
        demo: DemoSettings {
            enabled: true,
            started: Some(started),
        },
        ..SettingsResponse::empty()
    }
}

/// Response with `body` serialized as JSON.
#[must_use]
pub fn json_response(status: u16, body: &impl Serialize) -> HttpResponse {
    HttpResponse::new(status, serde_json::to_string(body).unwrap_or_default())
}

/// Response with an empty body.
#[must_use]
pub fn status(status: u16) -> HttpResponse {
    HttpResponse::new(status, "")
}

/// Route `tracing` output to the test harness. Safe to call repeatedly.
pub fn init_test_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_env_filter("debug")
        .try_init();
}

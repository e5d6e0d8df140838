//! Which notice the home page shows.

use docboard_core::authorization::ApplicationState;
use docboard_core::settings::SettingsState;

/// Home page content variant.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HomeNotice {
    /// First authorization check still running.
    Loading,
    /// The user may not use the plugin on this board.
    NoAccess,
    /// The backend stopped answering.
    RetriesExhausted,
    /// Nothing usable is configured yet.
    NotConfigured,
    /// Show the searchbar and documents.
    Documents,
}

impl HomeNotice {
    /// Translation key for the notice text, if any.
    #[must_use]
    pub const fn message_key(self) -> Option<&'static str> {
        match self {
            Self::NoAccess => Some("home.no_access"),
            Self::RetriesExhausted => Some("home.retries_exhausted"),
            Self::NotConfigured => Some("home.not_configured"),
            Self::Loading | Self::Documents => None,
        }
    }
}

/// Pick the home notice for the mirrored store state.
#[must_use]
pub const fn select_home_notice(app: &ApplicationState, settings: &SettingsState) -> HomeNotice {
    if !app.initialized || app.loading {
        HomeNotice::Loading
    } else if !app.authorized {
        HomeNotice::NoAccess
    } else if app.retries_exhausted {
        HomeNotice::RetriesExhausted
    } else if !settings.has_settings {
        HomeNotice::NotConfigured
    } else {
        HomeNotice::Documents
    }
}

/// Whether the settings link is offered.
#[must_use]
pub const fn show_settings_link(app: &ApplicationState) -> bool {
    app.initialized && app.authorized && app.admin
}

//! Application-level authorization state and navigation decisions.

use crate::authorization::api::AuthorizationApi;
use crate::error::ApiError;
use crate::events::{SubscriptionId, Subscribers};
use crate::ports::Clock;
use crate::settings::SettingsStore;
use std::cell::RefCell;
use std::rc::Rc;
use tracing::{debug, info};

/// Seconds shaved off a token's expiry so it is renewed early.
pub const TOKEN_EXPIRY_SKEW_SECS: i64 = 50;

/// Remaining lifetime at or below which a token is renewed.
pub const TOKEN_REFRESH_WINDOW_MS: i64 = 100;

/// Where the plugin should send the user after an authorization check.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NavigationTarget {
    /// Document list.
    Home,
    /// Settings form.
    Settings,
}

impl NavigationTarget {
    /// Router path for the target.
    #[must_use]
    pub const fn path(self) -> &'static str {
        match self {
            Self::Home => "/",
            Self::Settings => "/settings",
        }
    }
}

/// What the current user may do, derived from a settings load.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AccessLevel {
    /// The user may use the plugin.
    pub authorized: bool,
    /// The user may change settings.
    pub admin: bool,
    /// The backend kept failing and gave up.
    pub retries_exhausted: bool,
}

impl AccessLevel {
    /// Classify the outcome of a settings load.
    #[must_use]
    pub const fn classify(result: Result<(), &ApiError>) -> Self {
        let (authorized, admin, retries_exhausted) = match result {
            Ok(()) => (true, true, false),
            Err(ApiError::NotAuthorized) => (false, false, false),
            Err(ApiError::AccessDenied) => (true, false, false),
            Err(ApiError::MaxRetriesExceeded) => (true, false, true),
            Err(_) => (true, true, false),
        };
        Self {
            authorized,
            admin,
            retries_exhausted,
        }
    }
}

/// Authorization session for the page lifetime.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ApplicationState {
    /// The first authorization check has completed.
    pub initialized: bool,
    /// An authorization check is in flight.
    pub loading: bool,
    /// The user may use the plugin.
    pub authorized: bool,
    /// The user may change settings.
    pub admin: bool,
    /// Settings could not be loaded after every retry.
    pub retries_exhausted: bool,
    /// A backend token is held.
    pub has_token: bool,
    /// Backend token, when held.
    pub auth_token: Option<String>,
    /// Token expiry in seconds since the epoch, already skewed early.
    pub token_expires_at: Option<i64>,
}

impl ApplicationState {
    fn apply(&mut self, access: AccessLevel) {
        self.authorized = access.authorized;
        self.admin = access.admin;
        self.retries_exhausted = access.retries_exhausted;
    }
}

/// Runs authorization checks against the settings store and token endpoint.
pub struct ApplicationStore {
    settings: Rc<SettingsStore>,
    api: Rc<dyn AuthorizationApi>,
    clock: Rc<dyn Clock>,
    state: RefCell<ApplicationState>,
    subscribers: Subscribers<ApplicationState>,
}

impl ApplicationStore {
    /// Create an uninitialized store.
    pub fn new(
        settings: Rc<SettingsStore>,
        api: Rc<dyn AuthorizationApi>,
        clock: Rc<dyn Clock>,
    ) -> Self {
        Self {
            settings,
            api,
            clock,
            state: RefCell::new(ApplicationState::default()),
            subscribers: Subscribers::default(),
        }
    }

    /// Current state.
    #[must_use]
    pub fn snapshot(&self) -> ApplicationState {
        self.state.borrow().clone()
    }

    /// Observe every state change.
    pub fn subscribe(&self, listener: impl Fn(&ApplicationState) + 'static) -> SubscriptionId {
        self.subscribers.subscribe(listener)
    }

    /// Stop observing.
    pub fn unsubscribe(&self, id: SubscriptionId) {
        self.subscribers.unsubscribe(id);
    }

    /// Full authorization check on boot: load settings, classify, and pick a page.
    ///
    /// Admins of boards without usable settings go to the settings form;
    /// everyone else goes home.
    pub async fn reload_authorization(&self) -> NavigationTarget {
        self.update(|state| {
            state.loading = true;
            state.authorized = false;
            state.admin = false;
            state.retries_exhausted = false;
        });

        let result = self.settings.initialize_settings().await;
        let access = AccessLevel::classify(result.as_ref().map(|_| ()));
        let has_settings = self.settings.snapshot().has_settings;
        let target = if !has_settings && access.admin {
            NavigationTarget::Settings
        } else {
            NavigationTarget::Home
        };

        self.update(|state| {
            state.apply(access);
            state.loading = false;
            state.initialized = true;
        });
        info!(
            authorized = access.authorized,
            admin = access.admin,
            has_settings,
            route = target.path(),
            "authorization reloaded"
        );
        target
    }

    /// Re-run the settings load and classification without navigating.
    pub async fn refresh_authorization(&self) {
        self.update(|state| state.retries_exhausted = false);
        let result = self.settings.initialize_settings().await;
        let access = AccessLevel::classify(result.as_ref().map(|_| ()));
        self.update(|state| state.apply(access));
        debug!(authorized = access.authorized, admin = access.admin, "authorization refreshed");
    }

    /// Fetch a backend token. Failure clears any held token.
    pub async fn authorize(&self) {
        self.update(|state| {
            state.has_token = false;
            state.retries_exhausted = false;
            state.auth_token = None;
        });

        match self.api.authorize().await {
            Ok(authorization) => self.update(|state| {
                state.has_token = true;
                state.token_expires_at =
                    Some(authorization.expires_at.saturating_sub(TOKEN_EXPIRY_SKEW_SECS));
                state.auth_token = Some(authorization.token);
            }),
            Err(err) => {
                debug!(error = %err, "token request failed");
                let access = AccessLevel::classify(Err(&err));
                self.update(|state| {
                    state.apply(access);
                    state.has_token = false;
                    state.token_expires_at = None;
                    state.auth_token = None;
                });
            }
        }
    }

    /// Whether a new token should be fetched before the next backend call.
    #[must_use]
    pub fn should_refresh_token(&self) -> bool {
        let state = self.state.borrow();
        match (state.has_token, state.token_expires_at) {
            (true, Some(expires_at)) => {
                expires_at
                    .saturating_mul(1000)
                    .saturating_sub(self.clock.now_millis())
                    <= TOKEN_REFRESH_WINDOW_MS
            }
            _ => true,
        }
    }

    /// Held backend token.
    #[must_use]
    pub fn auth_token(&self) -> Option<String> {
        self.state.borrow().auth_token.clone()
    }

    fn update(&self, mutate: impl FnOnce(&mut ApplicationState)) {
        let snapshot = {
            let mut state = self.state.borrow_mut();
            mutate(&mut state);
            state.clone()
        };
        self.subscribers.notify(&snapshot);
    }
}

//! Settings state and the store that loads and saves it.

use crate::error::{ACCESS_DENIED_MESSAGE, ApiError};
use crate::events::{SubscriptionId, Subscribers};
use crate::ports::Clock;
use crate::settings::api::SettingsApi;
use crate::validate::normalize_address_for_save;
use chrono::{DateTime, TimeDelta, Utc};
use docboard_api_models::{SettingsRequest, SettingsResponse};
use std::cell::RefCell;
use std::rc::Rc;
use tracing::{debug, info, warn};

/// Display format for the demo expiry date.
pub const DEMO_DATE_FORMAT: &str = "%d.%m.%Y";

/// Snapshot of the settings form and what the backend last returned.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SettingsState {
    /// Document server address as edited.
    pub address: String,
    /// Authorization header name as edited.
    pub header: String,
    /// Shared secret as edited.
    pub secret: String,
    /// Demo server toggle as edited.
    pub demo: bool,
    /// When the demo period began, if ever.
    pub demo_started: Option<DateTime<Utc>>,
    /// Backend holds a complete address/header/secret triple.
    pub persisted_credentials: bool,
    /// The board can open documents (own credentials or a live demo).
    pub has_settings: bool,
    /// A load or save is in flight.
    pub loading: bool,
    /// User-facing error from the last load or save.
    pub error: Option<String>,
    /// Address when the form was opened.
    pub original_address: String,
    /// Header when the form was opened.
    pub original_header: String,
    /// Secret when the form was opened.
    pub original_secret: String,
    /// Demo toggle when the form was opened.
    pub original_demo: bool,
}

impl SettingsState {
    /// Whether any tracked field differs from its snapshot.
    #[must_use]
    pub fn has_unsaved_changes(&self) -> bool {
        self.address != self.original_address
            || self.header != self.original_header
            || self.secret != self.original_secret
            || self.demo != self.original_demo
    }

    /// Snapshot the tracked fields.
    pub fn save_original_values(&mut self) {
        self.original_address.clone_from(&self.address);
        self.original_header.clone_from(&self.header);
        self.original_secret.clone_from(&self.secret);
        self.original_demo = self.demo;
    }

    /// Restore the tracked fields from the snapshot.
    pub fn revert_to_original_values(&mut self) {
        self.address.clone_from(&self.original_address);
        self.header.clone_from(&self.original_header);
        self.secret.clone_from(&self.original_secret);
        self.demo = self.original_demo;
    }

    /// End of the demo period, when one has started.
    #[must_use]
    pub fn demo_expires_at(&self, expiration_days: u32) -> Option<DateTime<Utc>> {
        let started = self.demo_started?;
        started.checked_add_signed(TimeDelta::days(i64::from(expiration_days)))
    }

    /// Whether the demo period has run out. A demo that never started has not.
    #[must_use]
    pub fn is_demo_expired(&self, now: DateTime<Utc>, expiration_days: u32) -> bool {
        self.demo_expires_at(expiration_days)
            .is_some_and(|expires_at| now > expires_at)
    }

    /// Whether any of address/header/secret holds non-blank text.
    #[must_use]
    pub fn has_inputs(&self) -> bool {
        [&self.address, &self.header, &self.secret]
            .iter()
            .any(|value| !value.trim().is_empty())
    }

    fn apply_loaded(&mut self, settings: &SettingsResponse) {
        self.address.clone_from(&settings.address);
        self.header.clone_from(&settings.header);
        self.secret.clone_from(&settings.secret);
        self.demo = settings.demo.enabled;
        self.demo_started = settings.demo.started;
        self.persisted_credentials = settings.has_credentials();
        self.error = None;
        self.save_original_values();
    }

    fn apply_saved(&mut self, request: &SettingsRequest, now: DateTime<Utc>) {
        self.address.clone_from(&request.address);
        self.header.clone_from(&request.header);
        self.secret.clone_from(&request.secret);
        self.demo = request.demo;
        self.persisted_credentials =
            !request.address.is_empty() && !request.header.is_empty() && !request.secret.is_empty();
        if request.demo && self.demo_started.is_none() {
            self.demo_started = Some(now);
        }
    }
}

/// Page-lifetime settings store shared by the form and the authorization flow.
pub struct SettingsStore {
    api: Rc<dyn SettingsApi>,
    clock: Rc<dyn Clock>,
    demo_expiration_days: u32,
    state: RefCell<SettingsState>,
    subscribers: Subscribers<SettingsState>,
}

impl SettingsStore {
    /// Create an empty store.
    pub fn new(api: Rc<dyn SettingsApi>, clock: Rc<dyn Clock>, demo_expiration_days: u32) -> Self {
        Self {
            api,
            clock,
            demo_expiration_days,
            state: RefCell::new(SettingsState::default()),
            subscribers: Subscribers::default(),
        }
    }

    /// Current state.
    #[must_use]
    pub fn snapshot(&self) -> SettingsState {
        self.state.borrow().clone()
    }

    /// Days a demo stays available after it starts.
    #[must_use]
    pub const fn demo_expiration_days(&self) -> u32 {
        self.demo_expiration_days
    }

    /// Current time according to the store's clock.
    #[must_use]
    pub fn now(&self) -> DateTime<Utc> {
        self.clock.now()
    }

    /// Observe every state change.
    pub fn subscribe(&self, listener: impl Fn(&SettingsState) + 'static) -> SubscriptionId {
        self.subscribers.subscribe(listener)
    }

    /// Stop observing.
    pub fn unsubscribe(&self, id: SubscriptionId) {
        self.subscribers.unsubscribe(id);
    }

    /// Replace the address.
    pub fn set_address(&self, value: impl Into<String>) {
        let value = value.into();
        self.update(|state| state.address = value);
    }

    /// Replace the header.
    pub fn set_header(&self, value: impl Into<String>) {
        let value = value.into();
        self.update(|state| state.header = value);
    }

    /// Replace the secret.
    pub fn set_secret(&self, value: impl Into<String>) {
        let value = value.into();
        self.update(|state| state.secret = value);
    }

    /// Toggle the demo server.
    pub fn set_demo(&self, value: bool) {
        self.update(|state| state.demo = value);
    }

    /// Snapshot the tracked fields.
    pub fn save_original_values(&self) {
        self.update(SettingsState::save_original_values);
    }

    /// Restore the tracked fields from the snapshot.
    pub fn revert_to_original_values(&self) {
        self.update(SettingsState::revert_to_original_values);
    }

    /// Whether any tracked field differs from its snapshot.
    #[must_use]
    pub fn has_unsaved_changes(&self) -> bool {
        self.state.borrow().has_unsaved_changes()
    }

    /// Whether the demo period has run out.
    #[must_use]
    pub fn is_demo_expired(&self) -> bool {
        self.state
            .borrow()
            .is_demo_expired(self.clock.now(), self.demo_expiration_days)
    }

    /// Last day of the demo, formatted `dd.mm.yyyy`, once a demo has started.
    #[must_use]
    pub fn demo_available_until(&self) -> Option<String> {
        self.state
            .borrow()
            .demo_expires_at(self.demo_expiration_days)
            .map(|expires_at| expires_at.format(DEMO_DATE_FORMAT).to_string())
    }

    /// Load settings from the backend and snapshot them as the originals.
    ///
    /// # Errors
    ///
    /// Returns the client's error after recording it in the state.
    pub async fn initialize_settings(&self) -> Result<(), ApiError> {
        self.update(|state| {
            state.loading = true;
            state.error = None;
        });

        let result = self.api.fetch_settings().await;
        let now = self.clock.now();
        let days = self.demo_expiration_days;
        self.update(|state| {
            match &result {
                Ok(settings) => state.apply_loaded(settings),
                Err(err) => {
                    state.error = err
                        .is_access_related()
                        .then(|| ACCESS_DENIED_MESSAGE.to_string());
                }
            }
            state.loading = false;
            state.has_settings = state.persisted_credentials || !state.is_demo_expired(now, days);
        });

        match result {
            Ok(_) => {
                debug!("settings loaded");
                Ok(())
            }
            Err(err) => {
                warn!(error = %err, "settings load failed");
                Err(err)
            }
        }
    }

    /// Persist the edited settings.
    ///
    /// Without the demo, all three credentials are required; an incomplete
    /// form is skipped without contacting the backend.
    ///
    /// # Errors
    ///
    /// Returns the client's error after recording it in the state.
    pub async fn save_settings(&self) -> Result<(), ApiError> {
        let request = {
            let state = self.state.borrow();
            if !state.demo
                && (state.address.is_empty() || state.header.is_empty() || state.secret.is_empty())
            {
                debug!("skipping settings save with incomplete credentials");
                return Ok(());
            }
            SettingsRequest {
                address: normalize_address_for_save(&state.address),
                header: state.header.clone(),
                secret: state.secret.clone(),
                demo: state.demo,
            }
        };

        self.update(|state| {
            state.loading = true;
            state.error = None;
        });

        match self.api.save_settings(request.clone()).await {
            Ok(()) => {
                let now = self.clock.now();
                self.update(|state| {
                    state.apply_saved(&request, now);
                    state.loading = false;
                });
                info!(demo = request.demo, "settings saved");
                Ok(())
            }
            Err(err) => {
                self.update(|state| {
                    state.loading = false;
                    state.error = matches!(err, ApiError::AccessDenied)
                        .then(|| ACCESS_DENIED_MESSAGE.to_string());
                });
                warn!(error = %err, "settings save failed");
                Err(err)
            }
        }
    }

    fn update(&self, mutate: impl FnOnce(&mut SettingsState)) {
        let snapshot = {
            let mut state = self.state.borrow_mut();
            mutate(&mut state);
            state.clone()
        };
        self.subscribers.notify(&snapshot);
    }
}

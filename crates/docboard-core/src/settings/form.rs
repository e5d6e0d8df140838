//! Settings form controller: field handling, validation, and submit.
//!
//! # Design
//! - Field values live in the [`SettingsStore`]; this controller only holds
//!   per-view state (error messages, submitting, whether a save completed).
//! - The view forwards raw DOM events and renders from [`SettingsForm::flags`].

use crate::authorization::{ApplicationStore, NavigationTarget};
use crate::events::{DocumentEvents, SubscriptionId, Subscribers};
use crate::i18n::TranslationBundle;
use crate::ports::BoardHost;
use crate::sanitize::{sanitize_form_input, sanitize_url};
use crate::settings::store::SettingsStore;
use crate::validate::{normalize_address, validate_address, validate_short_text};
use std::cell::RefCell;
use std::rc::Rc;
use tracing::{debug, warn};

const ADDRESS_ERROR_KEY: &str = "features.settings.form.errors.address_required";
const HEADER_ERROR_KEY: &str = "features.settings.form.errors.header_required";
const SECRET_ERROR_KEY: &str = "features.settings.form.errors.secret_required";

/// Translated validation messages per field.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FieldErrors {
    /// Address message.
    pub address: Option<String>,
    /// Header message.
    pub header: Option<String>,
    /// Secret message.
    pub secret: Option<String>,
}

impl FieldErrors {
    /// Whether no field has a message.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.address.is_none() && self.header.is_none() && self.secret.is_none()
    }
}

/// View-local form state.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FormState {
    /// Messages shown under each field.
    pub errors: FieldErrors,
    /// A submit is in progress.
    pub submitting: bool,
    /// A save completed while the form was mounted.
    pub has_saved: bool,
}

/// Derived rendering flags.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[allow(clippy::struct_excessive_bools)]
pub struct FormFlags {
    /// Credentials must be filled in (no live demo).
    pub fields_required: bool,
    /// Credential inputs are read-only.
    pub fields_disabled: bool,
    /// Save button is disabled.
    pub save_disabled: bool,
    /// Demo checkbox is disabled.
    pub demo_checkbox_disabled: bool,
    /// Demo period is over; the checkbox is replaced by a notice.
    pub demo_expired: bool,
    /// Any credential field holds text.
    pub has_inputs: bool,
}

/// Result of a submit attempt.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Validation failed; messages were recorded on the fields.
    Invalid,
    /// Saved; the view should navigate to the target.
    Saved(NavigationTarget),
    /// The backend refused; the translated message was shown by the host.
    Failed(String),
}

/// Controller behind the settings form view.
pub struct SettingsForm {
    settings: Rc<SettingsStore>,
    application: Rc<ApplicationStore>,
    events: Rc<DocumentEvents>,
    host: Rc<dyn BoardHost>,
    translations: RefCell<TranslationBundle>,
    state: RefCell<FormState>,
    subscribers: Subscribers<FormState>,
}

impl SettingsForm {
    /// Build a controller for one mounted form.
    pub fn new(
        settings: Rc<SettingsStore>,
        application: Rc<ApplicationStore>,
        events: Rc<DocumentEvents>,
        host: Rc<dyn BoardHost>,
        translations: TranslationBundle,
    ) -> Self {
        Self {
            settings,
            application,
            events,
            host,
            translations: RefCell::new(translations),
            state: RefCell::new(FormState::default()),
            subscribers: Subscribers::default(),
        }
    }

    /// Current view-local state.
    #[must_use]
    pub fn state(&self) -> FormState {
        self.state.borrow().clone()
    }

    /// Observe view-local state changes.
    pub fn subscribe(&self, listener: impl Fn(&FormState) + 'static) -> SubscriptionId {
        self.subscribers.subscribe(listener)
    }

    /// Stop observing.
    pub fn unsubscribe(&self, id: SubscriptionId) {
        self.subscribers.unsubscribe(id);
    }

    /// Switch the bundle used for messages. Recorded field messages are re-translated.
    pub fn set_translations(&self, translations: TranslationBundle) {
        if *self.translations.borrow() == translations {
            return;
        }
        *self.translations.borrow_mut() = translations;
        if !self.state.borrow().errors.is_empty() {
            self.validate();
        }
    }

    /// Snapshot the loaded values so leaving the form can undo edits.
    pub fn mount(&self) {
        self.settings.save_original_values();
        self.sync_demo();
    }

    /// Undo unsaved edits when the form goes away without a save.
    pub fn unmount(&self) {
        if !self.state.borrow().has_saved && self.settings.has_unsaved_changes() {
            debug!("discarding unsaved settings edits");
            self.settings.revert_to_original_values();
        }
    }

    /// Clear credentials while a live demo is selected.
    pub fn sync_demo(&self) {
        if self.settings.snapshot().demo && !self.settings.is_demo_expired() {
            self.clear_credentials();
        }
    }

    /// Address keystroke.
    pub fn input_address(&self, raw: &str) {
        self.settings.set_address(sanitize_url(raw));
    }

    /// Header keystroke.
    pub fn input_header(&self, raw: &str) {
        self.settings.set_header(sanitize_form_input(raw));
    }

    /// Secret keystroke.
    pub fn input_secret(&self, raw: &str) {
        self.settings.set_secret(sanitize_form_input(raw));
    }

    /// Address lost focus: normalize, then validate.
    pub fn blur_address(&self, raw: &str) {
        let normalized = normalize_address(&sanitize_url(raw));
        if normalized != raw {
            self.settings.set_address(normalized.clone());
        }
        let message = self.address_error(&normalized);
        self.update(|state| state.errors.address = message);
    }

    /// Header lost focus.
    pub fn blur_header(&self, raw: &str) {
        let message = self.header_error(raw);
        self.update(|state| state.errors.header = message);
    }

    /// Secret lost focus.
    pub fn blur_secret(&self, raw: &str) {
        let message = self.secret_error(raw);
        self.update(|state| state.errors.secret = message);
    }

    /// Flip the demo checkbox. Turning it on clears the credentials.
    pub fn toggle_demo(&self) {
        let enable = !self.settings.snapshot().demo;
        self.settings.set_demo(enable);
        if enable {
            self.clear_credentials();
        }
    }

    /// Whether the credentials must be filled in.
    #[must_use]
    pub fn fields_required(&self) -> bool {
        !self.settings.snapshot().demo || self.settings.is_demo_expired()
    }

    /// Rendering flags for the current store and form state.
    #[must_use]
    pub fn flags(&self) -> FormFlags {
        let settings = self.settings.snapshot();
        let submitting = self.state.borrow().submitting;
        let demo_expired = self.settings.is_demo_expired();
        let fields_required = !settings.demo || demo_expired;
        let has_inputs = settings.has_inputs();
        let has_validation_errors = !self.current_errors().is_empty();
        let busy = settings.loading || submitting;

        FormFlags {
            fields_required,
            fields_disabled: busy || (settings.demo && !demo_expired),
            save_disabled: busy
                || (fields_required && (!has_inputs || has_validation_errors))
                || (!fields_required && has_inputs),
            demo_checkbox_disabled: busy || demo_expired,
            demo_expired,
            has_inputs,
        }
    }

    /// Demo notice text: the expiry date once started, else the offer.
    #[must_use]
    pub fn demo_description(&self) -> String {
        self.settings.demo_available_until().map_or_else(
            || {
                self.translations
                    .borrow()
                    .text("features.settings.form.demo.description", "")
            },
            |date| {
                self.translations.borrow().text_with(
                    "features.settings.form.demo.available_until",
                    "",
                    &[("date", date.as_str())],
                )
            },
        )
    }

    /// Record messages for every field; `true` when all fields pass.
    pub fn validate(&self) -> bool {
        if !self.fields_required() {
            return true;
        }
        let errors = self.current_errors();
        let valid = errors.is_empty();
        self.update(|state| state.errors = errors);
        valid
    }

    /// Validate, save, notify document listeners, and refresh authorization.
    ///
    /// Backend failures are reported through the host's native notification.
    pub async fn submit(&self) -> SubmitOutcome {
        self.update(|state| state.submitting = true);
        let outcome = self.run_submit().await;
        self.update(|state| state.submitting = false);
        outcome
    }

    async fn run_submit(&self) -> SubmitOutcome {
        if !self.validate() {
            return SubmitOutcome::Invalid;
        }

        if let Err(err) = self.settings.save_settings().await {
            let message = self.translations.borrow().message(err.message_key());
            warn!(error = %err, "settings submit failed");
            self.host.show_error(&message);
            return SubmitOutcome::Failed(message);
        }

        self.update(|state| state.has_saved = true);
        self.events.emit_refresh();
        self.application.refresh_authorization().await;
        SubmitOutcome::Saved(NavigationTarget::Home)
    }

    fn current_errors(&self) -> FieldErrors {
        let settings = self.settings.snapshot();
        FieldErrors {
            address: self.address_error(&settings.address),
            header: self.header_error(&settings.header),
            secret: self.secret_error(&settings.secret),
        }
    }

    fn address_error(&self, value: &str) -> Option<String> {
        self.field_error(validate_address(value), ADDRESS_ERROR_KEY)
    }

    fn header_error(&self, value: &str) -> Option<String> {
        self.field_error(validate_short_text(value), HEADER_ERROR_KEY)
    }

    fn secret_error(&self, value: &str) -> Option<String> {
        self.field_error(validate_short_text(value), SECRET_ERROR_KEY)
    }

    fn field_error(&self, valid: bool, key: &str) -> Option<String> {
        if valid || !self.fields_required() {
            None
        } else {
            Some(self.translations.borrow().message(key))
        }
    }

    fn clear_credentials(&self) {
        self.settings.set_address("");
        self.settings.set_header("");
        self.settings.set_secret("");
        self.update(|state| state.errors = FieldErrors::default());
    }

    fn update(&self, mutate: impl FnOnce(&mut FormState)) {
        let snapshot = {
            let mut state = self.state.borrow_mut();
            mutate(&mut state);
            state.clone()
        };
        self.subscribers.notify(&snapshot);
    }
}

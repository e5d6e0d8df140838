//! Board settings: backend calls, the settings store, and the form controller.
//!
//! # Design
//! - `api` owns HTTP status policy; `store` owns derived state; `form` owns
//!   per-view validation and the submit pipeline.
//! - Only the store calls the API; views only call the store or the form.

pub mod api;
pub mod form;
pub mod store;

pub use api::SettingsApi;
pub use form::{FieldErrors, FormFlags, FormState, SettingsForm, SubmitOutcome};
pub use store::{SettingsState, SettingsStore};

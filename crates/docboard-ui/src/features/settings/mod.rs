//! Settings feature slice.
//!
//! # Design
//! - Keep settings rendering in the view module.
//! - Field handling and submit live in `docboard_core::settings::SettingsForm`.

#[cfg(target_arch = "wasm32")]
pub(crate) mod view;

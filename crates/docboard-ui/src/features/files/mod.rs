//! Files feature slice.
//!
//! # Design
//! - Debounce bookkeeping lives in `docboard_core::files`; the view owns the timer.

#[cfg(target_arch = "wasm32")]
pub(crate) mod view;

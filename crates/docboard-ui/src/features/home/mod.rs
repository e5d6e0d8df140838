//! Home page: document search plus access notices.

pub mod logic;
#[cfg(target_arch = "wasm32")]
pub(crate) mod view;

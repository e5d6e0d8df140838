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
#![allow(clippy::future_not_send)]
//! DOM-free core of the docboard board plugin.
//!
//! Everything here compiles and tests natively: input sanitization, the
//! settings/authorization stores, the backend client with its retry policy,
//! and the search debounce bookkeeping. Browser specifics (HTTP, timers, the
//! host SDK) plug in through the traits in [`ports`].

pub mod authorization;
pub mod client;
pub mod config;
pub mod error;
pub mod events;
pub mod files;
pub mod i18n;
pub mod ports;
pub mod retry;
pub mod sanitize;
pub mod settings;
pub mod validate;

pub use client::BackendClient;
pub use config::UiConfig;
pub use error::{ApiError, ConfigError, HostError, TransportError};

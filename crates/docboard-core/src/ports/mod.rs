//! Seams between the DOM-free core and the browser.
//!
//! # Design
//! - The core never touches `window`, timers, or `fetch` directly.
//! - Traits are `?Send`: everything runs on the single browser event loop.

mod clock;
mod host;
mod http;

pub use clock::Clock;
pub use host::{BoardHost, BoardInfo};
pub use http::{HttpRequest, HttpResponse, HttpTransport, Method};

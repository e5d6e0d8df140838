//! Browser adapters for the core ports.

mod clock;
mod host;
mod http;

pub(crate) use clock::BrowserClock;
pub(crate) use host::MiroHost;
pub(crate) use http::GlooTransport;

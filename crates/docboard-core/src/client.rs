//! Backend client shared by the settings and authorization features.
//!
//! # Design
//! - Create exactly one client per app boot and share it behind `Rc`.
//! - Every call asks the host for board identity and a fresh signature token.
//! - Endpoint-specific status handling lives with each feature's `api` module.

use crate::error::ApiError;
use crate::ports::{BoardHost, BoardInfo, Clock, HttpRequest, HttpTransport};
use crate::retry::RetryPolicy;
use docboard_api_models::SIGNATURE_HEADER;
use futures_util::future::try_join;
use std::rc::Rc;

const CONTENT_TYPE_HEADER: &str = "Content-Type";
const JSON_CONTENT_TYPE: &str = "application/json";

/// Authenticated client for the settings backend.
#[derive(Clone)]
pub struct BackendClient {
    base_url: String,
    host: Rc<dyn BoardHost>,
    transport: Rc<dyn HttpTransport>,
    clock: Rc<dyn Clock>,
    retry: RetryPolicy,
}

impl BackendClient {
    /// Create a client rooted at `base_url` with the default retry policy.
    pub fn new(
        base_url: impl Into<String>,
        host: Rc<dyn BoardHost>,
        transport: Rc<dyn HttpTransport>,
        clock: Rc<dyn Clock>,
    ) -> Self {
        let base_url = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            host,
            transport,
            clock,
            retry: RetryPolicy::default(),
        }
    }

    /// Override the fetch retry policy.
    #[must_use]
    pub const fn with_retry_policy(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    /// Backend base URL.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub(crate) fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    pub(crate) async fn identity(&self) -> Result<(BoardInfo, String), ApiError> {
        let (board, token) = try_join(self.host.board_info(), self.host.id_token()).await?;
        Ok((board, token))
    }

    pub(crate) fn signed(request: HttpRequest, token: &str) -> HttpRequest {
        request
            .header(CONTENT_TYPE_HEADER, JSON_CONTENT_TYPE)
            .header(SIGNATURE_HEADER, token)
    }

    pub(crate) fn transport(&self) -> &dyn HttpTransport {
        self.transport.as_ref()
    }

    pub(crate) fn clock(&self) -> &dyn Clock {
        self.clock.as_ref()
    }

    pub(crate) const fn retry(&self) -> RetryPolicy {
        self.retry
    }
}

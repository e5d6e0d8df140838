//! In-memory stand-ins for the browser, host SDK, and backend.

use crate::fixtures::{BOARD_ID, ID_TOKEN, fixed_now};
use async_trait::async_trait;
use chrono::{DateTime, TimeDelta, Utc};
use docboard_api_models::{AuthorizationResponse, SettingsRequest, SettingsResponse};
use docboard_core::authorization::AuthorizationApi;
use docboard_core::error::{ApiError, HostError, TransportError};
use docboard_core::ports::{BoardHost, BoardInfo, Clock, HttpRequest, HttpResponse, HttpTransport};
use docboard_core::settings::SettingsApi;
use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::time::Duration;

/// Clock whose sleeps return at once, advance `now`, and are recorded.
#[derive(Debug)]
pub struct ManualClock {
    now: Cell<DateTime<Utc>>,
    sleeps: RefCell<Vec<Duration>>,
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::at(fixed_now())
    }
}

impl ManualClock {
    /// Clock frozen at `now`.
    #[must_use]
    pub fn at(now: DateTime<Utc>) -> Self {
        Self {
            now: Cell::new(now),
            sleeps: RefCell::new(Vec::new()),
        }
    }

    /// Jump to `now`.
    pub fn set(&self, now: DateTime<Utc>) {
        self.now.set(now);
    }

    /// Move forward by `delta`.
    pub fn advance(&self, delta: TimeDelta) {
        self.now.set(self.now.get() + delta);
    }

    /// Every duration passed to `sleep`, in order.
    #[must_use]
    pub fn sleeps(&self) -> Vec<Duration> {
        self.sleeps.borrow().clone()
    }
}

#[async_trait(?Send)]
impl Clock for ManualClock {
    fn now(&self) -> DateTime<Utc> {
        self.now.get()
    }

    async fn sleep(&self, duration: Duration) {
        self.sleeps.borrow_mut().push(duration);
        if let Ok(delta) = TimeDelta::from_std(duration) {
            self.advance(delta);
        }
    }
}

/// Host SDK fake with fixed identity and recorded notifications.
#[derive(Debug)]
pub struct FakeHost {
    board_id: String,
    token: String,
    unavailable: Cell<bool>,
    errors: RefCell<Vec<String>>,
}

impl Default for FakeHost {
    fn default() -> Self {
        Self {
            board_id: BOARD_ID.to_string(),
            token: ID_TOKEN.to_string(),
            unavailable: Cell::new(false),
            errors: RefCell::new(Vec::new()),
        }
    }
}

impl FakeHost {
    /// Make identity calls fail.
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.set(unavailable);
    }

    /// Messages passed to `show_error`, in order.
    #[must_use]
    pub fn shown_errors(&self) -> Vec<String> {
        self.errors.borrow().clone()
    }
}

#[async_trait(?Send)]
impl BoardHost for FakeHost {
    async fn board_info(&self) -> Result<BoardInfo, HostError> {
        if self.unavailable.get() {
            return Err(HostError::Unavailable);
        }
        Ok(BoardInfo {
            id: self.board_id.clone(),
        })
    }

    async fn id_token(&self) -> Result<String, HostError> {
        if self.unavailable.get() {
            return Err(HostError::Unavailable);
        }
        Ok(self.token.clone())
    }

    fn show_error(&self, message: &str) {
        self.errors.borrow_mut().push(message.to_string());
    }
}

/// Transport that replays a queue of canned outcomes and records requests.
///
/// An exhausted script fails with a network error.
#[derive(Debug, Default)]
pub struct ScriptedTransport {
    script: RefCell<VecDeque<Result<HttpResponse, TransportError>>>,
    requests: RefCell<Vec<HttpRequest>>,
}

impl ScriptedTransport {
    /// Transport that will answer with `responses` in order.
    #[must_use]
    pub fn with_responses(responses: impl IntoIterator<Item = HttpResponse>) -> Self {
        let transport = Self::default();
        for response in responses {
            transport.push_response(response);
        }
        transport
    }

    /// Queue a response.
    pub fn push_response(&self, response: HttpResponse) {
        self.script.borrow_mut().push_back(Ok(response));
    }

    /// Queue a transport failure.
    pub fn push_failure(&self, detail: &str) {
        self.script.borrow_mut().push_back(Err(TransportError::Network {
            detail: detail.to_string(),
        }));
    }

    /// Requests sent so far.
    #[must_use]
    pub fn requests(&self) -> Vec<HttpRequest> {
        self.requests.borrow().clone()
    }

    /// Outcomes not yet consumed.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.script.borrow().len()
    }
}

#[async_trait(?Send)]
impl HttpTransport for ScriptedTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        self.requests.borrow_mut().push(request);
        self.script
            .borrow_mut()
            .pop_front()
            .unwrap_or_else(|| {
                Err(TransportError::Network {
                    detail: "script exhausted".into(),
                })
            })
    }
}

/// Settings backend fake. Empty queues answer with empty settings / success.
#[derive(Debug, Default)]
pub struct FakeSettingsApi {
    fetches: RefCell<VecDeque<Result<SettingsResponse, ApiError>>>,
    saves: RefCell<VecDeque<Result<(), ApiError>>>,
    fetch_calls: Cell<usize>,
    saved: RefCell<Vec<SettingsRequest>>,
}

impl FakeSettingsApi {
    /// Queue a fetch outcome.
    pub fn push_fetch(&self, result: Result<SettingsResponse, ApiError>) {
        self.fetches.borrow_mut().push_back(result);
    }

    /// Queue a save outcome.
    pub fn push_save(&self, result: Result<(), ApiError>) {
        self.saves.borrow_mut().push_back(result);
    }

    /// Number of fetches made.
    #[must_use]
    pub fn fetch_calls(&self) -> usize {
        self.fetch_calls.get()
    }

    /// Every request passed to `save_settings`.
    #[must_use]
    pub fn saved(&self) -> Vec<SettingsRequest> {
        self.saved.borrow().clone()
    }
}

#[async_trait(?Send)]
impl SettingsApi for FakeSettingsApi {
    async fn fetch_settings(&self) -> Result<SettingsResponse, ApiError> {
        self.fetch_calls.set(self.fetch_calls.get() + 1);
        self.fetches
            .borrow_mut()
            .pop_front()
            .unwrap_or_else(|| Ok(SettingsResponse::empty()))
    }

    async fn save_settings(&self, request: SettingsRequest) -> Result<(), ApiError> {
        self.saved.borrow_mut().push(request);
        self.saves.borrow_mut().pop_front().unwrap_or(Ok(()))
    }
}

/// Token endpoint fake. An empty queue answers `ServiceUnavailable`.
#[derive(Debug, Default)]
pub struct FakeAuthorizationApi {
    results: RefCell<VecDeque<Result<AuthorizationResponse, ApiError>>>,
}

impl FakeAuthorizationApi {
    /// Queue an outcome.
    pub fn push(&self, result: Result<AuthorizationResponse, ApiError>) {
        self.results.borrow_mut().push_back(result);
    }
}

#[async_trait(?Send)]
impl AuthorizationApi for FakeAuthorizationApi {
    async fn authorize(&self) -> Result<AuthorizationResponse, ApiError> {
        self.results
            .borrow_mut()
            .pop_front()
            .unwrap_or(Err(ApiError::ServiceUnavailable { message: None }))
    }
}

//! Settings endpoint calls and their status-code policy.

use crate::client::BackendClient;
use crate::error::ApiError;
use crate::ports::{HttpRequest, HttpResponse};
use crate::sanitize::sanitize_config;
use async_trait::async_trait;
use docboard_api_models::{
    ErrorBody, SETTINGS_PATH, SaveSettingsBody, SettingsRequest, SettingsResponse,
};
use tracing::{debug, warn};

/// Settings persistence as seen by the store.
#[async_trait(?Send)]
pub trait SettingsApi {
    /// Load the current board's settings.
    ///
    /// A board with nothing saved yet yields empty settings, not an error.
    async fn fetch_settings(&self) -> Result<SettingsResponse, ApiError>;

    /// Persist settings for the current board.
    async fn save_settings(&self, request: SettingsRequest) -> Result<(), ApiError>;
}

#[async_trait(?Send)]
impl SettingsApi for BackendClient {
    async fn fetch_settings(&self) -> Result<SettingsResponse, ApiError> {
        let (board, token) = self.identity().await?;
        let url = format!("{}?bid={}", self.url(SETTINGS_PATH), board.id);
        debug!(board = %board.id, "fetching board settings");

        match self.transport().send(fetch_request(&url, &token)).await {
            Ok(response) if response.is_success() => return decode_settings(&response),
            Ok(response) => match response.status {
                401 => return Err(ApiError::NotAuthorized),
                403 => return Err(ApiError::AccessDenied),
                404 => {
                    debug!(board = %board.id, "no settings stored for board");
                    return Ok(SettingsResponse::empty());
                }
                status => warn!(status, "settings fetch failed; retrying"),
            },
            Err(err) => warn!(error = %err, "settings fetch did not complete; retrying"),
        }

        self.fetch_with_backoff(&url, &token).await
    }

    async fn save_settings(&self, request: SettingsRequest) -> Result<(), ApiError> {
        let (board, token) = self.identity().await?;
        let body = SaveSettingsBody::new(board.id, sanitize_config(&request));
        let payload = serde_json::to_string(&body).map_err(|err| ApiError::Codec {
            detail: err.to_string(),
        })?;
        let request = BackendClient::signed(HttpRequest::post(self.url(SETTINGS_PATH)), &token)
            .body(payload);

        let response = self.transport().send(request).await?;
        if response.is_success() {
            debug!(board = %body.board_id, demo = body.demo, "settings saved");
            return Ok(());
        }

        let message = match response.status {
            400 | 403 | 500 => response
                .json::<ErrorBody>()
                .ok()
                .and_then(|error| error.error)
                .filter(|message| !message.is_empty()),
            _ => None,
        };
        warn!(status = response.status, message = ?message, "settings save rejected");
        Err(ApiError::ServiceUnavailable { message })
    }
}

impl BackendClient {
    async fn fetch_with_backoff(
        &self,
        url: &str,
        token: &str,
    ) -> Result<SettingsResponse, ApiError> {
        let policy = self.retry();
        for retry in 0..policy.max_retries {
            let delay = policy.delay_for(retry);
            self.clock().sleep(delay).await;
            match self.transport().send(fetch_request(url, token)).await {
                Ok(response) if response.is_success() => match decode_settings(&response) {
                    Ok(settings) => return Ok(settings),
                    Err(err) => warn!(retry, error = %err, "retried settings body unreadable"),
                },
                Ok(response) => {
                    debug!(
                        retry,
                        status = response.status,
                        delay = ?delay,
                        "settings retry failed"
                    );
                }
                Err(err) => warn!(retry, error = %err, "settings retry did not complete"),
            }
        }
        warn!(retries = policy.max_retries, "settings fetch retries exhausted");
        Err(ApiError::MaxRetriesExceeded)
    }
}

fn fetch_request(url: &str, token: &str) -> HttpRequest {
    BackendClient::signed(HttpRequest::get(url), token)
}

fn decode_settings(response: &HttpResponse) -> Result<SettingsResponse, ApiError> {
    response.json().map_err(|err| ApiError::Codec {
        detail: err.to_string(),
    })
}

//! Token endpoint call.

use crate::client::BackendClient;
use crate::error::ApiError;
use crate::ports::HttpRequest;
use async_trait::async_trait;
use docboard_api_models::{AUTHORIZE_PATH, AuthorizationResponse};
use tracing::{debug, warn};

/// Issues backend access tokens for the current board user.
#[async_trait(?Send)]
pub trait AuthorizationApi {
    /// Exchange the host signature for a backend token.
    async fn authorize(&self) -> Result<AuthorizationResponse, ApiError>;
}

#[async_trait(?Send)]
impl AuthorizationApi for BackendClient {
    async fn authorize(&self) -> Result<AuthorizationResponse, ApiError> {
        let (_, token) = self.identity().await?;
        let request = BackendClient::signed(HttpRequest::get(self.url(AUTHORIZE_PATH)), &token);
        let response = self.transport().send(request).await?;

        match response.status {
            status if (200..300).contains(&status) => {
                let authorization: AuthorizationResponse =
                    response.json().map_err(|err| ApiError::Codec {
                        detail: err.to_string(),
                    })?;
                debug!(expires_at = authorization.expires_at, "backend token issued");
                Ok(authorization)
            }
            401 => Err(ApiError::NotAuthorized),
            403 => Err(ApiError::AccessDenied),
            status => {
                warn!(status, "token endpoint failed");
                Err(ApiError::ServiceUnavailable { message: None })
            }
        }
    }
}

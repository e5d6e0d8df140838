//! Error types shared by the stores and the backend client.

use thiserror::Error;

/// Message recorded on the settings store when access is refused.
pub const ACCESS_DENIED_MESSAGE: &str = "access denied";

/// Translation key shown when the backend gives no usable reason.
pub const SERVICE_UNAVAILABLE_KEY: &str = "features.settings.form.errors.service_unavailable";

/// Failures surfaced by the backend client.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ApiError {
    /// The backend rejected the signature token.
    #[error("not authorized")]
    NotAuthorized,
    /// The caller is known but may not touch board settings.
    #[error("access denied")]
    AccessDenied,
    /// Every retry of a settings fetch failed.
    #[error("max retries")]
    MaxRetriesExceeded,
    /// The backend refused the request, optionally with its own reason.
    #[error("service unavailable")]
    ServiceUnavailable {
        /// Server-supplied message (usually a translation key).
        message: Option<String>,
    },
    /// The request never produced an HTTP response.
    #[error("transport failure")]
    Transport {
        /// Underlying transport error.
        detail: String,
    },
    /// A response body could not be decoded, or a request body encoded.
    #[error("payload codec failure")]
    Codec {
        /// Serializer error detail.
        detail: String,
    },
    /// The host SDK did not supply board identity or a token.
    #[error("host unavailable")]
    Host {
        /// Host error detail.
        detail: String,
    },
}

impl ApiError {
    /// Whether the failure means the current user is locked out.
    #[must_use]
    pub const fn is_access_related(&self) -> bool {
        matches!(self, Self::NotAuthorized | Self::AccessDenied)
    }

    /// Translation key to show the user for this failure.
    #[must_use]
    pub fn message_key(&self) -> &str {
        match self {
            Self::ServiceUnavailable {
                message: Some(message),
            } => message,
            _ => SERVICE_UNAVAILABLE_KEY,
        }
    }
}

impl From<HostError> for ApiError {
    fn from(err: HostError) -> Self {
        Self::Host {
            detail: err.to_string(),
        }
    }
}

impl From<TransportError> for ApiError {
    fn from(err: TransportError) -> Self {
        Self::Transport {
            detail: err.to_string(),
        }
    }
}

/// Failures raised by the embedding host SDK.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum HostError {
    /// The host SDK is not present on the page.
    #[error("host SDK unavailable")]
    Unavailable,
    /// A host call rejected.
    #[error("host call `{call}` failed: {detail}")]
    CallFailed {
        /// Name of the host call.
        call: &'static str,
        /// Rejection detail.
        detail: String,
    },
}

/// Failures raised by an HTTP transport before a response arrives.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TransportError {
    /// The request could not be built.
    #[error("invalid request: {detail}")]
    InvalidRequest {
        /// Builder error detail.
        detail: String,
    },
    /// The network call failed.
    #[error("network error: {detail}")]
    Network {
        /// Network error detail.
        detail: String,
    },
}

/// Failures raised while reading the UI configuration.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// Backend URL was empty.
    #[error("backend URL missing")]
    MissingBackendUrl,
    /// Backend URL could not be parsed.
    #[error("invalid backend URL")]
    InvalidBackendUrl {
        /// Offending value.
        value: String,
        /// Parser reason.
        reason: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn access_related_covers_auth_failures_only() {
        assert!(ApiError::NotAuthorized.is_access_related());
        assert!(ApiError::AccessDenied.is_access_related());
        assert!(!ApiError::MaxRetriesExceeded.is_access_related());
        assert!(!ApiError::ServiceUnavailable { message: None }.is_access_related());
    }

    #[test]
    fn message_key_prefers_server_message() {
        let err = ApiError::ServiceUnavailable {
            message: Some("features.settings.form.errors.invalid_url".to_string()),
        };
        assert_eq!(err.message_key(), "features.settings.form.errors.invalid_url");
        assert_eq!(
            ApiError::Transport {
                detail: "offline".to_string()
            }
            .message_key(),
            SERVICE_UNAVAILABLE_KEY
        );
    }

    #[test]
    fn display_matches_wire_messages() {
        assert_eq!(ApiError::NotAuthorized.to_string(), "not authorized");
        assert_eq!(ApiError::AccessDenied.to_string(), ACCESS_DENIED_MESSAGE);
        assert_eq!(ApiError::MaxRetriesExceeded.to_string(), "max retries");
    }
}

//! API-specific error types
//!
//! Every failure the client can produce is an [`ApiError`]; its
//! [`ApiErrorKind`] is fixed where the error is constructed, so callers
//! branch on the kind rather than on message text.

use std::time::Duration;

use reqwest::StatusCode;
use serde_json::Value;
use thiserror::Error;
use wastetrack_domain::constants::{GENERIC_OPERATION_FAILED, GENERIC_TRANSPORT_FAILED};
use wastetrack_domain::WasteTrackError;

/// Coarse classification of API failures
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ApiErrorKind {
    /// No response: connection failure or timeout
    Transport,
    /// Server answered with a non-2xx status (other than a final 401)
    Protocol,
    /// Still unauthorized after the reauthentication policy ran
    Unauthorized,
    /// Response body did not match the expected shape
    Decode,
    /// Client misconfiguration (bad URL, unencodable header or body)
    Config,
}

/// API operation errors
#[derive(Debug, Clone, Error)]
pub enum ApiError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Timeout after {0:?}")]
    Timeout(Duration),

    #[error("Unauthorized: {message}")]
    Unauthorized { message: String },

    #[error("HTTP {status}: {message}")]
    Http { status: StatusCode, message: String },

    #[error("Failed to decode response: {0}")]
    Decode(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl ApiError {
    /// Build a protocol error from a non-2xx response body
    pub fn from_response(status: StatusCode, body: &str) -> Self {
        Self::Http { status, message: extract_error_message(body) }
    }

    /// Build the terminal unauthorized error from a 401 response body
    pub fn unauthorized(body: &str) -> Self {
        Self::Unauthorized { message: extract_error_message(body) }
    }

    /// Structured category of this error
    pub fn kind(&self) -> ApiErrorKind {
        match self {
            Self::Network(_) | Self::Timeout(_) => ApiErrorKind::Transport,
            Self::Unauthorized { .. } => ApiErrorKind::Unauthorized,
            Self::Http { .. } => ApiErrorKind::Protocol,
            Self::Decode(_) => ApiErrorKind::Decode,
            Self::Config(_) => ApiErrorKind::Config,
        }
    }

    /// HTTP status, when the server answered
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Self::Http { status, .. } => Some(*status),
            Self::Unauthorized { .. } => Some(StatusCode::UNAUTHORIZED),
            _ => None,
        }
    }

    /// Message suitable for showing to the user
    pub fn user_message(&self) -> String {
        match self {
            Self::Network(_) | Self::Timeout(_) => GENERIC_TRANSPORT_FAILED.to_string(),
            Self::Unauthorized { message } | Self::Http { message, .. } => message.clone(),
            Self::Decode(_) | Self::Config(_) => GENERIC_OPERATION_FAILED.to_string(),
        }
    }
}

/// Pick the human-readable message out of an error body
///
/// Prefers a string `error` field, then `message`, else the generic
/// "Operation failed".
pub fn extract_error_message(body: &str) -> String {
    let Ok(Value::Object(fields)) = serde_json::from_str::<Value>(body) else {
        return GENERIC_OPERATION_FAILED.to_string();
    };

    ["error", "message"]
        .iter()
        .filter_map(|key| fields.get(*key).and_then(Value::as_str))
        .map(str::trim)
        .find(|message| !message.is_empty())
        .map_or_else(|| GENERIC_OPERATION_FAILED.to_string(), str::to_string)
}

impl From<WasteTrackError> for ApiError {
    fn from(err: WasteTrackError) -> Self {
        match err {
            WasteTrackError::Network(message) => Self::Network(message),
            WasteTrackError::Auth(message) | WasteTrackError::Security(message) => {
                Self::Unauthorized { message }
            }
            WasteTrackError::Config(message)
            | WasteTrackError::InvalidInput(message)
            | WasteTrackError::NotFound(message)
            | WasteTrackError::Internal(message) => Self::Config(message),
        }
    }
}

impl From<ApiError> for WasteTrackError {
    fn from(err: ApiError) -> Self {
        match err.kind() {
            ApiErrorKind::Transport => Self::Network(err.to_string()),
            ApiErrorKind::Unauthorized => Self::Auth(err.user_message()),
            ApiErrorKind::Protocol if err.status() == Some(StatusCode::NOT_FOUND) => {
                Self::NotFound(err.user_message())
            }
            ApiErrorKind::Protocol => Self::Network(err.to_string()),
            ApiErrorKind::Decode => Self::Internal(err.to_string()),
            ApiErrorKind::Config => Self::Config(err.to_string()),
        }
    }
}

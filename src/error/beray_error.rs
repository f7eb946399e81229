//! Unified error type for the BeRay client.

use thiserror::Error;

use super::api::ApiError;
use super::category::ErrorCategory;
use super::stream::StreamError;
use crate::traits::HttpError;

/// Every failure the client can report.
///
/// - [`BerayError::Api`]: the server answered with a non-success status
///   (including when opening an event stream).
/// - [`BerayError::Transport`]: the request never completed.
/// - [`BerayError::Stream`]: an open event stream broke.
/// - [`BerayError::Decode`]: a success response did not have the expected shape.
#[derive(Debug, Error)]
pub enum BerayError {
    #[error(transparent)]
    Api(#[from] ApiError),

    #[error("Transport error: {0}")]
    Transport(#[from] HttpError),

    #[error(transparent)]
    Stream(#[from] StreamError),

    #[error("Failed to decode response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    Config { message: String },
}

impl BerayError {
    /// Get the category of this error.
    pub fn category(&self) -> ErrorCategory {
        match self {
            BerayError::Api(err) if err.is_authentication() => ErrorCategory::Auth,
            BerayError::Api(err) if err.is_server_error() => ErrorCategory::Server,
            BerayError::Api(_) => ErrorCategory::Client,
            BerayError::Transport(HttpError::InvalidUrl(_)) => ErrorCategory::Configuration,
            BerayError::Transport(_) => ErrorCategory::Network,
            BerayError::Stream(_) => ErrorCategory::Network,
            BerayError::Decode(_) => ErrorCategory::Client,
            BerayError::Config { .. } => ErrorCategory::Configuration,
        }
    }

    /// Check if this error is retryable.
    pub fn is_retryable(&self) -> bool {
        match self {
            BerayError::Api(err) => err.is_retryable(),
            BerayError::Transport(HttpError::InvalidUrl(_) | HttpError::Cancelled) => false,
            BerayError::Transport(_) => true,
            BerayError::Stream(err) => err.is_retryable(),
            BerayError::Decode(_) | BerayError::Config { .. } => false,
        }
    }

    /// Check if this error requires logging in again.
    pub fn requires_reauth(&self) -> bool {
        matches!(self, BerayError::Api(ApiError::Unauthorized { .. }))
    }

    /// The API error, if the server rejected the request.
    pub fn as_api_error(&self) -> Option<&ApiError> {
        match self {
            BerayError::Api(err) => Some(err),
            _ => None,
        }
    }

    /// Get a user-friendly error message.
    pub fn user_message(&self) -> String {
        match self {
            BerayError::Api(err) => err.user_message(),
            BerayError::Transport(HttpError::Timeout(_)) => {
                "The request timed out. The server may be slow or unreachable.".to_string()
            }
            BerayError::Transport(_) => {
                "Unable to reach the server. Please check your connection.".to_string()
            }
            BerayError::Stream(err) => err.user_message(),
            BerayError::Decode(_) => {
                "Received an unexpected response from the server.".to_string()
            }
            BerayError::Config { message } => format!("Invalid configuration: {}", message),
        }
    }

    /// Get a short error code for logging.
    pub fn error_code(&self) -> &'static str {
        match self {
            BerayError::Api(err) => err.error_code(),
            BerayError::Transport(HttpError::Timeout(_)) => "E_NET_TIMEOUT",
            BerayError::Transport(HttpError::ConnectionFailed(_)) => "E_NET_CONN",
            BerayError::Transport(_) => "E_NET_OTHER",
            BerayError::Stream(err) => err.error_code(),
            BerayError::Decode(_) => "E_DECODE",
            BerayError::Config { .. } => "E_CONFIG",
        }
    }

    /// Get the recovery hint for this error.
    pub fn recovery_hint(&self) -> &'static str {
        self.category().recovery_hint()
    }
}

//! Streaming-related error types.
//!
//! Failures that end an event stream after it has been opened. Errors
//! raised while opening the stream are [`super::ApiError`]s instead.

use std::fmt;
use std::time::Duration;

/// Stream-specific error variants.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StreamError {
    /// The connection failed while the body was being read.
    ConnectionLost { message: String },

    /// No bytes arrived within the configured idle timeout.
    IdleTimeout { idle: Duration },
}

impl StreamError {
    /// Check if re-opening the stream may succeed.
    pub fn is_retryable(&self) -> bool {
        true
    }

    /// Get a user-friendly error message.
    pub fn user_message(&self) -> String {
        match self {
            StreamError::ConnectionLost { .. } => {
                "Connection to the server was lost while streaming task updates.".to_string()
            }
            StreamError::IdleTimeout { idle } => format!(
                "No task updates received for {} seconds. The connection may have been lost.",
                idle.as_secs()
            ),
        }
    }

    /// Get a short error code for logging.
    pub fn error_code(&self) -> &'static str {
        match self {
            StreamError::ConnectionLost { .. } => "E_STREAM_CONN",
            StreamError::IdleTimeout { .. } => "E_STREAM_IDLE",
        }
    }
}

impl fmt::Display for StreamError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StreamError::ConnectionLost { message } => {
                write!(f, "Stream connection lost: {}", message)
            }
            StreamError::IdleTimeout { idle } => {
                write!(f, "Stream idle for {:?}", idle)
            }
        }
    }
}

impl std::error::Error for StreamError {}

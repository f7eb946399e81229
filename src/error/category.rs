//! Error category classification.
//!
//! A high-level categorization of errors that drives retry decisions and
//! user messaging.

use std::fmt;

/// High-level categorization of errors for handling decisions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    /// Connection, DNS, timeout, dropped streams.
    /// Generally transient and retryable.
    Network,

    /// Missing, expired, or insufficient credentials.
    /// Requires signing in again.
    Auth,

    /// Server-side failures (HTTP 5xx).
    /// Generally transient and retryable after delay.
    Server,

    /// The request was understood but refused (404, 409, 422, other 4xx),
    /// or the response could not be decoded.
    Client,

    /// Invalid configuration.
    Configuration,
}

impl ErrorCategory {
    /// Returns true if errors in this category are generally transient.
    pub fn is_retryable(&self) -> bool {
        matches!(self, ErrorCategory::Network | ErrorCategory::Server)
    }

    /// Returns a short label for the category suitable for logging.
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCategory::Network => "network",
            ErrorCategory::Auth => "auth",
            ErrorCategory::Server => "server",
            ErrorCategory::Client => "client",
            ErrorCategory::Configuration => "configuration",
        }
    }

    /// Returns suggested recovery actions for this category.
    pub fn recovery_hint(&self) -> &'static str {
        match self {
            ErrorCategory::Network => "Check your network connection and try again",
            ErrorCategory::Auth => "Log in again to obtain a fresh access token",
            ErrorCategory::Server => {
                "The server may be experiencing issues. Please try again later"
            }
            ErrorCategory::Client => "Check the request parameters",
            ErrorCategory::Configuration => "Check the BERAY_* configuration settings",
        }
    }
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

//! API status error types.
//!
//! Non-success HTTP responses are classified by status code into the
//! variants below, for buffered requests and stream setup alike.

use std::fmt;

/// An error response returned by the BeRay API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// 401: missing, invalid, or expired credentials.
    Unauthorized { detail: String },

    /// 403: authenticated but not allowed.
    Forbidden { detail: String },

    /// 404: the task, file, or endpoint does not exist.
    NotFound { detail: String },

    /// 409: e.g. an email that is already registered.
    Conflict { detail: String },

    /// 422: the request body failed validation.
    UnprocessableEntity { detail: String },

    /// Any other non-2xx status.
    Status { status: u16, detail: String },
}

impl ApiError {
    /// Classify an error response by status code.
    ///
    /// The detail is taken from a JSON `"detail"` field when the body has
    /// one, otherwise the raw body text is used.
    pub fn from_response(status: u16, body: &str) -> Self {
        let detail = extract_detail(body);
        match status {
            401 => ApiError::Unauthorized { detail },
            403 => ApiError::Forbidden { detail },
            404 => ApiError::NotFound { detail },
            409 => ApiError::Conflict { detail },
            422 => ApiError::UnprocessableEntity { detail },
            _ => ApiError::Status { status, detail },
        }
    }

    /// HTTP status code of the response.
    pub fn status(&self) -> u16 {
        match self {
            ApiError::Unauthorized { .. } => 401,
            ApiError::Forbidden { .. } => 403,
            ApiError::NotFound { .. } => 404,
            ApiError::Conflict { .. } => 409,
            ApiError::UnprocessableEntity { .. } => 422,
            ApiError::Status { status, .. } => *status,
        }
    }

    /// Server-provided error detail.
    pub fn detail(&self) -> &str {
        match self {
            ApiError::Unauthorized { detail }
            | ApiError::Forbidden { detail }
            | ApiError::NotFound { detail }
            | ApiError::Conflict { detail }
            | ApiError::UnprocessableEntity { detail }
            | ApiError::Status { detail, .. } => detail,
        }
    }

    /// True for 401 and 403.
    pub fn is_authentication(&self) -> bool {
        matches!(
            self,
            ApiError::Unauthorized { .. } | ApiError::Forbidden { .. }
        )
    }

    pub fn is_server_error(&self) -> bool {
        self.status() >= 500
    }

    /// Check if the request may succeed when repeated.
    pub fn is_retryable(&self) -> bool {
        let status = self.status();
        status >= 500 || status == 429 || status == 408
    }

    /// Get a user-friendly error message.
    pub fn user_message(&self) -> String {
        match self {
            ApiError::Unauthorized { .. } => "Authentication required. Please log in again.".to_string(),
            ApiError::Forbidden { .. } => {
                "Access denied. You don't have permission for this action.".to_string()
            }
            ApiError::NotFound { .. } => "The requested resource was not found.".to_string(),
            ApiError::Conflict { detail } => format!("Conflict: {}", detail),
            ApiError::UnprocessableEntity { detail } => {
                format!("The request was rejected: {}", detail)
            }
            ApiError::Status { status, .. } => match *status {
                429 => "Too many requests. Please wait a moment and try again.".to_string(),
                500..=599 => "The server is experiencing issues. Please try again later.".to_string(),
                _ => format!("The server returned an error (HTTP {}).", status),
            },
        }
    }

    /// Get a short error code for logging.
    pub fn error_code(&self) -> &'static str {
        match self {
            ApiError::Unauthorized { .. } => "E_API_UNAUTHORIZED",
            ApiError::Forbidden { .. } => "E_API_FORBIDDEN",
            ApiError::NotFound { .. } => "E_API_NOT_FOUND",
            ApiError::Conflict { .. } => "E_API_CONFLICT",
            ApiError::UnprocessableEntity { .. } => "E_API_VALIDATION",
            ApiError::Status { .. } => "E_API_STATUS",
        }
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::Unauthorized { detail } => write!(f, "Authentication failed: {}", detail),
            ApiError::Forbidden { detail } => write!(f, "Forbidden: {}", detail),
            other => write!(
                f,
                "API request failed with status {}: {}",
                other.status(),
                other.detail()
            ),
        }
    }
}

impl std::error::Error for ApiError {}

fn extract_detail(body: &str) -> String {
    match serde_json::from_str::<serde_json::Value>(body) {
        Ok(serde_json::Value::Object(map)) => match map.get("detail") {
            Some(serde_json::Value::String(detail)) => detail.clone(),
            Some(other) => other.to_string(),
            None => body.to_string(),
        },
        _ => body.to_string(),
    }
}

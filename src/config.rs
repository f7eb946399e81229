//! Client configuration.
//!
//! Use the builder setters to customize behavior, or [`ClientConfig::from_env`]
//! to pick settings up from `BERAY_*` environment variables.

use std::time::Duration;

/// Default server address.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";

/// Path prefix of every API endpoint.
pub const API_PREFIX: &str = "/api/v1";

/// Default timeout for buffered requests and connection setup.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

pub const ENV_BASE_URL: &str = "BERAY_BASE_URL";
pub const ENV_TOKEN: &str = "BERAY_TOKEN";
pub const ENV_TIMEOUT_SECS: &str = "BERAY_TIMEOUT_SECS";
pub const ENV_STREAM_IDLE_TIMEOUT_SECS: &str = "BERAY_STREAM_IDLE_TIMEOUT_SECS";

/// Configuration for [`crate::BerayClient`].
///
/// # Example
///
/// ```
/// use beray::ClientConfig;
/// use std::time::Duration;
///
/// let config = ClientConfig::default()
///     .with_base_url("https://beray.example.com/")
///     .with_stream_idle_timeout(Duration::from_secs(120));
/// assert_eq!(config.api_url("/tasks/"), "https://beray.example.com/api/v1/tasks/");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ClientConfig {
    /// Server address, without a trailing slash
    pub base_url: String,
    /// Initial access token, if any
    pub token: Option<String>,
    /// Timeout for buffered requests and for establishing connections
    pub timeout: Duration,
    /// Fail an event stream when no bytes arrive for this long (default: never)
    pub stream_idle_timeout: Option<Duration>,
    /// User-Agent header sent with every request
    pub user_agent: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            token: None,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            stream_idle_timeout: None,
            user_agent: format!("beray/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl ClientConfig {
    /// Create a new ClientConfig with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the server address. Trailing slashes are stripped.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    /// Set the initial access token.
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Set the request and connect timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the idle timeout applied to event streams.
    pub fn with_stream_idle_timeout(mut self, timeout: Duration) -> Self {
        self.stream_idle_timeout = Some(timeout);
        self
    }

    /// Set the User-Agent header.
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Root of the versioned API, e.g. `http://localhost:8000/api/v1`.
    pub fn api_base_url(&self) -> String {
        format!("{}{}", self.base_url, API_PREFIX)
    }

    /// Full URL of an API endpoint. `path` must start with `/`.
    pub fn api_url(&self, path: &str) -> String {
        format!("{}{}", self.api_base_url(), path)
    }

    /// Create config from `BERAY_*` environment variables.
    ///
    /// Unset variables keep their defaults; unparseable numbers and a zero
    /// request timeout are logged and ignored.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(url) = std::env::var(ENV_BASE_URL) {
            if !url.trim().is_empty() {
                config = config.with_base_url(url.trim());
            }
        }

        if let Ok(token) = std::env::var(ENV_TOKEN) {
            if !token.trim().is_empty() {
                config = config.with_token(token.trim());
            }
        }

        match read_secs(ENV_TIMEOUT_SECS) {
            Some(0) => tracing::warn!(
                "Ignoring {}=0: requests need a non-zero timeout",
                ENV_TIMEOUT_SECS
            ),
            Some(secs) => config = config.with_timeout(Duration::from_secs(secs)),
            None => {}
        }

        if let Some(secs) = read_secs(ENV_STREAM_IDLE_TIMEOUT_SECS) {
            // 0 keeps streams open indefinitely
            if secs > 0 {
                config = config.with_stream_idle_timeout(Duration::from_secs(secs));
            }
        }

        config
    }
}

fn read_secs(var: &str) -> Option<u64> {
    let raw = std::env::var(var).ok()?;
    match raw.trim().parse::<u64>() {
        Ok(secs) => Some(secs),
        Err(_) => {
            tracing::warn!("Ignoring {}={:?}: expected a number of seconds", var, raw);
            None
        }
    }
}

//! BeRay API client.
//!
//! [`BerayClient`] is a stateful handle to one BeRay server: it owns the
//! transport, the configuration, and the [`Session`] whose token is attached
//! to every request. Endpoint groups live in submodules:
//!
//! - `auth` - verification codes, registration, login, logout
//! - `users` - the current user's profile
//! - `tasks` - task lifecycle
//! - `files` - task workspace files and archives
//! - `stream` - the task update event stream

mod auth;
mod files;
mod stream;
mod tasks;
mod users;

pub use files::{guess_content_type, FileDownload, DEFAULT_CONTENT_TYPE, DEFAULT_TREE_PATH};

use std::sync::Arc;

use serde::de::DeserializeOwned;
use tracing::debug;

use crate::adapters::ReqwestHttpClient;
use crate::config::ClientConfig;
use crate::error::{ApiError, BerayError, BerayResult};
use crate::session::Session;
use crate::traits::{HttpClient, HttpError, HttpRequest, Method, Response, StreamingResponse};

/// Client for the BeRay task automation API.
///
/// Cheap to clone; clones share the transport and the session token.
#[derive(Clone)]
pub struct BerayClient {
    config: ClientConfig,
    http: Arc<dyn HttpClient>,
    session: Session,
}

impl std::fmt::Debug for BerayClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BerayClient")
            .field("base_url", &self.config.base_url)
            .field("authenticated", &self.session.is_authenticated())
            .finish()
    }
}

impl BerayClient {
    /// Create a client backed by reqwest.
    pub fn new(config: ClientConfig) -> BerayResult<Self> {
        let http = ReqwestHttpClient::from_config(&config).map_err(|e| BerayError::Config {
            message: format!("failed to build HTTP client: {}", e),
        })?;
        Ok(Self::with_http_client(config, Arc::new(http)))
    }

    /// Create a client with a custom transport (e.g. a mock in tests).
    pub fn with_http_client(config: ClientConfig, http: Arc<dyn HttpClient>) -> Self {
        let session = match &config.token {
            Some(token) => Session::with_token(token.clone()),
            None => Session::new(),
        };
        Self {
            config,
            http,
            session,
        }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// The session holding the current access token.
    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Use `token` for all subsequent requests.
    pub fn set_token(&self, token: impl Into<String>) {
        self.session.set_token(token);
    }

    pub fn clear_token(&self) {
        self.session.clear_token();
    }

    /// The current access token, if any.
    pub fn token(&self) -> Option<String> {
        self.session.get_token()
    }

    /// Request for an API path, with the session's credentials attached.
    fn request(&self, method: Method, path: &str) -> HttpRequest {
        HttpRequest::new(method, self.config.api_url(path)).with_headers(self.session.auth_headers())
    }

    /// Send a buffered request and decode the JSON body.
    async fn execute(&self, request: HttpRequest) -> BerayResult<serde_json::Value> {
        let method = request.method;
        let url = request.url.clone();

        let response = self.http.send(request).await?;
        debug!("{} {} -> {}", method, url, response.status);
        handle_response(response)
    }

    /// Send a buffered request and deserialize the JSON body into `T`.
    async fn execute_as<T: DeserializeOwned>(&self, request: HttpRequest) -> BerayResult<T> {
        let value = self.execute(request).await?;
        Ok(serde_json::from_value(value)?)
    }

    /// Send a request whose body is consumed incrementally.
    ///
    /// A non-success status is reported before any of the body is read,
    /// classified the same way as buffered responses.
    async fn execute_streaming(&self, request: HttpRequest) -> BerayResult<StreamingResponse> {
        let method = request.method;
        let url = request.url.clone();

        match self.http.send_streaming(request).await {
            Ok(response) => {
                debug!("{} {} -> {} (streaming)", method, url, response.status);
                Ok(response)
            }
            Err(HttpError::ServerError { status, message }) => {
                debug!("{} {} -> {}", method, url, status);
                Err(ApiError::from_response(status, &message).into())
            }
            Err(err) => Err(err.into()),
        }
    }
}

/// Decode a buffered response, mapping error statuses to [`ApiError`].
///
/// `204 No Content` decodes as an empty JSON object.
fn handle_response(response: Response) -> BerayResult<serde_json::Value> {
    if response.is_success() {
        if response.status == 204 {
            return Ok(serde_json::Value::Object(serde_json::Map::new()));
        }
        return Ok(response.json()?);
    }

    let body = String::from_utf8_lossy(&response.body);
    Err(ApiError::from_response(response.status, &body).into())
}

//! Mock implementations for test fixtures.
//!
//! This module re-exports the mock transport from `beray::adapters::mock`
//! and provides a builder for common response setups.

#[allow(unused_imports)]
pub use beray::adapters::mock::{MockHttpClient, MockResponse, MockStream};
#[allow(unused_imports)]
pub use beray::traits::{HttpError, Response};

use std::sync::Arc;

use beray::{BerayClient, ClientConfig};
use bytes::Bytes;

/// Base URL the mock-backed clients are configured with.
pub const MOCK_API_BASE: &str = "http://localhost:8000/api/v1";

/// Configuration for setting up mock HTTP responses.
pub struct MockHttpConfig {
    client: MockHttpClient,
}

impl MockHttpConfig {
    /// Creates a new mock HTTP configuration.
    pub fn new() -> Self {
        Self {
            client: MockHttpClient::new(),
        }
    }

    /// Configures a JSON response for an API path.
    pub fn with_json_response(self, path: &str, status: u16, json: &str) -> Self {
        self.client.set_response(
            &format!("{}{}", MOCK_API_BASE, path),
            MockResponse::Success(Response::new(status, Bytes::from(json.to_string()))),
        );
        self
    }

    /// Configures a scripted event stream for an API path.
    pub fn with_stream(self, path: &str, stream: MockStream) -> Self {
        self.client
            .set_response(&format!("{}{}", MOCK_API_BASE, path), MockResponse::Stream(stream));
        self
    }

    /// Builds a client backed by the configured mock, plus the mock for assertions.
    pub fn build(self) -> (BerayClient, MockHttpClient) {
        let client = BerayClient::with_http_client(
            ClientConfig::default().with_token(super::TEST_TOKEN),
            Arc::new(self.client.clone()),
        );
        (client, self.client)
    }
}

impl Default for MockHttpConfig {
    fn default() -> Self {
        Self::new()
    }
}

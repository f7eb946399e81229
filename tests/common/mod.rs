//! Common test utilities for integration tests.
//!
//! This module provides reusable fixtures and helpers for testing the
//! client against a local `wiremock` server or the in-crate mock transport.
//!
//! # Example
//!
//! ```ignore
//! let server = MockServer::start().await;
//! let client = authenticated_client_for(&server);
//! ```

#![allow(dead_code)]

pub mod mocks;

#[allow(unused_imports)]
pub use mocks::*;

use beray::{BerayClient, ClientConfig};
use wiremock::MockServer;

/// Token used by authenticated test clients.
pub const TEST_TOKEN: &str = "test-access-token-12345";

/// Server path of an API endpoint, e.g. `/api/v1/tasks/1`.
pub fn api_path(path: &str) -> String {
    format!("/api/v1{}", path)
}

/// Expected `Authorization` header value for [`TEST_TOKEN`].
pub fn bearer() -> String {
    format!("Bearer {}", TEST_TOKEN)
}

/// Signed-out client talking to `server` over real HTTP.
pub fn client_for(server: &MockServer) -> BerayClient {
    BerayClient::new(ClientConfig::default().with_base_url(server.uri()))
        .expect("client should build")
}

/// Address of a local port with nothing listening on it.
pub fn closed_port_url() -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("bind ephemeral port");
    let port = listener.local_addr().expect("local addr").port();
    drop(listener);
    format!("http://127.0.0.1:{}", port)
}

/// Client talking to `server` that already holds [`TEST_TOKEN`].
pub fn authenticated_client_for(server: &MockServer) -> BerayClient {
    BerayClient::new(
        ClientConfig::default()
            .with_base_url(server.uri())
            .with_token(TEST_TOKEN),
    )
    .expect("client should build")
}

/// Render records as an event-stream body. Each record is `(event, data)`;
/// an empty event omits the `event:` line, and `data` may span lines.
pub fn sse_body(records: &[(&str, &str)]) -> String {
    let mut body = String::new();
    for (event, data) in records {
        if !event.is_empty() {
            body.push_str(&format!("event: {}\n", event));
        }
        for line in data.split('\n') {
            body.push_str(&format!("data: {}\n", line));
        }
        body.push('\n');
    }
    body
}

//! Mock HTTP client for testing.
//!
//! Provides a configurable mock transport that returns predefined responses,
//! scripted chunked streams, or errors, and records every request it sees.

use async_trait::async_trait;
use bytes::Bytes;
use futures::Stream;
use std::collections::HashMap;
use std::pin::Pin;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::task::{Context, Poll};

use crate::traits::{
    ByteStream, Headers, HttpClient, HttpError, HttpRequest, Response, StreamingResponse,
};

/// A recorded HTTP request for verification in tests.
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    /// HTTP method
    pub method: String,
    /// Request URL including the query string
    pub url: String,
    /// Request headers
    pub headers: Headers,
    /// Request body rendered as text
    pub body: Option<String>,
}

/// A scripted response body delivered chunk by chunk.
#[derive(Debug, Clone, Default)]
pub struct MockStream {
    steps: Vec<Result<Bytes, HttpError>>,
    hold_open: bool,
}

impl MockStream {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a stream from text chunks, delivered in order.
    pub fn from_chunks<I, S>(chunks: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<Bytes>,
    {
        Self {
            steps: chunks.into_iter().map(|c| Ok(c.into())).collect(),
            hold_open: false,
        }
    }

    /// Deliver one more chunk.
    pub fn chunk(mut self, chunk: impl Into<Bytes>) -> Self {
        self.steps.push(Ok(chunk.into()));
        self
    }

    /// Fail the body read after the chunks scripted so far.
    pub fn fail(mut self, err: HttpError) -> Self {
        self.steps.push(Err(err));
        self
    }

    /// Never end after the scripted steps, like a stalled connection.
    pub fn hold_open(mut self) -> Self {
        self.hold_open = true;
        self
    }

    /// Turn the script into a transport body.
    pub fn into_byte_stream(self) -> ByteStream {
        let scripted = futures::stream::iter(self.steps);
        if self.hold_open {
            Box::pin(futures::StreamExt::chain(scripted, futures::stream::pending()))
        } else {
            Box::pin(scripted)
        }
    }
}

/// Configuration for a mock response.
#[derive(Debug, Clone)]
pub enum MockResponse {
    /// Return a buffered response (any status)
    Success(Response),
    /// Fail at the transport level
    Error(HttpError),
    /// Return a successful streaming body
    Stream(MockStream),
}

impl MockResponse {
    /// JSON response with the given status.
    pub fn json(status: u16, value: serde_json::Value) -> Self {
        MockResponse::Success(Response::json_body(status, &value))
    }

    /// Plain response with the given status and body.
    pub fn status(status: u16, body: impl Into<Bytes>) -> Self {
        MockResponse::Success(Response::new(status, body.into()))
    }
}

/// Body stream wrapper that counts how many opened streams were dropped.
struct TrackedStream {
    inner: ByteStream,
    released: Arc<AtomicUsize>,
}

impl Stream for TrackedStream {
    type Item = Result<Bytes, HttpError>;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        self.inner.as_mut().poll_next(cx)
    }
}

impl Drop for TrackedStream {
    fn drop(&mut self) {
        self.released.fetch_add(1, Ordering::SeqCst);
    }
}

/// Mock HTTP client for testing.
///
/// Responses are matched by URL (without query string): exact match first,
/// then the longest configured prefix, then the default response.
///
/// Streaming bodies are wrapped so tests can observe when the consumer
/// releases the connection, via [`MockHttpClient::released_streams`].
///
/// # Example
///
/// ```ignore
/// use beray::adapters::mock::{MockHttpClient, MockResponse, MockStream};
///
/// let client = MockHttpClient::new();
/// client.set_response(
///     "http://localhost:8000/api/v1/tasks/1/stream",
///     MockResponse::Stream(MockStream::from_chunks(["data: {}\n\n"])),
/// );
/// ```
#[derive(Debug, Clone, Default)]
pub struct MockHttpClient {
    /// Configured responses by URL pattern
    responses: Arc<Mutex<HashMap<String, MockResponse>>>,
    /// Default response when no specific match
    default_response: Arc<Mutex<Option<MockResponse>>>,
    /// Recorded requests for verification
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
    opened: Arc<AtomicUsize>,
    released: Arc<AtomicUsize>,
}

impl MockHttpClient {
    /// Create a new mock HTTP client.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a response for a URL (or URL prefix).
    pub fn set_response(&self, url: &str, response: MockResponse) {
        let mut responses = self.responses.lock().unwrap();
        responses.insert(url.to_string(), response);
    }

    /// Set a default response for URLs without specific matches.
    pub fn set_default_response(&self, response: MockResponse) {
        let mut default = self.default_response.lock().unwrap();
        *default = Some(response);
    }

    /// Get all recorded requests.
    pub fn get_requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }

    /// The most recent request, if any.
    pub fn last_request(&self) -> Option<RecordedRequest> {
        self.requests.lock().unwrap().last().cloned()
    }

    /// Clear all recorded requests.
    pub fn clear_requests(&self) {
        self.requests.lock().unwrap().clear();
    }

    /// Number of streaming bodies handed out so far.
    pub fn opened_streams(&self) -> usize {
        self.opened.load(Ordering::SeqCst)
    }

    /// Number of streaming bodies that have since been dropped.
    pub fn released_streams(&self) -> usize {
        self.released.load(Ordering::SeqCst)
    }

    fn record_request(&self, request: &HttpRequest) {
        let mut requests = self.requests.lock().unwrap();
        requests.push(RecordedRequest {
            method: request.method.to_string(),
            url: request.full_url(),
            headers: request.headers.clone(),
            body: request.body.to_text(),
        });
    }

    fn get_response(&self, url: &str) -> Option<MockResponse> {
        let responses = self.responses.lock().unwrap();

        if let Some(response) = responses.get(url) {
            return Some(response.clone());
        }

        let prefix_match = responses
            .iter()
            .filter(|(pattern, _)| url.starts_with(pattern.as_str()))
            .max_by_key(|(pattern, _)| pattern.len())
            .map(|(_, response)| response.clone());
        if prefix_match.is_some() {
            return prefix_match;
        }

        let default = self.default_response.lock().unwrap();
        default.clone()
    }
}

#[async_trait]
impl HttpClient for MockHttpClient {
    async fn send(&self, request: HttpRequest) -> Result<Response, HttpError> {
        self.record_request(&request);

        match self.get_response(&request.url) {
            Some(MockResponse::Success(response)) => Ok(response),
            Some(MockResponse::Error(err)) => Err(err),
            Some(MockResponse::Stream(_)) => Err(HttpError::Other(
                "Stream response on non-stream request".to_string(),
            )),
            None => Err(HttpError::Other(format!(
                "No mock response for URL: {}",
                request.url
            ))),
        }
    }

    async fn send_streaming(
        &self,
        request: HttpRequest,
    ) -> Result<StreamingResponse, HttpError> {
        self.record_request(&request);

        match self.get_response(&request.url) {
            Some(MockResponse::Stream(script)) => {
                self.opened.fetch_add(1, Ordering::SeqCst);
                let body = TrackedStream {
                    inner: script.into_byte_stream(),
                    released: Arc::clone(&self.released),
                };
                Ok(StreamingResponse::new(200, Headers::new(), Box::pin(body)))
            }
            Some(MockResponse::Success(response)) if response.is_success() => {
                self.opened.fetch_add(1, Ordering::SeqCst);
                let body = TrackedStream {
                    inner: MockStream::from_chunks([response.body]).into_byte_stream(),
                    released: Arc::clone(&self.released),
                };
                Ok(StreamingResponse::new(response.status, response.headers, Box::pin(body)))
            }
            Some(MockResponse::Success(response)) => Err(HttpError::ServerError {
                status: response.status,
                message: String::from_utf8_lossy(&response.body).into_owned(),
            }),
            Some(MockResponse::Error(err)) => Err(err),
            None => Err(HttpError::Other(format!(
                "No mock response for URL: {}",
                request.url
            ))),
        }
    }
}

//! Mock implementations for testing.
//!
//! Enables unit testing of the API client and event streams without network
//! access.
//!
//! # Available Mocks
//!
//! - [`MockHttpClient`] - transport with configurable responses and scripted streams

pub mod http;

pub use http::{MockHttpClient, MockResponse, MockStream, RecordedRequest};

//! Concrete implementations of trait abstractions.
//!
//! # Adapters
//!
//! - [`ReqwestHttpClient`] - HTTP transport using reqwest
//!
//! # Mock Implementations
//!
//! The [`mock`] submodule provides test doubles:
//! - [`mock::MockHttpClient`] - configurable responses, scripted chunked streams

pub mod mock;
pub mod reqwest_http;

pub use mock::{MockHttpClient, MockResponse, MockStream};
pub use reqwest_http::ReqwestHttpClient;

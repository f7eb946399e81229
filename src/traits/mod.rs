//! Trait abstractions for dependency injection and testability.
//!
//! # Traits
//!
//! - [`HttpClient`] - HTTP transport operations (buffered and streaming)

pub mod http;

pub use http::{
    ByteStream, Headers, HttpClient, HttpError, HttpRequest, Method, RequestBody, Response,
    StreamingResponse,
};

//! Error handling for the BeRay client.
//!
//! - **Categories**: [`ErrorCategory`] drives retry and messaging decisions
//! - **API errors**: [`ApiError`] classifies non-success responses by status
//! - **Stream errors**: [`StreamError`] ends an event stream that broke mid-read
//! - **Unified error**: [`BerayError`] wraps all of the above plus transport failures
//!
//! | Status | Variant | Category |
//! |--------|---------|----------|
//! | 401 | `Unauthorized` | Auth |
//! | 403 | `Forbidden` | Auth |
//! | 404 | `NotFound` | Client |
//! | 409 | `Conflict` | Client |
//! | 422 | `UnprocessableEntity` | Client |
//! | 5xx | `Status` | Server |

mod api;
mod beray_error;
mod category;
mod stream;

pub use api::ApiError;
pub use beray_error::BerayError;
pub use category::ErrorCategory;
pub use stream::StreamError;

/// Result alias used throughout the crate.
pub type BerayResult<T> = Result<T, BerayError>;

//! Typed request and response bodies of the BeRay API.
//!
//! Every response model keeps unrecognised fields in a flattened `extra` map,
//! so newer server versions never fail deserialization.

mod file;
mod task;
mod user;

pub use file::{FileEntry, FileKind, UploadResult};
pub use task::{CreateTaskRequest, MessageResponse, Task};
pub use user::{AuthResponse, User};

//! BeRay - typed async client for the BeRay task-automation API
//!
//! Covers authentication, user profile, task lifecycle, task workspace
//! files, and the live task update stream.
//!
//! ```ignore
//! use beray::{BerayClient, ClientConfig};
//! use futures::StreamExt;
//!
//! let client = BerayClient::new(ClientConfig::from_env())?;
//! client.login("me@example.com", "secret").await?;
//!
//! let task = client.create_task("Summarise the repository", None).await?;
//! let mut events = client.stream_events(task.id).await?;
//! while let Some(event) = events.next().await {
//!     println!("{:?}", event?);
//! }
//! ```

pub mod adapters;
pub mod cli;
pub mod client;
pub mod config;
pub mod error;
pub mod models;
pub mod session;
pub mod sse;
pub mod traits;

pub use client::{BerayClient, FileDownload};
pub use config::ClientConfig;
pub use error::{ApiError, BerayError, BerayResult, ErrorCategory, StreamError};
pub use session::Session;
pub use sse::{EventPayload, EventStream, TaskEvent};

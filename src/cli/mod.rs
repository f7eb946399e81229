//! CLI module for BeRay.
//!
//! This module provides the command-line interface:
//! - Argument parsing
//! - Version display
//! - Command handlers that call the API and print results
//!
//! # Usage
//!
//! ```ignore
//! use beray::cli::{parse_args, run_command, CliCommand};
//!
//! let command = parse_args(std::env::args());
//! run_command(&client, command, &mut std::io::stdout()).await?;
//! ```

pub mod args;
pub mod commands;
pub mod version;

pub use args::{parse_args, CliCommand, USAGE};
pub use commands::run_command;
pub use version::{version_string, VERSION};

//! Version command for the BeRay CLI.

/// The current version of beray, read from Cargo.toml at compile time.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Version line printed by `--version`.
pub fn version_string() -> String {
    format!("beray {}", VERSION)
}

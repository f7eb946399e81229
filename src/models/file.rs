//! Task workspace file models.
//!
//! Entries returned by `GET /tasks/{id}/files/tree` and the confirmation
//! returned after an upload.

use serde::{Deserialize, Serialize};

/// Kind of a workspace entry, from the `type` field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileKind {
    File,
    Directory,
    /// Anything the server adds later
    #[serde(other)]
    Other,
}

/// A file or directory entry from the file tree API
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileEntry {
    /// File or directory name (e.g., "main.py")
    pub name: String,
    #[serde(rename = "type")]
    pub kind: FileKind,
    /// Path relative to the task's working directory
    #[serde(default)]
    pub path: Option<String>,
    /// File size in bytes (None for directories)
    #[serde(default)]
    pub size: Option<u64>,
    /// Fields this client does not model
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl FileEntry {
    pub fn is_dir(&self) -> bool {
        self.kind == FileKind::Directory
    }

    /// Format file size for display (e.g., "1.2 KB", "3.4 MB")
    pub fn format_size(&self) -> Option<String> {
        self.size.map(|bytes| {
            if bytes < 1024 {
                format!("{} B", bytes)
            } else if bytes < 1024 * 1024 {
                format!("{:.1} KB", bytes as f64 / 1024.0)
            } else if bytes < 1024 * 1024 * 1024 {
                format!("{:.1} MB", bytes as f64 / (1024.0 * 1024.0))
            } else {
                format!("{:.1} GB", bytes as f64 / (1024.0 * 1024.0 * 1024.0))
            }
        })
    }
}

/// Confirmation returned by `PUT /tasks/{id}/files/content`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UploadResult {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub path: Option<String>,
    #[serde(default)]
    pub size: Option<u64>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

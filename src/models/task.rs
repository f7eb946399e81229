//! Task models.

use serde::{Deserialize, Deserializer, Serialize};

/// A task as returned by the `/tasks/` endpoints.
///
/// Only the fields the client relies on are typed; the rest of the server's
/// representation is kept in `extra`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    pub id: i64,
    /// Empty when the server sent none
    #[serde(default, deserialize_with = "null_as_empty")]
    pub goal: String,
    /// Server-side state, e.g. `RUNNING` or `COMPLETED`
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub tools: Option<Vec<String>>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl Task {
    /// Status for display, `unknown` when the server sent none.
    pub fn status_label(&self) -> &str {
        self.status.as_deref().unwrap_or("unknown")
    }
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

/// Body of `POST /tasks/`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CreateTaskRequest {
    pub goal: String,
    /// Serialized as `null` when absent
    pub tools: Option<Vec<String>>,
}

/// Generic `{"message": ...}` acknowledgement (stop, delete, logout).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MessageResponse {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

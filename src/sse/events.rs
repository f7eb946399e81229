//! Event-stream line, record, and decoded event types.

use serde::de::DeserializeOwned;
use serde::Serialize;

/// Event type used when a record carries no `event:` field.
pub const DEFAULT_EVENT_TYPE: &str = "message";

/// A single classified line of the event-stream wire format.
#[derive(Debug, Clone, PartialEq)]
pub enum SseLine {
    /// Blank line: end of the current record
    Empty,
    /// `: text` - comment or keepalive
    Comment(String),
    /// `event: <type>`
    Event(String),
    /// `data: <payload>`
    Data(String),
    /// `id: <last event id>`
    Id(String),
    /// A well-formed field line with a field name we do not use (e.g. `retry`)
    Other { field: String, value: String },
    /// A non-empty line with no `:` separator
    Malformed(String),
}

/// One complete record, assembled once its terminating blank line was seen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventRecord {
    /// Event type, `"message"` when the record had none
    pub event: String,
    /// All `data` lines of the record joined with `\n`
    pub data: String,
    pub id: Option<String>,
}

/// The payload of a decoded event.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum EventPayload {
    /// The data parsed as JSON
    Json(serde_json::Value),
    /// The data was not valid JSON and is passed through verbatim
    Text(String),
}

impl EventPayload {
    /// Decode record data: JSON when it parses, raw text otherwise.
    pub fn decode(data: &str) -> Self {
        match serde_json::from_str(data) {
            Ok(value) => EventPayload::Json(value),
            Err(e) => {
                tracing::debug!("Event data is not JSON ({}), passing through as text", e);
                EventPayload::Text(data.to_string())
            }
        }
    }
}

/// A task update as delivered to callers of [`crate::BerayClient::stream_events`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TaskEvent {
    /// Event type (`"message"` unless the server named one)
    pub event: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(rename = "data")]
    pub payload: EventPayload,
}

impl TaskEvent {
    /// Decode a complete record. Never fails: undecodable data becomes text.
    pub fn from_record(record: EventRecord) -> Self {
        Self {
            payload: EventPayload::decode(&record.data),
            event: record.event,
            id: record.id,
        }
    }

    pub fn is_json(&self) -> bool {
        matches!(self.payload, EventPayload::Json(_))
    }

    /// The parsed payload, if the data was JSON.
    pub fn json(&self) -> Option<&serde_json::Value> {
        match &self.payload {
            EventPayload::Json(value) => Some(value),
            EventPayload::Text(_) => None,
        }
    }

    /// The raw payload, if the data was not JSON.
    pub fn text(&self) -> Option<&str> {
        match &self.payload {
            EventPayload::Text(text) => Some(text),
            EventPayload::Json(_) => None,
        }
    }

    /// Look up a top-level key of a JSON object payload.
    pub fn get(&self, key: &str) -> Option<&serde_json::Value> {
        self.json().and_then(|value| value.get(key))
    }

    /// Deserialize the payload into a typed structure.
    ///
    /// A text payload is treated as a JSON string.
    pub fn deserialize<T: DeserializeOwned>(&self) -> Result<T, serde_json::Error> {
        match &self.payload {
            EventPayload::Json(value) => serde_json::from_value(value.clone()),
            EventPayload::Text(text) => {
                serde_json::from_value(serde_json::Value::String(text.clone()))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use serde_json::json;

    fn record(event: &str, data: &str) -> EventRecord {
        EventRecord {
            event: event.to_string(),
            data: data.to_string(),
            id: None,
        }
    }

    #[test]
    fn test_json_payload() {
        let event = TaskEvent::from_record(record("status", r#"{"state":"running"}"#));
        assert_eq!(event.event, "status");
        assert_eq!(event.json(), Some(&json!({"state": "running"})));
        assert_eq!(event.get("state"), Some(&json!("running")));
        assert!(event.text().is_none());
    }

    #[test]
    fn test_text_fallback() {
        let event = TaskEvent::from_record(record("message", "not-json"));
        assert_eq!(event.payload, EventPayload::Text("not-json".to_string()));
        assert!(!event.is_json());
        assert!(event.get("anything").is_none());
    }

    #[test]
    fn test_multiline_json_payload() {
        let event = TaskEvent::from_record(record("message", "{\n\"a\": 1\n}"));
        assert_eq!(event.json(), Some(&json!({"a": 1})));
    }

    #[test]
    fn test_deserialize_typed() {
        #[derive(Debug, Deserialize, PartialEq)]
        struct Status {
            state: String,
        }

        let event = TaskEvent::from_record(record("status", r#"{"state":"done"}"#));
        let status: Status = event.deserialize().unwrap();
        assert_eq!(status.state, "done");

        let text = TaskEvent::from_record(record("log", "plain line"));
        let line: String = text.deserialize().unwrap();
        assert_eq!(line, "plain line");
    }

    #[test]
    fn test_serialize() {
        let event = TaskEvent::from_record(record("status", r#"{"state":"running"}"#));
        assert_eq!(
            serde_json::to_value(&event).unwrap(),
            json!({"event": "status", "data": {"state": "running"}})
        );

        let mut with_id = TaskEvent::from_record(record("message", "hi"));
        with_id.id = Some("7".to_string());
        assert_eq!(
            serde_json::to_value(&with_id).unwrap(),
            json!({"event": "message", "id": "7", "data": "hi"})
        );
    }
}

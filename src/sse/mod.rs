//! SSE (Server-Sent Events) task update stream
//!
//! Turns the body of `GET /tasks/{id}/stream` into decoded task events.
//! SSE format consists of:
//! - `event: <type>` - event type line (defaults to `message`, last one wins)
//! - `data: <payload>` - data payload line, repeated lines are joined with `\n`
//! - `id: <id>` - optional event id
//! - Empty line - signals end of event
//! - Lines starting with `:` - comments (ignored)
//!
//! # Module structure
//! - `line_buffer` - Splits raw chunks into lines across read boundaries
//! - `parser` - Line classification and record assembly (SseParser)
//! - `events` - Line, record and decoded event types (TaskEvent, EventPayload)
//! - `decoder` - Chunk-in, events-out combination of the two
//! - `stream` - The lazy, cancellable event sequence over an open connection

mod decoder;
mod events;
mod line_buffer;
mod parser;
mod stream;

// Re-export public types
pub use decoder::EventDecoder;
pub use events::{EventPayload, EventRecord, SseLine, TaskEvent, DEFAULT_EVENT_TYPE};
pub use line_buffer::LineBuffer;
pub use parser::{parse_sse_line, SseParser};
pub use stream::{event_stream, EventStream};

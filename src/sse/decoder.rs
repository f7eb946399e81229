//! Bytes-in, events-out decoder combining [`LineBuffer`] and [`SseParser`].

use tracing::warn;

use super::events::TaskEvent;
use super::line_buffer::LineBuffer;
use super::parser::SseParser;

/// Decodes an event-stream body one chunk at a time.
#[derive(Debug, Default)]
pub struct EventDecoder {
    lines: LineBuffer,
    parser: SseParser,
}

impl EventDecoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Consume a chunk and return the events whose records it completed, in order.
    pub fn push(&mut self, chunk: &[u8]) -> Vec<TaskEvent> {
        self.lines
            .push(chunk)
            .iter()
            .filter_map(|line| self.parser.feed_line(line))
            .map(TaskEvent::from_record)
            .collect()
    }

    /// Whether an unterminated line or record is buffered.
    pub fn has_partial(&self) -> bool {
        !self.lines.is_empty() || self.parser.has_pending()
    }

    /// End of input. Incomplete trailing data cannot form a record and is dropped.
    pub fn finish(&mut self) {
        if self.has_partial() {
            warn!(
                "Discarding incomplete event at end of stream ({} unterminated bytes)",
                self.lines.pending_len()
            );
        }
        self.lines.clear();
        self.parser.reset();
    }
}

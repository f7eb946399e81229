//! Record assembly from event-stream lines.
//!
//! [`parse_sse_line`] classifies one line; [`SseParser`] accumulates field
//! lines until a blank line closes the record.

use tracing::{debug, trace};

use super::events::{EventRecord, SseLine, DEFAULT_EVENT_TYPE};

/// Parse a single SSE line into its component type
pub fn parse_sse_line(line: &str) -> SseLine {
    if line.is_empty() {
        return SseLine::Empty;
    }

    if let Some(comment) = line.strip_prefix(':') {
        return SseLine::Comment(strip_one_space(comment).to_string());
    }

    let Some((field, value)) = line.split_once(':') else {
        return SseLine::Malformed(line.to_string());
    };
    let value = strip_one_space(value).to_string();

    match field {
        "event" => SseLine::Event(value),
        "data" => SseLine::Data(value),
        "id" => SseLine::Id(value),
        _ => SseLine::Other {
            field: field.to_string(),
            value,
        },
    }
}

fn strip_one_space(value: &str) -> &str {
    value.strip_prefix(' ').unwrap_or(value)
}

/// Stateful SSE parser that accumulates lines and emits complete records
#[derive(Debug, Default)]
pub struct SseParser {
    /// Latest `event:` value of the record under construction
    current_event_type: Option<String>,
    /// Accumulated data lines (SSE allows multiple data: lines)
    data_buffer: Vec<String>,
    current_id: Option<String>,
}

impl SseParser {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed a line to the parser, returning a record when the line closes one.
    pub fn feed_line(&mut self, line: &str) -> Option<EventRecord> {
        match parse_sse_line(line) {
            SseLine::Empty => self.dispatch(),
            SseLine::Event(event_type) => {
                // An empty type falls back to the default, like a missing one
                self.current_event_type = Some(event_type).filter(|t| !t.is_empty());
                None
            }
            SseLine::Data(data) => {
                self.data_buffer.push(data);
                None
            }
            SseLine::Id(id) => {
                self.current_id = Some(id);
                None
            }
            SseLine::Comment(text) => {
                trace!("SSE comment: {}", text);
                None
            }
            SseLine::Other { field, .. } => {
                debug!("Ignoring SSE field '{}'", field);
                None
            }
            SseLine::Malformed(line) => {
                debug!("Ignoring SSE line without separator: {:?}", line);
                None
            }
        }
    }

    /// Whether field lines have been seen since the last record boundary.
    pub fn has_pending(&self) -> bool {
        self.current_event_type.is_some()
            || !self.data_buffer.is_empty()
            || self.current_id.is_some()
    }

    /// Reset the parser state
    pub fn reset(&mut self) {
        self.current_event_type = None;
        self.data_buffer.clear();
        self.current_id = None;
    }

    fn dispatch(&mut self) -> Option<EventRecord> {
        if self.data_buffer.is_empty() {
            if self.has_pending() {
                debug!("SSE record closed without data lines, skipping");
            }
            self.reset();
            return None;
        }

        let record = EventRecord {
            event: self
                .current_event_type
                .take()
                .unwrap_or_else(|| DEFAULT_EVENT_TYPE.to_string()),
            data: self.data_buffer.join("\n"),
            id: self.current_id.take(),
        };
        self.data_buffer.clear();
        Some(record)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn feed_all(parser: &mut SseParser, lines: &[&str]) -> Vec<EventRecord> {
        lines.iter().filter_map(|l| parser.feed_line(l)).collect()
    }

    #[test]
    fn test_parse_empty_line() {
        assert_eq!(parse_sse_line(""), SseLine::Empty);
    }

    #[test]
    fn test_parse_comment_line() {
        assert_eq!(
            parse_sse_line(": keepalive"),
            SseLine::Comment("keepalive".to_string())
        );
        assert_eq!(parse_sse_line(":"), SseLine::Comment(String::new()));
    }

    #[test]
    fn test_parse_field_lines() {
        assert_eq!(
            parse_sse_line("event: status"),
            SseLine::Event("status".to_string())
        );
        assert_eq!(parse_sse_line("data:{}"), SseLine::Data("{}".to_string()));
        assert_eq!(parse_sse_line("id: 42"), SseLine::Id("42".to_string()));
        assert_eq!(
            parse_sse_line("retry: 3000"),
            SseLine::Other {
                field: "retry".to_string(),
                value: "3000".to_string()
            }
        );
    }

    #[test]
    fn test_only_one_leading_space_removed() {
        assert_eq!(
            parse_sse_line("data:   indented"),
            SseLine::Data("  indented".to_string())
        );
        assert_eq!(
            parse_sse_line("data: a: b"),
            SseLine::Data("a: b".to_string())
        );
    }

    #[test]
    fn test_parse_malformed_line() {
        assert_eq!(
            parse_sse_line("garbage"),
            SseLine::Malformed("garbage".to_string())
        );
    }

    #[test]
    fn test_multiple_data_lines_joined() {
        let mut parser = SseParser::new();
        let records = feed_all(&mut parser, &["data: foo", "data: bar", ""]);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].data, "foo\nbar");
        assert_eq!(records[0].event, "message");
    }

    #[test]
    fn test_event_type_last_wins() {
        let mut parser = SseParser::new();
        let records = feed_all(&mut parser, &["event: first", "event: second", "data: x", ""]);
        assert_eq!(records[0].event, "second");
    }

    #[test]
    fn test_state_resets_between_records() {
        let mut parser = SseParser::new();
        let records = feed_all(
            &mut parser,
            &["event: status", "id: 1", "data: a", "", "data: b", ""],
        );
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].event, "status");
        assert_eq!(records[0].id.as_deref(), Some("1"));
        assert_eq!(records[1].event, "message");
        assert_eq!(records[1].id, None);
        assert!(!parser.has_pending());
    }

    #[test]
    fn test_empty_event_type_uses_default() {
        let mut parser = SseParser::new();
        let records = feed_all(&mut parser, &["event:", "data: x", ""]);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].event, "message");

        let records = feed_all(&mut parser, &["event: status", "event:", "data: y", ""]);
        assert_eq!(records[0].event, "message");
    }

    #[test]
    fn test_record_without_data_is_not_emitted() {
        let mut parser = SseParser::new();
        let records = feed_all(&mut parser, &["event: ping", "", "", "data: x", ""]);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].event, "message");
    }

    #[test]
    fn test_empty_data_line_emits_empty_payload() {
        let mut parser = SseParser::new();
        let records = feed_all(&mut parser, &["data:", ""]);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].data, "");
    }

    #[test]
    fn test_ignored_lines_do_not_break_record() {
        let mut parser = SseParser::new();
        let records = feed_all(
            &mut parser,
            &["data: a", ": comment", "retry: 10", "junk", "data: b", ""],
        );
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].data, "a\nb");
    }

    #[test]
    fn test_reset_discards_partial_record() {
        let mut parser = SseParser::new();
        assert!(parser.feed_line("data: partial").is_none());
        assert!(parser.has_pending());
        parser.reset();
        assert!(!parser.has_pending());
        assert!(parser.feed_line("").is_none());
    }
}

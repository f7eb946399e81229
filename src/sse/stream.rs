//! Lazy event sequence over an open event-stream body.
//!
//! [`event_stream`] turns a transport [`ByteStream`] into a pull-based
//! [`EventStream`]. Nothing is read from the connection until the consumer
//! polls, each poll reads at most as many chunks as it takes to complete the
//! next record, and the connection is dropped as soon as the sequence reaches
//! a terminal state or the stream itself is dropped.

use std::collections::VecDeque;
use std::pin::Pin;
use std::time::Duration;

use futures::stream::{self, Stream, StreamExt};
use tracing::{debug, info, warn};

use super::decoder::EventDecoder;
use super::events::TaskEvent;
use crate::error::{BerayResult, StreamError};
use crate::traits::ByteStream;

/// Decoded task events, ending normally when the server closes the stream
/// or with a single `Err` when the connection breaks.
pub type EventStream = Pin<Box<dyn Stream<Item = BerayResult<TaskEvent>> + Send>>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Open,
    Ended,
    Failed,
}

/// Position of one event sequence: the open body, buffered decoder state,
/// and events already decoded from the current chunk.
struct StreamCursor {
    body: Option<ByteStream>,
    decoder: EventDecoder,
    ready: VecDeque<TaskEvent>,
    idle_timeout: Option<Duration>,
    phase: Phase,
    delivered: usize,
}

impl StreamCursor {
    fn new(body: ByteStream, idle_timeout: Option<Duration>) -> Self {
        Self {
            body: Some(body),
            decoder: EventDecoder::new(),
            ready: VecDeque::new(),
            idle_timeout,
            phase: Phase::Open,
            delivered: 0,
        }
    }

    /// Produce the next item, or `None` once the sequence is over.
    async fn next_event(&mut self) -> Option<BerayResult<TaskEvent>> {
        loop {
            if let Some(event) = self.ready.pop_front() {
                self.delivered += 1;
                return Some(Ok(event));
            }
            if self.phase != Phase::Open {
                return None;
            }

            match self.read_chunk().await {
                Ok(Some(chunk)) => self.ready.extend(self.decoder.push(&chunk)),
                Ok(None) => self.finish(),
                Err(err) => {
                    self.fail(&err);
                    return Some(Err(err.into()));
                }
            }
        }
    }

    async fn read_chunk(&mut self) -> Result<Option<bytes::Bytes>, StreamError> {
        let Some(body) = self.body.as_mut() else {
            return Ok(None);
        };

        let next = match self.idle_timeout {
            Some(idle) => tokio::time::timeout(idle, body.next())
                .await
                .map_err(|_| StreamError::IdleTimeout { idle })?,
            None => body.next().await,
        };

        match next {
            Some(Ok(chunk)) => Ok(Some(chunk)),
            Some(Err(err)) => Err(StreamError::ConnectionLost {
                message: err.to_string(),
            }),
            None => Ok(None),
        }
    }

    fn finish(&mut self) {
        self.decoder.finish();
        self.body = None;
        self.phase = Phase::Ended;
        info!("Event stream closed by server after {} events", self.delivered);
    }

    fn fail(&mut self, err: &StreamError) {
        self.decoder.finish();
        self.body = None;
        self.ready.clear();
        self.phase = Phase::Failed;
        warn!("Event stream failed after {} events: {}", self.delivered, err);
    }
}

impl Drop for StreamCursor {
    fn drop(&mut self) {
        if self.body.is_some() {
            debug!(
                "Event stream dropped by consumer after {} events, closing connection",
                self.delivered
            );
        }
    }
}

/// Wrap an open event-stream body in a lazy sequence of [`TaskEvent`]s.
///
/// With `idle_timeout` set, a gap longer than it between chunks fails the
/// sequence with [`StreamError::IdleTimeout`].
pub fn event_stream(body: ByteStream, idle_timeout: Option<Duration>) -> EventStream {
    let cursor = StreamCursor::new(body, idle_timeout);
    let events = stream::unfold(cursor, |mut cursor| async move {
        let item = cursor.next_event().await?;
        Some((item, cursor))
    });
    Box::pin(events.fuse())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::mock::MockStream;
    use crate::error::BerayError;
    use crate::traits::HttpError;
    use serde_json::json;

    fn events_from(script: MockStream) -> EventStream {
        event_stream(script.into_byte_stream(), None)
    }

    #[tokio::test]
    async fn test_yields_events_then_ends() {
        let mut events = events_from(MockStream::from_chunks([
            "event: status\ndata: {\"state\":\"running\"}\n\n",
            "data: foo\ndata: bar\n\n",
        ]));

        let first = events.next().await.unwrap().unwrap();
        assert_eq!(first.event, "status");
        assert_eq!(first.get("state"), Some(&json!("running")));

        let second = events.next().await.unwrap().unwrap();
        assert_eq!(second.text(), Some("foo\nbar"));

        assert!(events.next().await.is_none());
        assert!(events.next().await.is_none());
    }

    #[tokio::test]
    async fn test_record_split_across_chunks() {
        let mut events = events_from(MockStream::from_chunks([
            "ev", "ent: st", "atus\r", "\ndata: {\"a\"", ":1}\r\n", "\r\n",
        ]));

        let event = events.next().await.unwrap().unwrap();
        assert_eq!(event.event, "status");
        assert_eq!(event.json(), Some(&json!({"a": 1})));
        assert!(events.next().await.is_none());
    }

    #[tokio::test]
    async fn test_partial_record_discarded_at_close() {
        let mut events = events_from(MockStream::from_chunks([
            "data: complete\n\n",
            "event: status\ndata: {\"state\":",
        ]));

        let event = events.next().await.unwrap().unwrap();
        assert_eq!(event.text(), Some("complete"));
        assert!(events.next().await.is_none());
    }

    #[tokio::test]
    async fn test_transport_error_after_two_records() {
        let script = MockStream::from_chunks(["data: 1\n\ndata: 2\n\n", "data: 3"])
            .fail(HttpError::Io("connection reset".to_string()));
        let items: Vec<_> = events_from(script).collect().await;

        assert_eq!(items.len(), 3);
        assert_eq!(items[0].as_ref().unwrap().json(), Some(&json!(1)));
        assert_eq!(items[1].as_ref().unwrap().json(), Some(&json!(2)));
        assert!(matches!(
            items[2],
            Err(BerayError::Stream(StreamError::ConnectionLost { .. }))
        ));
    }

    #[tokio::test]
    async fn test_no_items_after_failure() {
        let script = MockStream::new()
            .fail(HttpError::Timeout("read".to_string()))
            .chunk("data: late\n\n");
        let mut events = events_from(script);

        assert!(events.next().await.unwrap().is_err());
        assert!(events.next().await.is_none());
    }

    #[tokio::test]
    async fn test_idle_timeout() {
        let script = MockStream::from_chunks(["data: first\n\n"]).hold_open();
        let mut events = event_stream(script.into_byte_stream(), Some(Duration::from_millis(50)));

        assert!(events.next().await.unwrap().is_ok());
        let err = events.next().await.unwrap().unwrap_err();
        assert!(matches!(
            err,
            BerayError::Stream(StreamError::IdleTimeout { .. })
        ));
        assert!(events.next().await.is_none());
    }

    #[tokio::test]
    async fn test_empty_body_ends_immediately() {
        let mut events = events_from(MockStream::new());
        assert!(events.next().await.is_none());
    }
}

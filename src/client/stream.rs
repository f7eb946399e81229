//! Task update streaming.

use tracing::{info, warn};

use super::BerayClient;
use crate::error::BerayResult;
use crate::sse::{event_stream, EventStream};
use crate::traits::Method;

impl BerayClient {
    /// Open the live update stream of a task.
    ///
    /// Setup failures (e.g. 401 or 404) are returned here, before any event.
    /// The returned stream yields events in arrival order and ends when the
    /// server closes the connection; a broken connection ends it with one
    /// `Err` instead. Dropping the stream closes the connection. Every call
    /// opens a new, independent connection.
    pub async fn stream_events(&self, task_id: i64) -> BerayResult<EventStream> {
        if !self.session.is_authenticated() {
            warn!("Opening event stream for task {} without an access token", task_id);
        }

        let request = self
            .request(Method::Get, &format!("/tasks/{}/stream", task_id))
            .with_header("Accept", "text/event-stream")
            .with_header("Cache-Control", "no-cache");
        let response = self.execute_streaming(request).await?;
        info!("Event stream opened for task {}", task_id);

        Ok(event_stream(response.body, self.config.stream_idle_timeout))
    }
}

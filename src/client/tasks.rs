//! Task lifecycle endpoints.

use tracing::info;

use super::BerayClient;
use crate::error::BerayResult;
use crate::models::{CreateTaskRequest, MessageResponse, Task};
use crate::traits::Method;

impl BerayClient {
    /// Start a new task working towards `goal`, optionally restricted to `tools`.
    pub async fn create_task(&self, goal: &str, tools: Option<Vec<String>>) -> BerayResult<Task> {
        let body = CreateTaskRequest {
            goal: goal.to_string(),
            tools,
        };
        let request = self
            .request(Method::Post, "/tasks/")
            .with_json(serde_json::to_value(&body)?);
        let task: Task = self.execute_as(request).await?;
        info!("Created task {}", task.id);
        Ok(task)
    }

    /// All tasks of the signed-in user.
    pub async fn list_tasks(&self) -> BerayResult<Vec<Task>> {
        self.execute_as(self.request(Method::Get, "/tasks/")).await
    }

    pub async fn get_task(&self, task_id: i64) -> BerayResult<Task> {
        self.execute_as(self.request(Method::Get, &format!("/tasks/{}", task_id)))
            .await
    }

    /// Ask a running task to stop.
    pub async fn stop_task(&self, task_id: i64) -> BerayResult<MessageResponse> {
        self.execute_as(self.request(Method::Post, &format!("/tasks/{}/stop", task_id)))
            .await
    }

    /// Delete a task and its workspace.
    pub async fn delete_task(&self, task_id: i64) -> BerayResult<MessageResponse> {
        let response = self
            .execute_as(self.request(Method::Delete, &format!("/tasks/{}", task_id)))
            .await?;
        info!("Deleted task {}", task_id);
        Ok(response)
    }
}

//! JSON-over-HTTP task backend

use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::debug;

use super::{
    ApiError, AssistantReply, ChatBody, NewTask, Result, TaskApi, TaskBody, TaskListBody,
    TaskPatch,
};
use crate::task::{Task, TaskId, TaskUpdate};

#[derive(Debug, Clone)]
pub struct HttpBackend {
    client: reqwest::Client,
    base_url: String,
}

impl HttpBackend {
    pub fn new(base_url: &str) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("taskdeck/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn send(&self, request: reqwest::RequestBuilder) -> Result<reqwest::Response> {
        request.send().await.map_err(|e| {
            if e.is_connect() {
                ApiError::Unavailable(format!("cannot connect to {}", self.base_url))
            } else {
                ApiError::Transport(e)
            }
        })
    }
}

/// Decode a response body, turning error bodies and `{ok: false}` into
/// `ApiError::Rejected`.
async fn read_body<T: DeserializeOwned>(response: reqwest::Response) -> Result<T> {
    let status = response.status();
    let bytes = response.bytes().await?;

    let value: Value = match serde_json::from_slice(&bytes) {
        Ok(value) => value,
        Err(_) if !status.is_success() => return Err(ApiError::Status(status.as_u16())),
        Err(e) => return Err(ApiError::Decode(e)),
    };

    let refused = value.get("ok").and_then(Value::as_bool) == Some(false);
    if !status.is_success() || refused {
        return Err(ApiError::rejected(
            status.as_u16(),
            rejection_message(&value, status),
        ));
    }

    Ok(serde_json::from_value(value)?)
}

fn rejection_message(body: &Value, status: StatusCode) -> String {
    body.get("message")
        .and_then(Value::as_str)
        .or_else(|| body.get("error").and_then(Value::as_str))
        .or_else(|| status.canonical_reason())
        .unwrap_or("Request rejected")
        .to_string()
}

impl TaskApi for HttpBackend {
    async fn list_tasks(&self) -> Result<Vec<Task>> {
        debug!("GET /tasks");
        let response = self.send(self.client.get(self.url("/tasks"))).await?;
        let body: TaskListBody = read_body(response).await?;
        Ok(body.tasks)
    }

    async fn create_task(&self, task: &NewTask) -> Result<Task> {
        debug!("POST /tasks");
        let response = self
            .send(self.client.post(self.url("/tasks")).json(task))
            .await?;
        let body: TaskBody<Task> = read_body(response).await?;
        Ok(body.task)
    }

    async fn update_task(&self, id: TaskId, patch: &TaskPatch) -> Result<TaskUpdate> {
        debug!("PATCH /tasks/{}", id);
        let response = self
            .send(
                self.client
                    .patch(self.url(&format!("/tasks/{}", id)))
                    .json(patch),
            )
            .await?;
        let body: TaskBody<TaskUpdate> = read_body(response).await?;
        Ok(body.task)
    }

    async fn delete_task(&self, id: TaskId) -> Result<()> {
        debug!("DELETE /tasks/{}", id);
        let response = self
            .send(self.client.delete(self.url(&format!("/tasks/{}", id))))
            .await?;
        let _: Value = read_body(response).await?;
        Ok(())
    }

    async fn undo_delete(&self) -> Result<Task> {
        debug!("POST /tasks/undo-delete");
        let response = self
            .send(self.client.post(self.url("/tasks/undo-delete")))
            .await?;
        let body: TaskBody<Task> = read_body(response).await?;
        Ok(body.task)
    }

    async fn reset_tasks(&self) -> Result<()> {
        debug!("DELETE /tasks/reset");
        let response = self
            .send(self.client.delete(self.url("/tasks/reset")))
            .await?;
        let _: Value = read_body(response).await?;
        Ok(())
    }

    async fn chat(&self, message: &str) -> Result<AssistantReply> {
        debug!("POST /chat");
        let response = self
            .send(
                self.client
                    .post(self.url("/chat"))
                    .json(&serde_json::json!({ "message": message })),
            )
            .await?;
        let body: ChatBody = read_body(response).await?;
        Ok(body.result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_trailing_slash_trimmed() {
        let backend = HttpBackend::new("http://localhost:5000/").unwrap();
        assert_eq!(backend.base_url(), "http://localhost:5000");
        assert_eq!(backend.url("/tasks"), "http://localhost:5000/tasks");
    }

    #[test]
    fn test_rejection_message_prefers_message_field() {
        let body = serde_json::json!({"ok": false, "error": "not_found", "message": "Resource not found"});
        assert_eq!(
            rejection_message(&body, StatusCode::NOT_FOUND),
            "Resource not found"
        );
    }

    #[test]
    fn test_rejection_message_falls_back_to_reason() {
        let body = serde_json::json!({"ok": false});
        assert_eq!(
            rejection_message(&body, StatusCode::BAD_REQUEST),
            "Bad Request"
        );
    }
}

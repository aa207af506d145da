//! REST backend collaborator
//!
//! `TaskApi` is the seam between the client state and the server. The HTTP
//! implementation talks JSON to the task backend; tests swap in `MockApi`.

mod error;
mod http;
#[cfg(any(test, feature = "test-support"))]
pub mod mock;

pub use error::{ApiError, Result};
pub use http::HttpBackend;

use serde::{Deserialize, Serialize};

use crate::task::{Task, TaskId, TaskUpdate};

/// Body of `POST /tasks`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewTask {
    pub description: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub reminder: Option<String>,
}

/// Body of `PATCH /tasks/{id}`. Only supplied fields are sent; a supplied
/// reminder of `None` is sent as `null` and clears the server value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TaskPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub completed: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub reminder: Option<Option<String>>,
}

impl TaskPatch {
    pub fn completed(completed: bool) -> Self {
        Self {
            completed: Some(completed),
            ..Self::default()
        }
    }

    pub fn edit(description: impl Into<String>, reminder: Option<String>) -> Self {
        Self {
            description: Some(description.into()),
            completed: None,
            reminder: Some(reminder),
        }
    }
}

/// Raw assistant reply envelope from `POST /chat`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AssistantReply {
    #[serde(default)]
    pub function: Option<String>,

    #[serde(default)]
    pub arguments: Option<serde_json::Value>,

    #[serde(default)]
    pub reply: Option<String>,
}

impl AssistantReply {
    pub fn text(reply: impl Into<String>) -> Self {
        Self {
            function: None,
            arguments: None,
            reply: Some(reply.into()),
        }
    }

    pub fn call(function: impl Into<String>, arguments: serde_json::Value) -> Self {
        Self {
            function: Some(function.into()),
            arguments: Some(arguments),
            reply: None,
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct TaskListBody {
    #[serde(default)]
    pub tasks: Vec<Task>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct TaskBody<T> {
    pub task: T,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ChatBody {
    pub result: AssistantReply,
}

/// Operations offered by the task backend
#[allow(async_fn_in_trait)]
pub trait TaskApi {
    async fn list_tasks(&self) -> Result<Vec<Task>>;

    async fn create_task(&self, task: &NewTask) -> Result<Task>;

    async fn update_task(&self, id: TaskId, patch: &TaskPatch) -> Result<TaskUpdate>;

    async fn delete_task(&self, id: TaskId) -> Result<()>;

    async fn undo_delete(&self) -> Result<Task>;

    async fn reset_tasks(&self) -> Result<()>;

    async fn chat(&self, message: &str) -> Result<AssistantReply>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_new_task_omits_absent_reminder() {
        let body = NewTask {
            description: "Buy milk".to_string(),
            reminder: None,
        };
        assert_eq!(
            serde_json::to_value(&body).unwrap(),
            json!({"description": "Buy milk"})
        );
    }

    #[test]
    fn test_patch_toggle_sends_only_completed() {
        let patch = TaskPatch::completed(true);
        assert_eq!(
            serde_json::to_value(&patch).unwrap(),
            json!({"completed": true})
        );
    }

    #[test]
    fn test_patch_edit_sends_null_reminder_to_clear() {
        let patch = TaskPatch::edit("Walk dog", None);
        assert_eq!(
            serde_json::to_value(&patch).unwrap(),
            json!({"description": "Walk dog", "reminder": null})
        );
    }

    #[test]
    fn test_assistant_reply_parses_function_call() {
        let reply: AssistantReply = serde_json::from_value(json!({
            "function": "completeTask",
            "arguments": {"task_number": 2}
        }))
        .unwrap();
        assert_eq!(reply.function.as_deref(), Some("completeTask"));
        assert_eq!(reply.arguments.unwrap()["task_number"], 2);
        assert!(reply.reply.is_none());
    }

    #[test]
    fn test_assistant_reply_parses_plain_reply_with_null_function() {
        let reply: AssistantReply =
            serde_json::from_value(json!({"function": null, "reply": "Hi!"})).unwrap();
        assert!(reply.function.is_none());
        assert_eq!(reply.reply.as_deref(), Some("Hi!"));
    }

    #[test]
    fn test_error_rejection_flag() {
        assert!(ApiError::rejected(404, "Resource not found").is_rejection());
        assert!(!ApiError::Status(502).is_rejection());
        assert_eq!(
            ApiError::rejected(200, "Nothing to undo").to_string(),
            "Nothing to undo"
        );
    }
}

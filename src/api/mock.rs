//! In-memory task backend for tests
//!
//! Mirrors the server's observable behavior: sequential ids, trimmed
//! descriptions, a single remembered deletion for undo, and error bodies for
//! unknown ids. Every call is recorded so tests can assert that validation
//! failures never reach the backend.

use std::collections::VecDeque;
use std::sync::{Mutex, MutexGuard};

use super::{ApiError, AssistantReply, NewTask, Result, TaskApi, TaskPatch};
use crate::task::{Task, TaskId, TaskUpdate};

#[derive(Debug, Default)]
struct MockState {
    tasks: Vec<Task>,
    next_id: u64,
    last_deleted: Option<Task>,
    chat_replies: VecDeque<Result<AssistantReply>>,
    offline: bool,
    reject_next: Option<String>,
    requests: Vec<String>,
}

#[derive(Debug, Default)]
pub struct MockApi {
    state: Mutex<MockState>,
}

impl MockApi {
    pub fn new() -> Self {
        Self::with_tasks(Vec::new())
    }

    pub fn with_tasks(tasks: Vec<Task>) -> Self {
        let next_id = tasks.iter().map(|t| t.id.0).max().unwrap_or(0) + 1;
        Self {
            state: Mutex::new(MockState {
                tasks,
                next_id,
                ..MockState::default()
            }),
        }
    }

    fn state(&self) -> MutexGuard<'_, MockState> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Server-side copy of the collection
    pub fn tasks(&self) -> Vec<Task> {
        self.state().tasks.clone()
    }

    pub fn requests(&self) -> Vec<String> {
        self.state().requests.clone()
    }

    pub fn request_count(&self) -> usize {
        self.state().requests.len()
    }

    /// Every following call fails as if the server were unreachable
    pub fn set_offline(&self, offline: bool) {
        self.state().offline = offline;
    }

    /// The next call answers `{ok: false, message}`
    pub fn reject_next(&self, message: &str) {
        self.state().reject_next = Some(message.to_string());
    }

    pub fn push_chat_reply(&self, reply: AssistantReply) {
        self.state().chat_replies.push_back(Ok(reply));
    }

    pub fn push_chat_failure(&self) {
        self.state()
            .chat_replies
            .push_back(Err(ApiError::Status(500)));
    }

    fn begin(&self, request: String) -> Result<MutexGuard<'_, MockState>> {
        let mut state = self.state();
        state.requests.push(request);
        if state.offline {
            return Err(ApiError::Unavailable("mock backend offline".to_string()));
        }
        if let Some(message) = state.reject_next.take() {
            return Err(ApiError::rejected(400, message));
        }
        Ok(state)
    }
}

fn not_found() -> ApiError {
    ApiError::rejected(404, "Resource not found")
}

impl TaskApi for MockApi {
    async fn list_tasks(&self) -> Result<Vec<Task>> {
        let state = self.begin("GET /tasks".to_string())?;
        let mut tasks = state.tasks.clone();
        tasks.sort_by_key(|t| t.id);
        Ok(tasks)
    }

    async fn create_task(&self, task: &NewTask) -> Result<Task> {
        let mut state = self.begin("POST /tasks".to_string())?;
        let description = task.description.trim();
        if description.is_empty() {
            return Err(ApiError::rejected(400, "description is required"));
        }

        let created = Task {
            id: TaskId(state.next_id),
            description: description.to_string(),
            completed: false,
            reminder: task.reminder.clone(),
        };
        state.next_id += 1;
        state.tasks.push(created.clone());
        Ok(created)
    }

    async fn update_task(&self, id: TaskId, patch: &TaskPatch) -> Result<TaskUpdate> {
        let mut state = self.begin(format!("PATCH /tasks/{}", id))?;
        let task = state
            .tasks
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or_else(not_found)?;

        if let Some(completed) = patch.completed {
            task.completed = completed;
        }
        if let Some(description) = &patch.description {
            let description = description.trim();
            if !description.is_empty() {
                task.description = description.to_string();
            }
        }
        if let Some(reminder) = &patch.reminder {
            task.reminder = reminder.clone();
        }

        Ok(TaskUpdate::from(task.clone()))
    }

    async fn delete_task(&self, id: TaskId) -> Result<()> {
        let mut state = self.begin(format!("DELETE /tasks/{}", id))?;
        let index = state
            .tasks
            .iter()
            .position(|t| t.id == id)
            .ok_or_else(not_found)?;
        let removed = state.tasks.remove(index);
        state.last_deleted = Some(removed);
        Ok(())
    }

    async fn undo_delete(&self) -> Result<Task> {
        let mut state = self.begin("POST /tasks/undo-delete".to_string())?;
        let deleted = state
            .last_deleted
            .take()
            .ok_or_else(|| ApiError::rejected(200, "Nothing to undo"))?;

        let restored = Task {
            id: TaskId(state.next_id),
            ..deleted
        };
        state.next_id += 1;
        state.tasks.push(restored.clone());
        Ok(restored)
    }

    async fn reset_tasks(&self) -> Result<()> {
        let mut state = self.begin("DELETE /tasks/reset".to_string())?;
        state.tasks.clear();
        state.last_deleted = None;
        Ok(())
    }

    async fn chat(&self, message: &str) -> Result<AssistantReply> {
        let mut state = self.begin("POST /chat".to_string())?;
        state
            .chat_replies
            .pop_front()
            .unwrap_or_else(|| Ok(AssistantReply::text(format!("echo: {}", message))))
    }
}

//! Client-side task state
//!
//! `TaskClient` caches the server's collection, applies the server's answers
//! to it, and reports which views an operation invalidated. Failures never
//! escape an operation: they are logged and turned into notices.

mod notice;
pub mod view;


pub use notice::{Notice, NoticeLevel};

use tracing::{debug, error, warn};

use crate::api::{ApiError, NewTask, TaskApi, TaskPatch};
use crate::task::{Task, TaskId};

/// Views invalidated by an operation
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Refresh {
    pub list: bool,
    pub calendar: bool,
    pub counters: bool,
}

impl Refresh {
    pub const NONE: Refresh = Refresh {
        list: false,
        calendar: false,
        counters: false,
    };

    pub const ALL: Refresh = Refresh {
        list: true,
        calendar: true,
        counters: true,
    };

    /// Completion changes never move a task on the calendar
    pub const LIST_AND_COUNTERS: Refresh = Refresh {
        list: true,
        calendar: false,
        counters: true,
    };

    pub fn any(&self) -> bool {
        self.list || self.calendar || self.counters
    }

    pub fn union(self, other: Refresh) -> Refresh {
        Refresh {
            list: self.list || other.list,
            calendar: self.calendar || other.calendar,
            counters: self.counters || other.counters,
        }
    }
}

pub struct TaskClient<A> {
    api: A,
    tasks: Vec<Task>,
    deleted_task: Option<Task>,
    notices: Vec<Notice>,
}

impl<A: TaskApi> TaskClient<A> {
    pub fn new(api: A) -> Self {
        Self {
            api,
            tasks: Vec::new(),
            deleted_task: None,
            notices: Vec::new(),
        }
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    /// Cached tasks, ascending by id
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn get(&self, id: TaskId) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    /// Snapshot kept for single-level undo
    pub fn deleted_task(&self) -> Option<&Task> {
        self.deleted_task.as_ref()
    }

    /// Resolve a 1-based display number to the task's real id
    pub fn id_for_display_number(&self, number: usize) -> Option<TaskId> {
        number
            .checked_sub(1)
            .and_then(|idx| self.tasks.get(idx))
            .map(|t| t.id)
    }

    pub fn notify(&mut self, notice: Notice) {
        self.notices.push(notice);
    }

    pub fn take_notices(&mut self) -> Vec<Notice> {
        std::mem::take(&mut self.notices)
    }

    fn report(&mut self, action: &str, err: ApiError) {
        if err.is_rejection() {
            warn!("Server rejected {}: {}", action, err);
            self.notify(Notice::warning(err.to_string()));
        } else {
            error!("Failed to {}: {}", action, err);
            self.notify(Notice::error(format!(
                "Could not {}. Is the server reachable?",
                action
            )));
        }
    }

    fn insert(&mut self, task: Task) {
        match self.tasks.binary_search_by_key(&task.id, |t| t.id) {
            Ok(idx) => self.tasks[idx] = task,
            Err(idx) => self.tasks.insert(idx, task),
        }
    }

    pub async fn load_all(&mut self) -> Refresh {
        match self.api.list_tasks().await {
            Ok(mut tasks) => {
                tasks.sort_by_key(|t| t.id);
                tasks.dedup_by_key(|t| t.id);
                debug!("Loaded {} tasks", tasks.len());
                self.tasks = tasks;
                Refresh::ALL
            }
            Err(e) => {
                self.report("load tasks", e);
                Refresh::NONE
            }
        }
    }

    pub async fn create(&mut self, description: &str, reminder: Option<String>) -> Refresh {
        let description = description.trim();
        if description.is_empty() {
            self.notify(Notice::warning("Please enter a task description"));
            return Refresh::NONE;
        }

        let body = NewTask {
            description: description.to_string(),
            reminder,
        };
        match self.api.create_task(&body).await {
            Ok(task) => {
                debug!("Created task {}", task.id);
                self.insert(task);
                self.notify(Notice::info("Task added"));
                Refresh::ALL
            }
            Err(e) => {
                self.report("add the task", e);
                Refresh::NONE
            }
        }
    }

    pub async fn toggle_completion(&mut self, id: TaskId) -> Refresh {
        let Some(task) = self.get(id) else {
            return Refresh::NONE;
        };
        let completed = !task.completed;
        self.set_completed(id, completed).await
    }

    pub async fn set_completed(&mut self, id: TaskId, completed: bool) -> Refresh {
        if self.get(id).is_none() {
            return Refresh::NONE;
        }

        match self
            .api
            .update_task(id, &TaskPatch::completed(completed))
            .await
        {
            Ok(update) => {
                if let Some(task) = self.tasks.iter_mut().find(|t| t.id == id) {
                    task.merge(update);
                }
                Refresh::LIST_AND_COUNTERS
            }
            Err(e) => {
                self.report("update the task", e);
                Refresh::NONE
            }
        }
    }

    /// Replace description and reminder. A `None` reminder clears it.
    pub async fn edit(
        &mut self,
        id: TaskId,
        description: &str,
        reminder: Option<String>,
    ) -> Refresh {
        if self.get(id).is_none() {
            return Refresh::NONE;
        }

        let description = description.trim();
        if description.is_empty() {
            self.notify(Notice::warning("Task description cannot be empty"));
            return Refresh::NONE;
        }

        match self
            .api
            .update_task(id, &TaskPatch::edit(description, reminder))
            .await
        {
            Ok(update) => {
                if let Some(task) = self.tasks.iter_mut().find(|t| t.id == id) {
                    task.merge(update);
                }
                self.notify(Notice::info("Task updated"));
                Refresh::ALL
            }
            Err(e) => {
                self.report("edit the task", e);
                Refresh::NONE
            }
        }
    }

    /// Delete a task. The undo snapshot is taken before the request is sent
    /// and is kept even when the request fails.
    pub async fn remove(&mut self, id: TaskId) -> Refresh {
        let Some(task) = self.get(id).cloned() else {
            return Refresh::NONE;
        };
        self.deleted_task = Some(task);

        match self.api.delete_task(id).await {
            Ok(()) => {
                self.tasks.retain(|t| t.id != id);
                self.notify(Notice::info("Task deleted"));
                Refresh::ALL
            }
            Err(e) => {
                self.report("delete the task", e);
                Refresh::NONE
            }
        }
    }

    pub async fn undo_delete(&mut self) -> Refresh {
        if self.deleted_task.is_none() {
            self.notify(Notice::info("Nothing to undo"));
            return Refresh::NONE;
        }

        match self.api.undo_delete().await {
            Ok(task) => {
                debug!("Restored task as {}", task.id);
                self.insert(task);
                self.deleted_task = None;
                self.notify(Notice::info("Task restored"));
                Refresh::ALL
            }
            Err(e) => {
                self.report("undo the deletion", e);
                Refresh::NONE
            }
        }
    }

    /// Delete every task. Callers obtain the user's confirmation first.
    pub async fn reset_all(&mut self) -> Refresh {
        match self.api.reset_tasks().await {
            Ok(()) => {
                self.tasks.clear();
                self.deleted_task = None;
                self.notify(Notice::info("All tasks cleared"));
                Refresh::ALL
            }
            Err(e) => {
                self.report("reset tasks", e);
                Refresh::NONE
            }
        }
    }
}

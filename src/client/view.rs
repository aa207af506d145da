//! Pure view models derived from the task collection
//!
//! Nothing here performs I/O. Front ends turn these into widgets or lines of
//! text, and wire row affordances through `RowHandlers`.

use chrono::NaiveDate;

use crate::task::{format_reminder, format_reminder_time, Task, TaskId};

/// Affordances every list row offers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowAction {
    Toggle,
    Edit,
    Delete,
}

/// Event handlers a front end supplies for row affordances. Handlers always
/// receive the task's real id, never its display position.
pub trait RowHandlers {
    type Output;

    fn toggle(&self, id: TaskId) -> Self::Output;
    fn edit(&self, id: TaskId) -> Self::Output;
    fn delete(&self, id: TaskId) -> Self::Output;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListRow {
    /// 1-based display number
    pub position: usize,
    pub id: TaskId,
    pub description: String,
    pub completed: bool,
    /// Formatted reminder, if any
    pub reminder: Option<String>,
}

impl ListRow {
    pub fn bind<H: RowHandlers>(&self, action: RowAction, handlers: &H) -> H::Output {
        match action {
            RowAction::Toggle => handlers.toggle(self.id),
            RowAction::Edit => handlers.edit(self.id),
            RowAction::Delete => handlers.delete(self.id),
        }
    }
}

/// Rows in ascending id order, numbered from 1
pub fn list_rows(tasks: &[Task]) -> Vec<ListRow> {
    let mut sorted: Vec<&Task> = tasks.iter().collect();
    sorted.sort_by_key(|t| t.id);

    sorted
        .into_iter()
        .enumerate()
        .map(|(idx, task)| ListRow {
            position: idx + 1,
            id: task.id,
            description: task.description.clone(),
            completed: task.completed,
            reminder: task.reminder.as_deref().map(format_reminder),
        })
        .collect()
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Summary {
    pub total: usize,
    pub completed: usize,
    pub pending: usize,
}

impl Summary {
    pub fn of(tasks: &[Task]) -> Self {
        let completed = tasks.iter().filter(|t| t.completed).count();
        Self {
            total: tasks.len(),
            completed,
            pending: tasks.iter().filter(|t| !t.completed).count(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CalendarMarker {
    pub task_id: TaskId,
    pub date: NaiveDate,
}

/// One marker per task with a reminder, placed on the reminder's date
pub fn calendar_markers(tasks: &[Task]) -> Vec<CalendarMarker> {
    tasks
        .iter()
        .filter_map(|task| {
            task.reminder_date().map(|date| CalendarMarker {
                task_id: task.id,
                date,
            })
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DayEntry {
    pub id: TaskId,
    pub description: String,
    pub time: String,
    pub completed: bool,
}

/// Tasks whose reminder starts with the given date, in collection order
pub fn tasks_on_day(tasks: &[Task], date: NaiveDate) -> Vec<DayEntry> {
    let prefix = date.format("%Y-%m-%d").to_string();

    tasks
        .iter()
        .filter_map(|task| {
            let reminder = task.reminder.as_deref()?;
            reminder.starts_with(&prefix).then(|| DayEntry {
                id: task.id,
                description: task.description.clone(),
                time: format_reminder_time(reminder),
                completed: task.completed,
            })
        })
        .collect()
}

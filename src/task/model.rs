//! Task data model

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Server-assigned task identifier. Ordered by creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskId(pub u64);

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A task as held by the server
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: TaskId,

    pub description: String,

    #[serde(default)]
    pub completed: bool,

    /// Combined date-time string, e.g. `2024-03-01T09:00`
    #[serde(default)]
    pub reminder: Option<String>,
}

impl Task {
    pub fn new(id: u64, description: impl Into<String>) -> Self {
        Self {
            id: TaskId(id),
            description: description.into(),
            completed: false,
            reminder: None,
        }
    }

    pub fn with_reminder(mut self, reminder: impl Into<String>) -> Self {
        self.reminder = Some(reminder.into());
        self
    }

    /// Shallow-merge the fields the server sent back. Absent fields are kept.
    pub fn merge(&mut self, update: TaskUpdate) {
        if let Some(description) = update.description {
            self.description = description;
        }
        if let Some(completed) = update.completed {
            self.completed = completed;
        }
        if let Some(reminder) = update.reminder {
            self.reminder = reminder;
        }
    }

    pub fn reminder_date(&self) -> Option<NaiveDate> {
        self.reminder.as_deref().and_then(reminder_date)
    }
}

/// Partial task copy returned by PATCH. `reminder` distinguishes a missing
/// key (`None`) from an explicit `null` (`Some(None)`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct TaskUpdate {
    #[serde(default)]
    pub id: Option<TaskId>,

    #[serde(default)]
    pub description: Option<String>,

    #[serde(default)]
    pub completed: Option<bool>,

    #[serde(default, deserialize_with = "present_or_null")]
    pub reminder: Option<Option<String>>,
}

fn present_or_null<'de, D>(deserializer: D) -> Result<Option<Option<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer).map(Some)
}

impl From<Task> for TaskUpdate {
    fn from(task: Task) -> Self {
        Self {
            id: Some(task.id),
            description: Some(task.description),
            completed: Some(task.completed),
            reminder: Some(task.reminder),
        }
    }
}

/// Why a date/time input was refused before any request went out
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReminderInputError {
    InvalidDate(String),
    InvalidTime(String),
}

impl fmt::Display for ReminderInputError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidDate(s) => write!(f, "Invalid date '{}', expected YYYY-MM-DD", s),
            Self::InvalidTime(s) => write!(f, "Invalid time '{}', expected HH:MM", s),
        }
    }
}

impl std::error::Error for ReminderInputError {}

/// Merge separate date and time inputs into one reminder timestamp.
///
/// No date means no reminder, even when a time was typed. A date without a
/// time lands on midnight.
pub fn combine_reminder(date: &str, time: &str) -> Result<Option<String>, ReminderInputError> {
    let date = date.trim();
    let time = time.trim();

    if date.is_empty() {
        return Ok(None);
    }

    let day = NaiveDate::parse_from_str(date, "%Y-%m-%d")
        .map_err(|_| ReminderInputError::InvalidDate(date.to_string()))?;

    let at = if time.is_empty() {
        NaiveTime::MIN
    } else {
        NaiveTime::parse_from_str(time, "%H:%M")
            .map_err(|_| ReminderInputError::InvalidTime(time.to_string()))?
    };

    Ok(Some(format!(
        "{}T{}",
        day.format("%Y-%m-%d"),
        at.format("%H:%M")
    )))
}

/// Split a stored reminder back into the `(date, time)` inputs used by forms.
pub fn split_reminder(reminder: &str) -> (String, String) {
    match parse_reminder(reminder) {
        Some(dt) => (
            dt.format("%Y-%m-%d").to_string(),
            dt.format("%H:%M").to_string(),
        ),
        None => (reminder.chars().take(10).collect(), String::new()),
    }
}

fn parse_reminder(reminder: &str) -> Option<NaiveDateTime> {
    const FORMATS: [&str; 3] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M:%S"];

    let reminder = reminder.trim();
    FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(reminder, fmt).ok())
        .or_else(|| {
            DateTime::parse_from_rfc3339(reminder)
                .ok()
                .map(|dt| dt.naive_local())
        })
}

/// Calendar date of a reminder
pub fn reminder_date(reminder: &str) -> Option<NaiveDate> {
    let head = reminder.trim().get(..10)?;
    NaiveDate::parse_from_str(head, "%Y-%m-%d").ok()
}

/// Human-readable reminder, falling back to the raw string
pub fn format_reminder(reminder: &str) -> String {
    match parse_reminder(reminder) {
        Some(dt) => dt.format("%b %-d, %Y %H:%M").to_string(),
        None => reminder.to_string(),
    }
}

/// Time-of-day part of a reminder for day listings
pub fn format_reminder_time(reminder: &str) -> String {
    match parse_reminder(reminder) {
        Some(dt) => dt.format("%H:%M").to_string(),
        None => String::from("--:--"),
    }
}

//! Task model
//!
//! The server owns tasks; this module only describes their shape and the
//! reminder conventions shared by the list, calendar and forms:
//! - Task and partial TaskUpdate wire types
//! - Merging date and time inputs into one reminder timestamp
//! - Reminder formatting for display

pub mod model;

pub use model::{
    combine_reminder, format_reminder, format_reminder_time, reminder_date, split_reminder,
    ReminderInputError, Task, TaskId, TaskUpdate,
};

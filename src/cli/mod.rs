//! CLI command implementations

pub mod calendar;
pub mod chat;
pub mod definition;
pub mod list;
pub mod task;

pub use definition::{Cli, Commands};

use anyhow::{bail, Result};
use std::io::{self, Write};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::api::{HttpBackend, TaskApi};
use crate::client::view::ListRow;
use crate::client::{NoticeLevel, TaskClient};
use crate::task::TaskId;

/// Build a client for the given server and load the collection
pub async fn connect(server_url: &str) -> Result<TaskClient<HttpBackend>> {
    let backend = HttpBackend::new(server_url)?;
    let mut client = TaskClient::new(backend);
    client.load_all().await;
    finish(&mut client)?;
    Ok(client)
}

/// Print queued notices and fail if any of them is an error
pub fn finish<A: TaskApi>(client: &mut TaskClient<A>) -> Result<()> {
    let notices = client.take_notices();
    for notice in &notices {
        match notice.level {
            NoticeLevel::Info => println!("{}", notice.message),
            NoticeLevel::Warning | NoticeLevel::Error => eprintln!("{}", notice),
        }
    }

    if let Some(failure) = notices.iter().find(|n| n.is_error()) {
        bail!("{}", failure.message);
    }
    Ok(())
}

pub fn resolve_task<A: TaskApi>(number: usize, client: &TaskClient<A>) -> Result<TaskId> {
    match client.id_for_display_number(number) {
        Some(id) => Ok(id),
        None => bail!(
            "Task {} not found ({} task(s) listed)",
            number,
            client.tasks().len()
        ),
    }
}

pub fn confirm(prompt: &str) -> Result<bool> {
    print!("{} (y/N): ", prompt);
    io::stdout().flush()?;

    let mut response = String::new();
    io::stdin().read_line(&mut response)?;
    let response = response.trim().to_lowercase();
    Ok(response == "y" || response == "yes")
}

pub fn format_row(row: &ListRow, max_description: usize) -> String {
    let mark = if row.completed { "[x]" } else { "[ ]" };
    let mut line = format!(
        "{:>3}. {} {}",
        row.position,
        mark,
        truncate(&row.description, max_description)
    );
    if let Some(reminder) = &row.reminder {
        line.push_str(&format!("  ({})", reminder));
    }
    line
}

/// Shorten to a display width, ending with "..." when there is room
pub fn truncate(s: &str, max: usize) -> String {
    if s.width() <= max {
        return s.to_string();
    }

    let budget = if max <= 3 { max } else { max - 3 };
    let mut out = String::new();
    let mut used = 0;
    for c in s.chars() {
        let w = c.width().unwrap_or(0);
        if used + w > budget {
            break;
        }
        used += w;
        out.push(c);
    }

    if max > 3 {
        out.push_str("...");
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::mock::MockApi;
    use crate::client::Notice;
    use crate::task::Task;

    #[test]
    fn test_truncate_shorter_than_max() {
        assert_eq!(truncate("hello", 10), "hello");
    }

    #[test]
    fn test_truncate_equal_to_max() {
        assert_eq!(truncate("hello", 5), "hello");
    }

    #[test]
    fn test_truncate_longer_than_max() {
        assert_eq!(truncate("hello world", 8), "hello...");
    }

    #[test]
    fn test_truncate_with_small_max() {
        assert_eq!(truncate("hello", 3), "hel");
        assert_eq!(truncate("hello", 1), "h");
    }

    #[test]
    fn test_truncate_zero_max() {
        assert_eq!(truncate("hello", 0), "");
    }

    #[test]
    fn test_truncate_wide_characters() {
        assert_eq!(truncate("牛乳を買う", 7), "牛乳...");
    }

    #[test]
    fn test_format_row() {
        let row = ListRow {
            position: 2,
            id: TaskId(17),
            description: "Buy milk".to_string(),
            completed: true,
            reminder: Some("Mar 1, 2024 09:00".to_string()),
        };
        assert_eq!(
            format_row(&row, 40),
            "  2. [x] Buy milk  (Mar 1, 2024 09:00)"
        );
    }

    #[tokio::test]
    async fn test_resolve_task_by_display_number() {
        let mut client = TaskClient::new(MockApi::with_tasks(vec![
            Task::new(5, "a"),
            Task::new(8, "b"),
        ]));
        client.load_all().await;

        assert_eq!(resolve_task(2, &client).unwrap(), TaskId(8));
        let err = resolve_task(3, &client).unwrap_err();
        assert!(err.to_string().contains("Task 3 not found"));
    }

    #[test]
    fn test_finish_fails_on_error_notice() {
        let mut client = TaskClient::new(MockApi::new());
        client.notify(Notice::info("ok"));
        assert!(finish(&mut client).is_ok());

        client.notify(Notice::error("Could not load tasks"));
        assert!(finish(&mut client).is_err());
    }
}

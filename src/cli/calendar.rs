//! `taskdeck calendar` command implementation

use std::collections::BTreeMap;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::Args;

use crate::client::view::{calendar_markers, tasks_on_day};
use crate::task::Task;

#[derive(Args)]
pub struct CalendarArgs {
    /// Show the tasks due on one day (YYYY-MM-DD)
    #[arg(short, long)]
    day: Option<String>,
}

pub async fn run(server_url: &str, args: CalendarArgs) -> Result<()> {
    let client = super::connect(server_url).await?;

    match args.day {
        Some(day) => {
            let date = NaiveDate::parse_from_str(day.trim(), "%Y-%m-%d")
                .with_context(|| format!("Invalid date '{}', expected YYYY-MM-DD", day))?;
            print_day(client.tasks(), date);
        }
        None => print_overview(client.tasks()),
    }
    Ok(())
}

fn print_overview(tasks: &[Task]) {
    let counts = reminders_by_date(tasks);
    if counts.is_empty() {
        println!("No reminders scheduled.");
        return;
    }

    for (date, count) in counts {
        println!("{}  {} task(s)", date.format("%a %Y-%m-%d"), count);
    }
}

fn print_day(tasks: &[Task], date: NaiveDate) {
    let entries = tasks_on_day(tasks, date);
    println!("{}", date.format("%A, %B %-d, %Y"));
    if entries.is_empty() {
        println!("  No tasks on this day.");
        return;
    }

    for entry in entries {
        let mark = if entry.completed { "[x]" } else { "[ ]" };
        println!("  {} {} {}", entry.time, mark, entry.description);
    }
}

fn reminders_by_date(tasks: &[Task]) -> BTreeMap<NaiveDate, usize> {
    let mut counts = BTreeMap::new();
    for marker in calendar_markers(tasks) {
        *counts.entry(marker.date).or_insert(0) += 1;
    }
    counts
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reminders_grouped_by_date() {
        let tasks = vec![
            Task::new(1, "Buy milk").with_reminder("2024-03-01T09:00"),
            Task::new(2, "Dentist").with_reminder("2024-03-01T14:30"),
            Task::new(3, "Call mom"),
            Task::new(4, "Water plants").with_reminder("2024-02-28T08:00"),
        ];

        let counts: Vec<_> = reminders_by_date(&tasks).into_iter().collect();
        assert_eq!(
            counts,
            vec![
                (NaiveDate::from_ymd_opt(2024, 2, 28).unwrap(), 1),
                (NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(), 2),
            ]
        );
    }
}

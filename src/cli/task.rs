//! Task mutation commands: add, toggle, edit, remove, reset

use anyhow::{bail, Result};
use clap::Args;

use crate::client::view::list_rows;
use crate::task::combine_reminder;

#[derive(Args)]
pub struct AddArgs {
    /// Task description
    description: String,

    /// Reminder date (YYYY-MM-DD)
    #[arg(short, long)]
    date: Option<String>,

    /// Reminder time (HH:MM), midnight when omitted
    #[arg(short, long)]
    time: Option<String>,
}

#[derive(Args)]
pub struct NumberArgs {
    /// Task number as shown by `taskdeck list`
    number: usize,
}

#[derive(Args)]
pub struct EditArgs {
    /// Task number as shown by `taskdeck list`
    number: usize,

    /// New description (keeps the current one when omitted)
    #[arg(long)]
    description: Option<String>,

    /// New reminder date (YYYY-MM-DD); the reminder is cleared when omitted
    #[arg(short, long)]
    date: Option<String>,

    /// New reminder time (HH:MM)
    #[arg(short, long)]
    time: Option<String>,
}

#[derive(Args)]
pub struct ResetArgs {
    /// Skip the confirmation prompt
    #[arg(short, long)]
    yes: bool,
}

fn reminder_from(date: Option<&str>, time: Option<&str>) -> Result<Option<String>> {
    match combine_reminder(date.unwrap_or_default(), time.unwrap_or_default()) {
        Ok(reminder) => Ok(reminder),
        Err(e) => bail!("{}", e),
    }
}

pub async fn run_add(server_url: &str, args: AddArgs) -> Result<()> {
    let reminder = reminder_from(args.date.as_deref(), args.time.as_deref())?;
    let mut client = super::connect(server_url).await?;

    let refresh = client.create(&args.description, reminder).await;
    super::finish(&mut client)?;

    if refresh.any() {
        if let Some(row) = list_rows(client.tasks()).last() {
            println!("{}", super::format_row(row, usize::MAX));
        }
    }
    Ok(())
}

pub async fn run_toggle(server_url: &str, args: NumberArgs) -> Result<()> {
    let mut client = super::connect(server_url).await?;
    let id = super::resolve_task(args.number, &client)?;

    client.toggle_completion(id).await;
    super::finish(&mut client)?;

    if let Some(row) = list_rows(client.tasks()).iter().find(|r| r.id == id) {
        println!("{}", super::format_row(row, usize::MAX));
    }
    Ok(())
}

pub async fn run_edit(server_url: &str, args: EditArgs) -> Result<()> {
    let reminder = reminder_from(args.date.as_deref(), args.time.as_deref())?;
    let mut client = super::connect(server_url).await?;
    let id = super::resolve_task(args.number, &client)?;

    let description = match args.description {
        Some(description) => description,
        None => client
            .get(id)
            .map(|t| t.description.clone())
            .unwrap_or_default(),
    };

    client.edit(id, &description, reminder).await;
    super::finish(&mut client)?;

    if let Some(row) = list_rows(client.tasks()).iter().find(|r| r.id == id) {
        println!("{}", super::format_row(row, usize::MAX));
    }
    Ok(())
}

pub async fn run_remove(server_url: &str, args: NumberArgs) -> Result<()> {
    let mut client = super::connect(server_url).await?;
    let id = super::resolve_task(args.number, &client)?;

    client.remove(id).await;
    super::finish(&mut client)
}

pub async fn run_reset(server_url: &str, args: ResetArgs) -> Result<()> {
    let mut client = super::connect(server_url).await?;

    if !args.yes
        && !super::confirm(&format!(
            "Delete all {} task(s)? This cannot be undone.",
            client.tasks().len()
        ))?
    {
        println!("Cancelled.");
        return Ok(());
    }

    client.reset_all().await;
    super::finish(&mut client)
}

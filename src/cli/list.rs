//! `taskdeck list` command implementation

use anyhow::Result;
use clap::Args;

use crate::client::view::{list_rows, Summary};

const DESCRIPTION_WIDTH: usize = 48;

#[derive(Args)]
pub struct ListArgs {
    /// Output as JSON
    #[arg(long)]
    json: bool,

    /// Only show tasks that are not completed
    #[arg(long)]
    pending: bool,
}

pub async fn run(server_url: &str, args: ListArgs) -> Result<()> {
    let client = super::connect(server_url).await?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(client.tasks())?);
        return Ok(());
    }

    let rows = list_rows(client.tasks());
    if rows.is_empty() {
        println!("No tasks yet. Add one with: taskdeck add \"Buy milk\"");
        return Ok(());
    }

    for row in rows.iter().filter(|r| !args.pending || !r.completed) {
        println!("{}", super::format_row(row, DESCRIPTION_WIDTH));
    }

    let summary = Summary::of(client.tasks());
    println!(
        "\nTotal: {}  Completed: {}  Pending: {}",
        summary.total, summary.completed, summary.pending
    );

    Ok(())
}

//! Command-line surface

use clap::{Parser, Subcommand};

use super::calendar::CalendarArgs;
use super::chat::ChatArgs;
use super::list::ListArgs;
use super::task::{AddArgs, EditArgs, NumberArgs, ResetArgs};

#[derive(Parser)]
#[command(name = "taskdeck")]
#[command(version, about = "Terminal client for a to-do server, with calendar and chat assistant")]
pub struct Cli {
    /// Task server URL (overrides server.base_url in config.toml)
    #[arg(short, long, global = true, env = "TASKDECK_SERVER")]
    pub server: Option<String>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List tasks with their display numbers
    List(ListArgs),

    /// Add a new task
    Add(AddArgs),

    /// Toggle completion of a task
    Toggle(NumberArgs),

    /// Replace a task's description and reminder
    Edit(EditArgs),

    /// Delete a task
    #[command(alias = "rm")]
    Remove(NumberArgs),

    /// Delete every task
    Reset(ResetArgs),

    /// Show reminders by date
    Calendar(CalendarArgs),

    /// Send one message to the assistant
    Chat(ChatArgs),

    /// Generate shell completions
    Completion {
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

//! taskdeck - terminal client for a to-do server

use anyhow::Result;
use clap::{CommandFactory, Parser};
use clap_complete::generate;
use std::fs::File;
use std::sync::Mutex;
use taskdeck::cli::{self, Cli, Commands};
use taskdeck::config::{get_app_dir, Config};
use taskdeck::tui;

/// Debug logs go to a file so they never draw over the TUI
fn init_debug_log() -> Result<()> {
    let path = get_app_dir()?.join("debug.log");
    let file = File::create(&path)?;
    tracing_subscriber::fmt()
        .with_env_filter("taskdeck=debug")
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .init();
    tracing::debug!("Logging to {}", path.display());
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    if std::env::var("TASKDECK_DEBUG").is_ok() {
        init_debug_log()?;
    }

    let cli = Cli::parse();

    // Completions don't need config or a server
    if let Some(Commands::Completion { shell }) = cli.command {
        generate(shell, &mut Cli::command(), "taskdeck", &mut std::io::stdout());
        return Ok(());
    }

    let config = Config::load()?;
    let server_url = config.server_url(cli.server.as_deref());

    match cli.command {
        Some(Commands::List(args)) => cli::list::run(&server_url, args).await,
        Some(Commands::Add(args)) => cli::task::run_add(&server_url, args).await,
        Some(Commands::Toggle(args)) => cli::task::run_toggle(&server_url, args).await,
        Some(Commands::Edit(args)) => cli::task::run_edit(&server_url, args).await,
        Some(Commands::Remove(args)) => cli::task::run_remove(&server_url, args).await,
        Some(Commands::Reset(args)) => cli::task::run_reset(&server_url, args).await,
        Some(Commands::Calendar(args)) => cli::calendar::run(&server_url, args).await,
        Some(Commands::Chat(args)) => cli::chat::run(&server_url, args).await,
        Some(Commands::Completion { .. }) => Ok(()),
        None => tui::run(&config, &server_url).await,
    }
}

//! Terminal User Interface module

mod app;
mod calendar;
mod components;
pub mod dialogs;
mod home;
mod styles;

pub use app::*;

use anyhow::Result;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::prelude::*;
use std::io;

use crate::api::HttpBackend;
use crate::client::TaskClient;
use crate::config::Config;

pub async fn run(config: &Config, server_url: &str) -> Result<()> {
    let backend = HttpBackend::new(server_url)?;
    tracing::info!("Starting TUI against {}", backend.base_url());
    let mut app = App::new(TaskClient::new(backend), config);

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout))?;

    let result = app.run(&mut terminal).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

//! taskdeck library - terminal client for a to-do server with calendar and chat

pub mod api;
pub mod chat;
pub mod cli;
pub mod client;
pub mod config;
pub mod task;
pub mod tui;

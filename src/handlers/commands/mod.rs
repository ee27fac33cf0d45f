//! Command handlers module
//!
//! This module contains handlers for all bot commands like /start, /help, etc.

pub mod admin;
pub mod start;

use teloxide::utils::command::BotCommands;

/// All available bot commands
#[derive(BotCommands, Clone, Debug, PartialEq, Eq)]
#[command(rename_rule = "lowercase", description = "IdBot commands:")]
pub enum Command {
    #[command(description = "Show the welcome message and the ID keyboard")]
    Start,
    #[command(description = "Show help information")]
    Help,
    #[command(description = "Show your own ID")]
    Id,
    #[command(description = "Admin panel (operator only)")]
    Admin,
    #[command(description = "Show registry statistics (operator only)")]
    Stats,
}


//! IdBot Telegram Bot
//!
//! A Telegram bot that reports the numeric IDs of users, bots, groups and
//! channels, keeps a registry of everyone who talked to it, lets the operator
//! broadcast a message to all of them, and converts videos to audio.

#![allow(non_snake_case)]

pub mod config;
pub mod database;
pub mod handlers;
pub mod models;
pub mod services;
pub mod state;
pub mod utils;

// Re-export commonly used types
pub use config::Settings;
pub use utils::errors::{IdBotError, Result};

// Re-export main components for easy access
pub use database::UserRegistry;
pub use services::ServiceFactory;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");

/// Get library information
pub fn info() -> String {
    format!("{} v{}", NAME, VERSION)
}

//! Bot handlers module
//!
//! This module contains all Telegram bot handlers organized by type:
//! - Command handlers for bot commands and the admin panel
//! - Callback handlers for inline keyboard interactions
//! - Message handlers for everything else, driven by the router

pub mod callbacks;
pub mod commands;
pub mod messages;
pub mod replies;
pub mod router;

// Re-export commonly used handler functions
pub use callbacks::{handle_callback_query, process_callback};
pub use commands::Command;
pub use messages::{handle_message, process_message};
pub use router::{route, ReplyIntent, Route, RouterContext};

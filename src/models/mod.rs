//! Data models module
//!
//! This module contains the domain types shared by the registry, the
//! broadcast dispatcher and the update router.

pub mod broadcast;
pub mod chat;
pub mod keyboard;
pub mod update;
pub mod user;

pub use broadcast::BroadcastOutcome;
pub use chat::ChatProfile;
pub use keyboard::{InlineButton, InlineKeyboard, Keyboard, ReplyButton, ReplyKeyboard};
pub use update::{CallbackUpdate, InboundUpdate, Sender, UpdateKind, VideoAttachment};
pub use user::{AddResult, RegistryDocument, UserRecord};

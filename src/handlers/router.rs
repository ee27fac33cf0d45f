//! Update router
//!
//! Classifies one inbound update into exactly one route. Rules are tried in a
//! fixed order and the first match wins:
//!
//! 1. operator message while a broadcast is armed
//! 2. shared chat
//! 3. shared user
//! 4. forwarded channel post or anonymous group message
//! 5. forwarded user or bot (hidden senders included)
//! 6. shared contact
//! 7. video, when conversion is enabled
//! 8. commands and keyboard button labels
//! 9. numeric text, looked up remotely
//! 10. anything else: the sender's own id

use teloxide::utils::command::BotCommands;
use crate::models::{InboundUpdate, UpdateKind, VideoAttachment};
use crate::utils::helpers::{is_numeric_id, parse_numeric_id};
use super::commands::admin::ADMIN_PANEL_BUTTON;
use super::commands::start::MANUAL_ID_BUTTON;
use super::commands::Command;

/// Inputs the router needs besides the update itself
#[derive(Debug, Clone, Copy)]
pub struct RouterContext<'a> {
    pub operator_id: i64,
    pub broadcast_armed: bool,
    pub conversion_enabled: bool,
    pub bot_username: &'a str,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    /// Hand the message to the broadcast dispatcher
    Broadcast,
    Reply(ReplyIntent),
}

/// What to answer
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplyIntent {
    SharedChat { chat_id: i64 },
    SharedUsers { user_ids: Vec<i64> },
    ForwardedChat { chat_id: i64, title: Option<String>, is_channel: bool },
    ForwardedUser { user_id: i64, name: Option<String>, is_bot: bool },
    HiddenForward { name: String },
    Contact { user_id: Option<i64>, name: Option<String> },
    ConvertVideo(VideoAttachment),
    Welcome,
    Help,
    ShowAdminPanel,
    ShowStats,
    PromptManualId,
    Lookup { id: i64 },
    /// Numeric text no chat id can have; treated as a lookup miss
    UnresolvableId { text: String },
    SelfId { user_id: i64 },
}

pub fn route(update: &InboundUpdate, ctx: &RouterContext<'_>) -> Route {
    let sender_id = update.sender.id;

    if sender_id == ctx.operator_id && ctx.broadcast_armed {
        return Route::Broadcast;
    }

    let intent = match &update.kind {
        UpdateKind::ChatShared { chat_id } => ReplyIntent::SharedChat { chat_id: *chat_id },
        UpdateKind::UserShared { user_ids } => ReplyIntent::SharedUsers {
            user_ids: user_ids.clone(),
        },
        UpdateKind::ForwardedChat { chat_id, title, is_channel } => ReplyIntent::ForwardedChat {
            chat_id: *chat_id,
            title: title.clone(),
            is_channel: *is_channel,
        },
        UpdateKind::ForwardedUser { user_id, name, is_bot } => ReplyIntent::ForwardedUser {
            user_id: *user_id,
            name: name.clone(),
            is_bot: *is_bot,
        },
        UpdateKind::ForwardedHiddenUser { name } => ReplyIntent::HiddenForward { name: name.clone() },
        UpdateKind::Contact { user_id, name } => ReplyIntent::Contact {
            user_id: *user_id,
            name: name.clone(),
        },
        UpdateKind::Video(video) if ctx.conversion_enabled => ReplyIntent::ConvertVideo(video.clone()),
        UpdateKind::Text(text) => route_text(text, sender_id, ctx),
        UpdateKind::Video(_) | UpdateKind::Other => ReplyIntent::SelfId { user_id: sender_id },
    };

    Route::Reply(intent)
}

fn route_text(text: &str, sender_id: i64, ctx: &RouterContext<'_>) -> ReplyIntent {
    let text = text.trim();

    if let Ok(command) = Command::parse(text, ctx.bot_username) {
        return match command {
            Command::Start => ReplyIntent::Welcome,
            Command::Help => ReplyIntent::Help,
            Command::Id => ReplyIntent::SelfId { user_id: sender_id },
            Command::Admin => ReplyIntent::ShowAdminPanel,
            Command::Stats => ReplyIntent::ShowStats,
        };
    }

    if text == ADMIN_PANEL_BUTTON {
        return ReplyIntent::ShowAdminPanel;
    }

    if text == MANUAL_ID_BUTTON {
        return ReplyIntent::PromptManualId;
    }

    match parse_numeric_id(text) {
        Some(id) => ReplyIntent::Lookup { id },
        None if is_numeric_id(text) => ReplyIntent::UnresolvableId {
            text: text.to_string(),
        },
        None => ReplyIntent::SelfId { user_id: sender_id },
    }
}

impl Route {
    /// Short name used in logs
    pub fn label(&self) -> &'static str {
        match self {
            Route::Broadcast => "broadcast",
            Route::Reply(intent) => intent.label(),
        }
    }
}

impl ReplyIntent {
    pub fn label(&self) -> &'static str {
        match self {
            ReplyIntent::SharedChat { .. } => "shared_chat",
            ReplyIntent::SharedUsers { .. } => "shared_users",
            ReplyIntent::ForwardedChat { .. } => "forwarded_chat",
            ReplyIntent::ForwardedUser { .. } => "forwarded_user",
            ReplyIntent::HiddenForward { .. } => "hidden_forward",
            ReplyIntent::Contact { .. } => "contact",
            ReplyIntent::ConvertVideo(_) => "convert_video",
            ReplyIntent::Welcome => "welcome",
            ReplyIntent::Help => "help",
            ReplyIntent::ShowAdminPanel => "admin_panel",
            ReplyIntent::ShowStats => "stats",
            ReplyIntent::PromptManualId => "manual_id_prompt",
            ReplyIntent::Lookup { .. } | ReplyIntent::UnresolvableId { .. } => "lookup",
            ReplyIntent::SelfId { .. } => "self_id",
        }
    }
}

//! Start and help command handlers

use crate::models::{Keyboard, ReplyButton, ReplyKeyboard};
use crate::services::ServiceFactory;
use crate::utils::errors::Result;
use crate::utils::logging::log_user_action;
use super::admin::ADMIN_PANEL_BUTTON;

pub const MANUAL_ID_BUTTON: &str = "🔎 Enter ID";

pub const WELCOME_TEXT: &str = "👋 Welcome to ID Bot!\n\n\
🔹 Use this bot to get the User, Bot, Group, or Channel ID in any of these ways:\n\
✅ Forward a message\n\
✅ Share a chat using the buttons below\n\
✅ Share a contact\n\
✅ Send a numeric ID to look it up\n\
✅ Send a video to get its audio track\n\n\
📌 Simply send or share, and I'll provide the ID you need!";

pub const HELP_TEXT: &str = "ℹ️ How to use ID Bot\n\n\
• Forward any message from a user, bot, group or channel to get its ID.\n\
• Use the keyboard buttons to pick a user, bot, group or channel.\n\
• Share a contact to get the contact's user ID.\n\
• Send a numeric ID such as 123456789 or -1001234567890 to look it up.\n\
• Send a video and I'll reply with its audio as MP3.\n\
• Send anything else to see your own ID.\n\n\
Commands: /start /help /id";

pub const MANUAL_ID_PROMPT: &str =
    "🔎 Send me a numeric ID (for example 123456789 or -1001234567890) and I'll look it up.";

/// Reply keyboard shown after /start; the operator also gets the admin button
pub fn start_keyboard(is_operator: bool) -> ReplyKeyboard {
    let mut rows = vec![
        vec![
            ReplyButton::RequestUser { request_id: 1, label: "👤 User".to_string(), bot: false },
            ReplyButton::RequestUser { request_id: 2, label: "🤖 Bot".to_string(), bot: true },
        ],
        vec![
            ReplyButton::RequestChat { request_id: 3, label: "📢 Group".to_string(), channel: false },
            ReplyButton::RequestChat { request_id: 4, label: "📺 Channel".to_string(), channel: true },
        ],
        vec![ReplyButton::Text(MANUAL_ID_BUTTON.to_string())],
    ];

    if is_operator {
        rows.push(vec![ReplyButton::Text(ADMIN_PANEL_BUTTON.to_string())]);
    }

    ReplyKeyboard::new(rows)
}

/// Handle /start
pub async fn handle_start(services: &ServiceFactory, chat_id: i64, user_id: i64) -> Result<()> {
    let keyboard = start_keyboard(services.is_operator(user_id));
    services
        .messenger
        .send_text(chat_id, WELCOME_TEXT, Some(Keyboard::Reply(keyboard)))
        .await?;

    log_user_action(user_id, "start", None);
    Ok(())
}

/// Handle /help
pub async fn handle_help(services: &ServiceFactory, chat_id: i64) -> Result<()> {
    services.messenger.send_text(chat_id, HELP_TEXT, None).await?;
    Ok(())
}

/// Handle the "Enter ID" button
pub async fn handle_manual_id_prompt(services: &ServiceFactory, chat_id: i64) -> Result<()> {
    services.messenger.send_text(chat_id, MANUAL_ID_PROMPT, None).await?;
    Ok(())
}

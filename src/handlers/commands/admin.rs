//! Admin command handlers

use tracing::{debug, info};
use crate::models::{InlineButton, InlineKeyboard, Keyboard};
use crate::services::ServiceFactory;
use crate::utils::errors::{IdBotError, Result};
use crate::utils::helpers::format_timestamp;
use crate::utils::logging::log_admin_action;

pub const ADMIN_PANEL_BUTTON: &str = "⚙️ Admin panel";

pub const EXPORT_FILE_NAME: &str = "users.json";

/// Actions behind the admin panel's inline buttons
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdminAction {
    Broadcast,
    Stats,
    Export,
    Reset,
    ResetConfirm,
    Cancel,
    Back,
}

impl AdminAction {
    /// Parse `admin:<action>` callback data
    pub fn parse(data: &str) -> Option<Self> {
        let action = data.strip_prefix("admin:")?;
        match action {
            "broadcast" => Some(AdminAction::Broadcast),
            "stats" => Some(AdminAction::Stats),
            "export" => Some(AdminAction::Export),
            "reset" => Some(AdminAction::Reset),
            "reset_confirm" => Some(AdminAction::ResetConfirm),
            "cancel" => Some(AdminAction::Cancel),
            "back" => Some(AdminAction::Back),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            AdminAction::Broadcast => "broadcast",
            AdminAction::Stats => "stats",
            AdminAction::Export => "export",
            AdminAction::Reset => "reset",
            AdminAction::ResetConfirm => "reset_confirm",
            AdminAction::Cancel => "cancel",
            AdminAction::Back => "back",
        }
    }

    pub fn callback_data(&self) -> String {
        format!("admin:{}", self.as_str())
    }
}

fn button(label: &str, action: AdminAction) -> InlineButton {
    InlineButton::callback(label, action.callback_data())
}

/// Main admin menu
pub fn admin_panel_keyboard() -> InlineKeyboard {
    InlineKeyboard::new(vec![
        vec![
            button("📢 Broadcast", AdminAction::Broadcast),
            button("📊 Stats", AdminAction::Stats),
        ],
        vec![
            button("📥 Export users", AdminAction::Export),
            button("🗑 Reset users", AdminAction::Reset),
        ],
    ])
}

pub fn back_keyboard() -> InlineKeyboard {
    InlineKeyboard::new(vec![vec![button("⬅️ Back", AdminAction::Back)]])
}

pub fn reset_confirm_keyboard() -> InlineKeyboard {
    InlineKeyboard::new(vec![vec![
        button("✅ Yes, reset", AdminAction::ResetConfirm),
        button("⬅️ Back", AdminAction::Back),
    ]])
}

pub async fn admin_panel_text(services: &ServiceFactory) -> String {
    let users = services.registry.len().await;
    let pending = if services.broadcast.is_armed() {
        "\n📢 A broadcast is waiting for your message."
    } else {
        ""
    };
    format!("⚙️ Admin panel\n\n👥 Registered users: {}{}", users, pending)
}

pub async fn stats_text(services: &ServiceFactory) -> String {
    let users = services.registry.len().await;
    let since = services.registry.start_time().await;
    format!(
        "📊 Statistics\n\n👥 Registered users: {}\n🕒 Tracking since: {}",
        users,
        format_timestamp(since)
    )
}

fn ensure_operator(services: &ServiceFactory, user_id: i64) -> Result<()> {
    if services.is_operator(user_id) {
        Ok(())
    } else {
        Err(IdBotError::PermissionDenied(format!("user {} is not the operator", user_id)))
    }
}

/// Handle /admin and the admin panel keyboard button
pub async fn handle_admin_panel(services: &ServiceFactory, chat_id: i64, user_id: i64) -> Result<()> {
    debug!(user_id = user_id, chat_id = chat_id, "Processing admin panel request");
    ensure_operator(services, user_id)?;

    let text = admin_panel_text(services).await;
    services
        .messenger
        .send_text(chat_id, &text, Some(Keyboard::Inline(admin_panel_keyboard())))
        .await?;

    info!(user_id = user_id, "Operator opened admin panel");
    Ok(())
}

/// Handle /stats
pub async fn handle_stats(services: &ServiceFactory, chat_id: i64, user_id: i64) -> Result<()> {
    ensure_operator(services, user_id)?;

    let text = stats_text(services).await;
    services.messenger.send_text(chat_id, &text, None).await?;
    Ok(())
}

/// Run an admin panel action.
///
/// `message` is the panel message the button belongs to; when present the
/// panel is edited in place, otherwise a new message is sent.
pub async fn handle_admin_action(
    services: &ServiceFactory,
    user_id: i64,
    action: AdminAction,
    message: Option<(i64, i32)>,
) -> Result<()> {
    ensure_operator(services, user_id)?;
    debug!(user_id = user_id, action = action.as_str(), "Admin panel action");

    match action {
        AdminAction::Broadcast => {
            let already_armed = services.broadcast.arm().await?;
            if already_armed {
                debug!(user_id = user_id, "Broadcast was already armed");
            }
        }
        AdminAction::Stats => {
            let text = stats_text(services).await;
            show(services, user_id, message, &text, Some(back_keyboard())).await?;
        }
        AdminAction::Export => {
            let bytes = services.registry.export().await?;
            log_admin_action(user_id, "export", None, Some(&format!("{} bytes", bytes.len())));
            services
                .messenger
                .send_document(user_id, EXPORT_FILE_NAME, bytes)
                .await?;
        }
        AdminAction::Reset => {
            let users = services.registry.len().await;
            let text = format!(
                "🗑 Reset the registry?\n\nAll {} registered users will be removed. Only your own ID is kept.",
                users
            );
            show(services, user_id, message, &text, Some(reset_confirm_keyboard())).await?;
        }
        AdminAction::ResetConfirm => {
            services.registry.reset(user_id).await?;
            log_admin_action(user_id, "reset", None, None);
            show(
                services,
                user_id,
                message,
                "✅ Registry reset. Only your ID is kept.",
                Some(back_keyboard()),
            )
            .await?;
        }
        AdminAction::Cancel => {
            let text = if services.broadcast.cancel() {
                "❌ Broadcast cancelled."
            } else {
                "ℹ️ No broadcast is pending."
            };
            show(services, user_id, message, text, None).await?;
        }
        AdminAction::Back => {
            let text = admin_panel_text(services).await;
            show(services, user_id, message, &text, Some(admin_panel_keyboard())).await?;
        }
    }

    Ok(())
}

async fn show(
    services: &ServiceFactory,
    user_id: i64,
    message: Option<(i64, i32)>,
    text: &str,
    keyboard: Option<InlineKeyboard>,
) -> Result<()> {
    match message {
        Some((chat_id, message_id)) => {
            services
                .messenger
                .edit_text(chat_id, message_id, text, keyboard)
                .await
        }
        None => {
            services
                .messenger
                .send_text(user_id, text, keyboard.map(Keyboard::Inline))
                .await?;
            Ok(())
        }
    }
}

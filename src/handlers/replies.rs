//! Reply texts for identifier reports

use crate::models::ChatProfile;
use crate::utils::helpers::truncate_text;

const MAX_NAME_CHARS: usize = 64;

pub fn self_id(user_id: i64) -> String {
    format!("Your Id: {}", user_id)
}

pub fn shared_chat(chat_id: i64) -> String {
    format!("Target ID: {}", chat_id)
}

pub fn shared_users(user_ids: &[i64]) -> String {
    if user_ids.is_empty() {
        return "No user was shared.".to_string();
    }

    user_ids
        .iter()
        .map(|id| format!("Target ID: {}", id))
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn forwarded_chat(chat_id: i64, title: Option<&str>, is_channel: bool) -> String {
    let mut text = format!("Forwarded Chat Id: {}", chat_id);
    if let Some(title) = title {
        let label = if is_channel { "Channel" } else { "Chat" };
        text.push_str(&format!("\n{}: {}", label, truncate_text(title, MAX_NAME_CHARS)));
    }
    text
}

pub fn forwarded_user(user_id: i64, name: Option<&str>, is_bot: bool) -> String {
    let mut text = format!("Forwarded User/Bot Id: {}", user_id);
    if let Some(name) = name {
        let label = if is_bot { "Bot" } else { "Name" };
        text.push_str(&format!("\n{}: {}", label, name));
    }
    text
}

pub fn hidden_forward(name: &str) -> String {
    format!(
        "🔒 {} hides their account in forwarded messages, so their ID is not available.",
        name
    )
}

pub fn contact(user_id: Option<i64>, name: Option<&str>) -> String {
    match (user_id, name) {
        (Some(id), Some(name)) => format!("Contact User Id: {}\nName: {}", id, name),
        (Some(id), None) => format!("Contact User Id: {}", id),
        (None, _) => "This contact has no Telegram account.".to_string(),
    }
}

pub fn lookup_found(profile: &ChatProfile) -> String {
    let mut text = format!("🔎 ID: {}", profile.id);
    if let Some(name) = profile.display_name() {
        text.push_str(&format!("\nName: {}", truncate_text(&name, MAX_NAME_CHARS)));
    }
    if let Some(kind) = &profile.kind {
        text.push_str(&format!("\nType: {}", kind));
    }
    if let Some(username) = &profile.username {
        text.push_str(&format!("\nUsername: @{}", username));
    }
    text
}

pub fn lookup_not_found(id: impl std::fmt::Display) -> String {
    format!("❌ Chat not found: {}", id)
}

pub fn new_user_notice(user_id: i64, name: &str) -> String {
    format!("🆕 New user: {} ({})", name, user_id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_replies() {
        assert_eq!(self_id(42), "Your Id: 42");
        assert_eq!(shared_chat(-100123), "Target ID: -100123");
        assert_eq!(shared_users(&[1, 2]), "Target ID: 1\nTarget ID: 2");
        assert_eq!(forwarded_chat(-1001, Some("News"), true), "Forwarded Chat Id: -1001\nChannel: News");
        assert_eq!(forwarded_user(7, None, false), "Forwarded User/Bot Id: 7");
        assert_eq!(contact(Some(9), None), "Contact User Id: 9");
        assert!(contact(None, Some("Bob")).contains("no Telegram account"));
    }

    #[test]
    fn test_lookup_found() {
        let profile = ChatProfile {
            id: -1001,
            kind: Some("channel".to_string()),
            title: Some("News".to_string()),
            username: Some("news".to_string()),
            ..Default::default()
        };
        assert_eq!(lookup_found(&profile), "🔎 ID: -1001\nName: News\nType: channel\nUsername: @news");
    }
}

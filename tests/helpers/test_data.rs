//! Update builders

use IdBot::models::{CallbackUpdate, InboundUpdate, Sender, UpdateKind, VideoAttachment};

static NEXT_MESSAGE_ID: std::sync::atomic::AtomicI32 = std::sync::atomic::AtomicI32::new(1);

pub fn sender(id: i64) -> Sender {
    Sender {
        id,
        first_name: format!("User{}", id),
        last_name: None,
        username: Some(format!("user{}", id)),
        is_bot: false,
    }
}

/// A message from `user_id` in their private chat
pub fn update(user_id: i64, kind: UpdateKind) -> InboundUpdate {
    InboundUpdate {
        sender: sender(user_id),
        chat_id: user_id,
        message_id: NEXT_MESSAGE_ID.fetch_add(1, std::sync::atomic::Ordering::SeqCst),
        kind,
    }
}

pub fn text_update(user_id: i64, text: &str) -> InboundUpdate {
    update(user_id, UpdateKind::Text(text.to_string()))
}

pub fn forwarded_user_update(user_id: i64, origin: i64) -> InboundUpdate {
    update(
        user_id,
        UpdateKind::ForwardedUser {
            user_id: origin,
            name: Some("Origin User".to_string()),
            is_bot: false,
        },
    )
}

pub fn video_update(user_id: i64, size: u64) -> InboundUpdate {
    update(
        user_id,
        UpdateKind::Video(VideoAttachment {
            file_id: "BAACAgIAAxkBAAIB".to_string(),
            file_size: size,
            file_name: Some("holiday clip.mp4".to_string()),
        }),
    )
}

/// A button press on a panel message in the user's private chat
pub fn callback(user_id: i64, data: &str) -> CallbackUpdate {
    CallbackUpdate {
        sender: sender(user_id),
        data: data.to_string(),
        message: Some((user_id, 500)),
    }
}

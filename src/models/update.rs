//! Inbound update model
//!
//! Teloxide messages are classified once, at the boundary, into
//! [`UpdateKind`]. Everything downstream matches on the variant instead of
//! probing optional message fields.

use teloxide::types::{CallbackQuery, Message, MessageChatShared, MessageKind, MessageOrigin, MessageUsersShared, User};
use crate::utils::helpers::display_name;

/// The account that sent an update
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sender {
    pub id: i64,
    pub first_name: String,
    pub last_name: Option<String>,
    pub username: Option<String>,
    pub is_bot: bool,
}

/// A video that may be converted to audio
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VideoAttachment {
    pub file_id: String,
    pub file_size: u64,
    pub file_name: Option<String>,
}

/// Shape of an inbound message, decided once
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UpdateKind {
    /// A chat picked with a "request chat" keyboard button
    ChatShared { chat_id: i64 },
    /// One or more users picked with a "request user" keyboard button
    UserShared { user_ids: Vec<i64> },
    /// Forwarded channel post, or a message an anonymous admin sent on behalf of a group
    ForwardedChat { chat_id: i64, title: Option<String>, is_channel: bool },
    ForwardedUser { user_id: i64, name: Option<String>, is_bot: bool },
    /// Forwarded from an account that hides its identity
    ForwardedHiddenUser { name: String },
    Contact { user_id: Option<i64>, name: Option<String> },
    Video(VideoAttachment),
    Text(String),
    Other,
}

/// One inbound message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InboundUpdate {
    pub sender: Sender,
    pub chat_id: i64,
    pub message_id: i32,
    pub kind: UpdateKind,
}

/// An inline button press
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallbackUpdate {
    pub sender: Sender,
    pub data: String,
    /// Chat and id of the message carrying the pressed button
    pub message: Option<(i64, i32)>,
}

impl From<&User> for Sender {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.0 as i64,
            first_name: user.first_name.clone(),
            last_name: user.last_name.clone(),
            username: user.username.clone(),
            is_bot: user.is_bot,
        }
    }
}

impl Sender {
    pub fn full_name(&self) -> String {
        display_name(Some(&self.first_name), self.last_name.as_deref())
            .unwrap_or_else(|| self.id.to_string())
    }
}

impl UpdateKind {
    /// Classify a message. Service messages for shared chats and users win
    /// over forward metadata, which wins over contacts, videos and text.
    pub fn from_message(msg: &Message) -> Self {
        match &msg.kind {
            MessageKind::ChatShared(MessageChatShared { chat_shared }) => {
                return UpdateKind::ChatShared {
                    chat_id: chat_shared.chat_id.0,
                };
            }
            MessageKind::UsersShared(MessageUsersShared { users_shared }) => {
                return UpdateKind::UserShared {
                    user_ids: users_shared
                        .users
                        .iter()
                        .map(|user| user.user_id.0 as i64)
                        .collect(),
                };
            }
            _ => {}
        }

        if let Some(origin) = msg.forward_origin() {
            return match origin {
                MessageOrigin::Channel { chat, .. } => UpdateKind::ForwardedChat {
                    chat_id: chat.id.0,
                    title: chat.title().map(str::to_string),
                    is_channel: true,
                },
                MessageOrigin::Chat { sender_chat, .. } => UpdateKind::ForwardedChat {
                    chat_id: sender_chat.id.0,
                    title: sender_chat.title().map(str::to_string),
                    is_channel: false,
                },
                MessageOrigin::User { sender_user, .. } => UpdateKind::ForwardedUser {
                    user_id: sender_user.id.0 as i64,
                    name: Some(sender_user.full_name()),
                    is_bot: sender_user.is_bot,
                },
                MessageOrigin::HiddenUser { sender_user_name, .. } => UpdateKind::ForwardedHiddenUser {
                    name: sender_user_name.clone(),
                },
            };
        }

        if let Some(contact) = msg.contact() {
            return UpdateKind::Contact {
                user_id: contact.user_id.map(|id| id.0 as i64),
                name: display_name(Some(&contact.first_name), contact.last_name.as_deref()),
            };
        }

        if let Some(video) = msg.video() {
            return UpdateKind::Video(VideoAttachment {
                file_id: video.file.id.clone(),
                file_size: u64::from(video.file.size),
                file_name: video.file_name.clone(),
            });
        }

        match msg.text() {
            Some(text) => UpdateKind::Text(text.to_string()),
            None => UpdateKind::Other,
        }
    }

    /// Short name used in logs
    pub fn label(&self) -> &'static str {
        match self {
            UpdateKind::ChatShared { .. } => "chat_shared",
            UpdateKind::UserShared { .. } => "user_shared",
            UpdateKind::ForwardedChat { .. } => "forwarded_chat",
            UpdateKind::ForwardedUser { .. } => "forwarded_user",
            UpdateKind::ForwardedHiddenUser { .. } => "forwarded_hidden_user",
            UpdateKind::Contact { .. } => "contact",
            UpdateKind::Video(_) => "video",
            UpdateKind::Text(_) => "text",
            UpdateKind::Other => "other",
        }
    }
}

impl InboundUpdate {
    /// Convert a teloxide message; messages without a sender (channel posts) are skipped
    pub fn from_message(msg: &Message) -> Option<Self> {
        let sender = Sender::from(msg.from.as_ref()?);

        Some(Self {
            sender,
            chat_id: msg.chat.id.0,
            message_id: msg.id.0,
            kind: UpdateKind::from_message(msg),
        })
    }
}

impl CallbackUpdate {
    pub fn from_query(query: &CallbackQuery) -> Option<Self> {
        let data = query.data.clone()?;

        Some(Self {
            sender: Sender::from(&query.from),
            data,
            message: query
                .message
                .as_ref()
                .map(|message| (message.chat().id.0, message.id().0)),
        })
    }
}

//! Messaging platform port
//!
//! Everything the bot asks of the Bot API goes through [`Messenger`]. The
//! production implementation wraps a teloxide [`Bot`]; tests substitute a
//! recording double.

use std::path::Path;
use async_trait::async_trait;
use teloxide::{
    net::Download,
    prelude::*,
    types::{
        ButtonRequest, ChatId, InlineKeyboardButton, InlineKeyboardMarkup, InputFile,
        KeyboardButton, KeyboardButtonRequestChat, KeyboardButtonRequestUsers, KeyboardMarkup,
        MessageId, ReplyMarkup, RequestId,
    },
};
use tracing::debug;
use crate::models::{ChatProfile, InlineKeyboard, Keyboard, ReplyButton, ReplyKeyboard};
use crate::utils::errors::{IdBotError, Result, TransferError};

#[async_trait]
pub trait Messenger: Send + Sync {
    /// Send a text message and return its message id
    async fn send_text(&self, chat_id: i64, text: &str, keyboard: Option<Keyboard>) -> Result<i32>;

    async fn edit_text(
        &self,
        chat_id: i64,
        message_id: i32,
        text: &str,
        keyboard: Option<InlineKeyboard>,
    ) -> Result<()>;

    async fn delete_message(&self, chat_id: i64, message_id: i32) -> Result<()>;

    async fn send_document(&self, chat_id: i64, file_name: &str, bytes: Vec<u8>) -> Result<()>;

    async fn send_audio(&self, chat_id: i64, path: &Path, title: Option<&str>) -> Result<()>;

    /// Resolve `file_id` and download it to `destination`
    async fn download_file(&self, file_id: &str, destination: &Path) -> Result<()>;

    /// Copy message `message_id` from `from_chat_id` to `to_chat_id`
    async fn copy_message(&self, to_chat_id: i64, from_chat_id: i64, message_id: i32) -> Result<()>;

    /// Resolve chat metadata for an identifier
    async fn lookup_chat(&self, chat_id: i64) -> Result<ChatProfile>;
}

/// [`Messenger`] backed by the Telegram Bot API
#[derive(Clone)]
pub struct TelegramMessenger {
    bot: Bot,
}

impl TelegramMessenger {
    pub fn new(bot: Bot) -> Self {
        Self { bot }
    }

    fn reply_markup(keyboard: Keyboard) -> ReplyMarkup {
        match keyboard {
            Keyboard::Reply(keyboard) => ReplyMarkup::Keyboard(Self::keyboard_markup(keyboard)),
            Keyboard::Inline(keyboard) => ReplyMarkup::InlineKeyboard(Self::inline_markup(keyboard)),
        }
    }

    fn keyboard_markup(keyboard: ReplyKeyboard) -> KeyboardMarkup {
        let rows: Vec<Vec<KeyboardButton>> = keyboard
            .rows
            .into_iter()
            .map(|row| row.into_iter().map(Self::keyboard_button).collect())
            .collect();

        KeyboardMarkup::new(rows).resize_keyboard()
    }

    fn keyboard_button(button: ReplyButton) -> KeyboardButton {
        match button {
            ReplyButton::Text(label) => KeyboardButton::new(label),
            ReplyButton::RequestUser { request_id, label, bot } => {
                let mut request = KeyboardButtonRequestUsers::new(RequestId(request_id));
                request.user_is_bot = Some(bot);
                KeyboardButton::new(label).request(ButtonRequest::RequestUsers(request))
            }
            ReplyButton::RequestChat { request_id, label, channel } => {
                let request = KeyboardButtonRequestChat::new(RequestId(request_id), channel);
                KeyboardButton::new(label).request(ButtonRequest::RequestChat(request))
            }
        }
    }

    fn inline_markup(keyboard: InlineKeyboard) -> InlineKeyboardMarkup {
        let rows: Vec<Vec<InlineKeyboardButton>> = keyboard
            .rows
            .into_iter()
            .map(|row| {
                row.into_iter()
                    .map(|button| InlineKeyboardButton::callback(button.label, button.data))
                    .collect()
            })
            .collect();

        InlineKeyboardMarkup::new(rows)
    }
}

#[async_trait]
impl Messenger for TelegramMessenger {
    async fn send_text(&self, chat_id: i64, text: &str, keyboard: Option<Keyboard>) -> Result<i32> {
        let mut request = self.bot.send_message(ChatId(chat_id), text);
        if let Some(keyboard) = keyboard {
            request = request.reply_markup(Self::reply_markup(keyboard));
        }

        let message = request.await?;
        Ok(message.id.0)
    }

    async fn edit_text(
        &self,
        chat_id: i64,
        message_id: i32,
        text: &str,
        keyboard: Option<InlineKeyboard>,
    ) -> Result<()> {
        let mut request = self
            .bot
            .edit_message_text(ChatId(chat_id), MessageId(message_id), text);
        if let Some(keyboard) = keyboard {
            request = request.reply_markup(Self::inline_markup(keyboard));
        }

        request.await?;
        Ok(())
    }

    async fn delete_message(&self, chat_id: i64, message_id: i32) -> Result<()> {
        self.bot
            .delete_message(ChatId(chat_id), MessageId(message_id))
            .await?;
        Ok(())
    }

    async fn send_document(&self, chat_id: i64, file_name: &str, bytes: Vec<u8>) -> Result<()> {
        let document = InputFile::memory(bytes).file_name(file_name.to_string());
        self.bot.send_document(ChatId(chat_id), document).await?;
        Ok(())
    }

    async fn send_audio(&self, chat_id: i64, path: &Path, title: Option<&str>) -> Result<()> {
        let mut request = self
            .bot
            .send_audio(ChatId(chat_id), InputFile::file(path.to_path_buf()));
        if let Some(title) = title {
            request = request.title(title.to_string());
        }

        request
            .await
            .map_err(|e| TransferError::Upload(e.to_string()))?;
        Ok(())
    }

    async fn download_file(&self, file_id: &str, destination: &Path) -> Result<()> {
        let file = self
            .bot
            .get_file(file_id.to_string())
            .await
            .map_err(|e| TransferError::Download(e.to_string()))?;

        let mut dst = tokio::fs::File::create(destination)
            .await
            .map_err(TransferError::Io)?;
        self.bot
            .download_file(&file.path, &mut dst)
            .await
            .map_err(|e| TransferError::Download(e.to_string()))?;

        debug!(file_id = file_id, destination = %destination.display(), "File downloaded");
        Ok(())
    }

    async fn copy_message(&self, to_chat_id: i64, from_chat_id: i64, message_id: i32) -> Result<()> {
        self.bot
            .copy_message(ChatId(to_chat_id), ChatId(from_chat_id), MessageId(message_id))
            .await
            .map_err(|e| IdBotError::Relay {
                recipient: to_chat_id,
                reason: e.to_string(),
            })?;
        Ok(())
    }

    async fn lookup_chat(&self, chat_id: i64) -> Result<ChatProfile> {
        let chat = self
            .bot
            .get_chat(ChatId(chat_id))
            .await
            .map_err(|e| {
                debug!(chat_id = chat_id, error = %e, "getChat failed");
                IdBotError::LookupNotFound { id: chat_id }
            })?;

        let value = serde_json::to_value(&chat)?;
        ChatProfile::from_json(&value).ok_or(IdBotError::LookupNotFound { id: chat_id })
    }
}

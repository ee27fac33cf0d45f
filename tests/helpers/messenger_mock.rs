//! Recording messenger and scripted transcoder

use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, AtomicI32, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use IdBot::models::{ChatProfile, InlineKeyboard, Keyboard};
use IdBot::services::{AudioTranscoder, Messenger};
use IdBot::utils::errors::{IdBotError, Result, TransferError, TransferResult};

/// Everything the bot asked the platform to do
#[derive(Debug, Clone, PartialEq)]
pub enum Sent {
    Text { chat_id: i64, text: String, keyboard: Option<Keyboard> },
    Edit { chat_id: i64, message_id: i32, text: String, keyboard: Option<InlineKeyboard> },
    Delete { chat_id: i64, message_id: i32 },
    Document { chat_id: i64, file_name: String, bytes: Vec<u8> },
    Audio { chat_id: i64, title: Option<String>, file_existed: bool },
    Copy { to: i64, from: i64, message_id: i32 },
}

type RelayHook = Box<dyn Fn(i64) + Send + Sync>;

#[derive(Default)]
pub struct MockMessenger {
    sent: Mutex<Vec<Sent>>,
    failing_recipients: Mutex<HashSet<i64>>,
    slow_ids: Mutex<HashSet<i64>>,
    chats: Mutex<HashMap<i64, ChatProfile>>,
    downloads: Mutex<Vec<PathBuf>>,
    download_fails: AtomicBool,
    next_message_id: AtomicI32,
    relay_hook: Mutex<Option<RelayHook>>,
}

impl MockMessenger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Relays to `recipient` fail as if the user blocked the bot
    pub fn fail_relay_to(&self, recipient: i64) {
        self.failing_recipients.lock().unwrap().insert(recipient);
    }

    /// Relays and lookups for `id` hang for a long time
    pub fn make_slow(&self, id: i64) {
        self.slow_ids.lock().unwrap().insert(id);
    }

    pub fn add_chat(&self, profile: ChatProfile) {
        self.chats.lock().unwrap().insert(profile.id, profile);
    }

    pub fn fail_downloads(&self) {
        self.download_fails.store(true, Ordering::SeqCst);
    }

    /// Called with the recipient before every relay attempt
    pub fn on_relay(&self, hook: impl Fn(i64) + Send + Sync + 'static) {
        *self.relay_hook.lock().unwrap() = Some(Box::new(hook));
    }

    pub fn sent(&self) -> Vec<Sent> {
        self.sent.lock().unwrap().clone()
    }

    pub fn clear(&self) {
        self.sent.lock().unwrap().clear();
    }

    pub fn texts_to(&self, chat_id: i64) -> Vec<String> {
        self.sent()
            .into_iter()
            .filter_map(|item| match item {
                Sent::Text { chat_id: to, text, .. } if to == chat_id => Some(text),
                _ => None,
            })
            .collect()
    }

    pub fn last_text_to(&self, chat_id: i64) -> Option<String> {
        self.texts_to(chat_id).pop()
    }

    pub fn copies(&self) -> Vec<(i64, i64, i32)> {
        self.sent()
            .into_iter()
            .filter_map(|item| match item {
                Sent::Copy { to, from, message_id } => Some((to, from, message_id)),
                _ => None,
            })
            .collect()
    }

    pub fn edits(&self) -> Vec<String> {
        self.sent()
            .into_iter()
            .filter_map(|item| match item {
                Sent::Edit { text, .. } => Some(text),
                _ => None,
            })
            .collect()
    }

    pub fn downloads(&self) -> Vec<PathBuf> {
        self.downloads.lock().unwrap().clone()
    }

    fn record(&self, item: Sent) {
        self.sent.lock().unwrap().push(item);
    }

    fn is_slow(&self, id: i64) -> bool {
        self.slow_ids.lock().unwrap().contains(&id)
    }
}

#[async_trait]
impl Messenger for MockMessenger {
    async fn send_text(&self, chat_id: i64, text: &str, keyboard: Option<Keyboard>) -> Result<i32> {
        self.record(Sent::Text {
            chat_id,
            text: text.to_string(),
            keyboard,
        });
        Ok(self.next_message_id.fetch_add(1, Ordering::SeqCst) + 1000)
    }

    async fn edit_text(
        &self,
        chat_id: i64,
        message_id: i32,
        text: &str,
        keyboard: Option<InlineKeyboard>,
    ) -> Result<()> {
        self.record(Sent::Edit {
            chat_id,
            message_id,
            text: text.to_string(),
            keyboard,
        });
        Ok(())
    }

    async fn delete_message(&self, chat_id: i64, message_id: i32) -> Result<()> {
        self.record(Sent::Delete { chat_id, message_id });
        Ok(())
    }

    async fn send_document(&self, chat_id: i64, file_name: &str, bytes: Vec<u8>) -> Result<()> {
        self.record(Sent::Document {
            chat_id,
            file_name: file_name.to_string(),
            bytes,
        });
        Ok(())
    }

    async fn send_audio(&self, chat_id: i64, path: &Path, title: Option<&str>) -> Result<()> {
        self.record(Sent::Audio {
            chat_id,
            title: title.map(str::to_string),
            file_existed: path.exists(),
        });
        Ok(())
    }

    async fn download_file(&self, _file_id: &str, destination: &Path) -> Result<()> {
        self.downloads.lock().unwrap().push(destination.to_path_buf());
        if self.download_fails.load(Ordering::SeqCst) {
            return Err(TransferError::Download("file is unavailable".to_string()).into());
        }
        std::fs::write(destination, b"fake video").map_err(TransferError::Io)?;
        Ok(())
    }

    async fn copy_message(&self, to_chat_id: i64, from_chat_id: i64, message_id: i32) -> Result<()> {
        if let Some(hook) = self.relay_hook.lock().unwrap().as_ref() {
            hook(to_chat_id);
        }

        if self.is_slow(to_chat_id) {
            tokio::time::sleep(Duration::from_secs(30)).await;
        }

        if self.failing_recipients.lock().unwrap().contains(&to_chat_id) {
            return Err(IdBotError::Relay {
                recipient: to_chat_id,
                reason: "Forbidden: bot was blocked by the user".to_string(),
            });
        }

        self.record(Sent::Copy {
            to: to_chat_id,
            from: from_chat_id,
            message_id,
        });
        Ok(())
    }

    async fn lookup_chat(&self, chat_id: i64) -> Result<ChatProfile> {
        if self.is_slow(chat_id) {
            tokio::time::sleep(Duration::from_secs(30)).await;
        }

        self.chats
            .lock()
            .unwrap()
            .get(&chat_id)
            .cloned()
            .ok_or(IdBotError::LookupNotFound { id: chat_id })
    }
}

/// Transcoder that writes a fake MP3 or fails on demand
#[derive(Default)]
pub struct ScriptedTranscoder {
    fail: AtomicBool,
    calls: Mutex<Vec<(PathBuf, PathBuf)>>,
}

impl ScriptedTranscoder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing() -> Self {
        let transcoder = Self::default();
        transcoder.fail.store(true, Ordering::SeqCst);
        transcoder
    }

    pub fn calls(&self) -> Vec<(PathBuf, PathBuf)> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl AudioTranscoder for ScriptedTranscoder {
    async fn convert(&self, input: &Path, output: &Path) -> TransferResult<()> {
        self.calls
            .lock()
            .unwrap()
            .push((input.to_path_buf(), output.to_path_buf()));

        if self.fail.load(Ordering::SeqCst) {
            return Err(TransferError::Transcode("ffmpeg exited with 1: invalid data".to_string()));
        }

        std::fs::write(output, b"fake mp3")?;
        Ok(())
    }
}

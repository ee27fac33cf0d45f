//! Platform-neutral keyboard descriptions
//!
//! Handlers describe keyboards with these types; the Telegram messenger turns
//! them into teloxide markups.

/// A button on the reply keyboard shown under the input field
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplyButton {
    /// Sends its label as a plain text message
    Text(String),
    /// Opens the user picker; `bot` selects bots instead of people
    RequestUser { request_id: i32, label: String, bot: bool },
    /// Opens the chat picker; `channel` selects channels instead of groups
    RequestChat { request_id: i32, label: String, channel: bool },
}

/// A button attached to a message carrying callback data
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InlineButton {
    pub label: String,
    pub data: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReplyKeyboard {
    pub rows: Vec<Vec<ReplyButton>>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InlineKeyboard {
    pub rows: Vec<Vec<InlineButton>>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Keyboard {
    Reply(ReplyKeyboard),
    Inline(InlineKeyboard),
}

impl InlineButton {
    pub fn callback(label: impl Into<String>, data: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            data: data.into(),
        }
    }
}

impl InlineKeyboard {
    pub fn new(rows: Vec<Vec<InlineButton>>) -> Self {
        Self { rows }
    }

    /// Callback data of every button, row by row
    pub fn callback_data(&self) -> Vec<&str> {
        self.rows
            .iter()
            .flatten()
            .map(|button| button.data.as_str())
            .collect()
    }
}

impl ReplyKeyboard {
    pub fn new(rows: Vec<Vec<ReplyButton>>) -> Self {
        Self { rows }
    }

    /// Labels of every button, row by row
    pub fn labels(&self) -> Vec<&str> {
        self.rows
            .iter()
            .flatten()
            .map(|button| match button {
                ReplyButton::Text(label) => label.as_str(),
                ReplyButton::RequestUser { label, .. } => label.as_str(),
                ReplyButton::RequestChat { label, .. } => label.as_str(),
            })
            .collect()
    }
}

impl From<InlineKeyboard> for Keyboard {
    fn from(keyboard: InlineKeyboard) -> Self {
        Keyboard::Inline(keyboard)
    }
}

impl From<ReplyKeyboard> for Keyboard {
    fn from(keyboard: ReplyKeyboard) -> Self {
        Keyboard::Reply(keyboard)
    }
}

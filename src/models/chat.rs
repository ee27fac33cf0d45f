//! Resolved chat metadata

use serde::{Deserialize, Serialize};

/// What the platform knows about an identifier
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatProfile {
    pub id: i64,
    /// Platform chat type: `private`, `group`, `supergroup` or `channel`
    pub kind: Option<String>,
    pub title: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub username: Option<String>,
}

impl ChatProfile {
    /// Best human-readable name: title for groups and channels, full name for users
    pub fn display_name(&self) -> Option<String> {
        self.title
            .clone()
            .or_else(|| {
                crate::utils::helpers::display_name(
                    self.first_name.as_deref(),
                    self.last_name.as_deref(),
                )
            })
    }

    /// Build a profile from the Bot API `Chat` JSON object
    pub fn from_json(value: &serde_json::Value) -> Option<Self> {
        let text = |key: &str| value.get(key).and_then(|v| v.as_str()).map(str::to_string);

        Some(Self {
            id: value.get("id")?.as_i64()?,
            kind: text("type"),
            title: text("title"),
            first_name: text("first_name"),
            last_name: text("last_name"),
            username: text("username"),
        })
    }
}

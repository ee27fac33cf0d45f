//! Application settings management
//!
//! This module defines the configuration structure and provides methods
//! for loading settings from TOML files and environment variables.

use std::time::Duration;
use serde::{Deserialize, Serialize};

/// Main application configuration structure
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Settings {
    pub bot: BotConfig,
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub registry: RegistryConfig,
    #[serde(default)]
    pub broadcast: BroadcastConfig,
    #[serde(default)]
    pub lookup: LookupConfig,
    #[serde(default)]
    pub converter: ConverterConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Telegram bot configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct BotConfig {
    pub token: String,
    /// The single account allowed to broadcast, export and reset
    pub operator_id: i64,
    /// Alternative Bot API server, e.g. a self-hosted one
    #[serde(default)]
    pub api_url: Option<String>,
    #[serde(default = "default_request_timeout")]
    pub request_timeout_seconds: u64,
}

/// Registry file location
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct StorageConfig {
    pub registry_path: String,
}

/// Registry behaviour
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct RegistryConfig {
    pub notify_operator_on_new_user: bool,
}

/// Broadcast pacing and timeouts
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct BroadcastConfig {
    /// Constant pause between two consecutive relay attempts
    pub relay_delay_ms: u64,
    pub relay_timeout_seconds: u64,
}

/// What to do when a numeric id cannot be resolved
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LookupMissPolicy {
    /// Reply with a not-found message
    #[default]
    ReplyError,
    /// Treat the text as ordinary text and reply with the sender's own id
    FallThrough,
}

/// Numeric id lookup configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LookupConfig {
    pub on_lookup_miss: LookupMissPolicy,
    pub timeout_seconds: u64,
}

/// Video to audio conversion configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ConverterConfig {
    pub enabled: bool,
    pub ffmpeg_path: String,
    /// Bot API download limit for regular bots is 20 MB
    pub max_file_size_bytes: u64,
    pub audio_bitrate: String,
    pub timeout_seconds: u64,
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    /// Directory for the daily rolling log file; stdout only when unset
    pub directory: Option<String>,
}

/// Long polling keeps a `getUpdates` request open for this long
pub const POLLING_TIMEOUT_SECONDS: u64 = 10;

fn default_request_timeout() -> u64 {
    17
}

impl Settings {
    /// Load settings from configuration file and environment variables
    ///
    /// Sources in increasing priority: `config.toml`, `IDBOT__SECTION__KEY`
    /// variables, then the short `BOT_TOKEN` and `ADMIN_ID` variables.
    pub fn new() -> Result<Self, config::ConfigError> {
        let settings = config::Config::builder()
            .add_source(config::File::with_name("config").required(false))
            .add_source(
                config::Environment::with_prefix("IDBOT")
                    .prefix_separator("__")
                    .separator("__"),
            )
            .set_override_option("bot.token", std::env::var("BOT_TOKEN").ok())?
            .set_override_option("bot.operator_id", std::env::var("ADMIN_ID").ok())?
            .build()?;

        settings.try_deserialize()
    }

    /// Validate configuration settings
    pub fn validate(&self) -> Result<(), crate::utils::errors::IdBotError> {
        super::validation::validate_settings(self)
    }

    /// Timeout applied to every Bot API request
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.bot.request_timeout_seconds)
    }
}

impl Default for BotConfig {
    fn default() -> Self {
        Self {
            token: String::new(),
            operator_id: 0,
            api_url: None,
            request_timeout_seconds: default_request_timeout(),
        }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            registry_path: "users.json".to_string(),
        }
    }
}

impl Default for BroadcastConfig {
    fn default() -> Self {
        Self {
            relay_delay_ms: 50,
            relay_timeout_seconds: 10,
        }
    }
}

impl BroadcastConfig {
    pub fn relay_delay(&self) -> Duration {
        Duration::from_millis(self.relay_delay_ms)
    }

    pub fn relay_timeout(&self) -> Duration {
        Duration::from_secs(self.relay_timeout_seconds)
    }
}

impl Default for LookupConfig {
    fn default() -> Self {
        Self {
            on_lookup_miss: LookupMissPolicy::ReplyError,
            timeout_seconds: 10,
        }
    }
}

impl LookupConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }
}

impl Default for ConverterConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            ffmpeg_path: "ffmpeg".to_string(),
            max_file_size_bytes: 20 * 1024 * 1024,
            audio_bitrate: "192k".to_string(),
            timeout_seconds: 300,
        }
    }
}

impl ConverterConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            directory: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minimal_toml_uses_section_defaults() {
        let settings: Settings = config::Config::builder()
            .add_source(config::File::from_str(
                r#"
                [bot]
                token = "12345:test_token"
                operator_id = 42
                "#,
                config::FileFormat::Toml,
            ))
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap();

        assert_eq!(settings.bot.operator_id, 42);
        assert_eq!(settings.bot.request_timeout_seconds, 17);
        assert_eq!(settings.storage.registry_path, "users.json");
        assert_eq!(settings.lookup.on_lookup_miss, LookupMissPolicy::ReplyError);
        assert_eq!(settings.broadcast.relay_delay(), Duration::from_millis(50));
        assert_eq!(settings.converter.max_file_size_bytes, 20 * 1024 * 1024);
        assert!(!settings.registry.notify_operator_on_new_user);
    }

    #[test]
    fn test_lookup_miss_policy_parsing() {
        let settings: Settings = config::Config::builder()
            .add_source(config::File::from_str(
                r#"
                [bot]
                token = "t"
                operator_id = 1

                [lookup]
                on_lookup_miss = "fall_through"
                timeout_seconds = 3
                "#,
                config::FileFormat::Toml,
            ))
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap();

        assert_eq!(settings.lookup.on_lookup_miss, LookupMissPolicy::FallThrough);
        assert_eq!(settings.lookup.timeout(), Duration::from_secs(3));
    }
}

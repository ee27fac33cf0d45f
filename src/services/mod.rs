//! Services module
//!
//! This module contains business logic services

pub mod broadcast;
pub mod converter;
pub mod lookup;
pub mod messenger;

// Re-export commonly used services
pub use broadcast::{BroadcastDispatcher, BroadcastPayload};
pub use converter::{AudioTranscoder, ConversionService, FfmpegTranscoder};
pub use lookup::LookupService;
pub use messenger::{Messenger, TelegramMessenger};

use std::sync::Arc;
use crate::config::settings::Settings;
use crate::database::UserRegistry;

/// Service factory for creating and managing all services
#[derive(Clone)]
pub struct ServiceFactory {
    pub settings: Settings,
    pub messenger: Arc<dyn Messenger>,
    pub registry: UserRegistry,
    pub broadcast: BroadcastDispatcher,
    pub lookup: LookupService,
    pub converter: ConversionService,
    /// Username of the bot itself, used to parse `/command@bot`
    pub bot_username: String,
}

impl ServiceFactory {
    /// Create a new ServiceFactory using ffmpeg for conversions
    pub fn new(
        settings: Settings,
        messenger: Arc<dyn Messenger>,
        registry: UserRegistry,
        bot_username: impl Into<String>,
    ) -> Self {
        let transcoder = Arc::new(FfmpegTranscoder::from_config(&settings.converter));
        Self::with_transcoder(settings, messenger, registry, transcoder, bot_username)
    }

    /// Create a new ServiceFactory with a custom transcoder
    pub fn with_transcoder(
        settings: Settings,
        messenger: Arc<dyn Messenger>,
        registry: UserRegistry,
        transcoder: Arc<dyn AudioTranscoder>,
        bot_username: impl Into<String>,
    ) -> Self {
        let broadcast = BroadcastDispatcher::new(
            settings.bot.operator_id,
            registry.clone(),
            messenger.clone(),
            settings.broadcast.relay_delay(),
            settings.broadcast.relay_timeout(),
        );
        let lookup = LookupService::new(
            messenger.clone(),
            settings.lookup.timeout(),
            settings.lookup.on_lookup_miss,
        );
        let converter = ConversionService::new(
            messenger.clone(),
            transcoder,
            settings.converter.max_file_size_bytes,
        );

        Self {
            settings,
            messenger,
            registry,
            broadcast,
            lookup,
            converter,
            bot_username: bot_username.into(),
        }
    }

    pub fn operator_id(&self) -> i64 {
        self.settings.bot.operator_id
    }

    pub fn is_operator(&self, user_id: i64) -> bool {
        user_id == self.operator_id()
    }
}

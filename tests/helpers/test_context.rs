//! Test context: services wired to the recording messenger

use std::path::PathBuf;
use std::sync::Arc;

use tempfile::TempDir;
use IdBot::config::Settings;
use IdBot::database::UserRegistry;
use IdBot::services::ServiceFactory;

use super::messenger_mock::{MockMessenger, ScriptedTranscoder};

pub const TEST_OPERATOR_ID: i64 = 1000;
pub const TEST_BOT_USERNAME: &str = "id_test_bot";

pub fn test_settings(registry_path: PathBuf) -> Settings {
    let mut settings = Settings::default();
    settings.bot.token = test_bot_token();
    settings.bot.operator_id = TEST_OPERATOR_ID;
    settings.storage.registry_path = registry_path.to_string_lossy().into_owned();
    settings.broadcast.relay_delay_ms = 0;
    settings.broadcast.relay_timeout_seconds = 1;
    settings.lookup.timeout_seconds = 1;
    settings.converter.max_file_size_bytes = 1024 * 1024;
    settings
}

pub fn test_bot_token() -> String {
    "12345:test_token".to_string()
}

/// Everything a handler test needs, backed by a temporary registry file
pub struct TestContext {
    pub temp_dir: TempDir,
    pub messenger: Arc<MockMessenger>,
    pub transcoder: Arc<ScriptedTranscoder>,
    pub services: ServiceFactory,
}

impl TestContext {
    pub async fn new() -> Self {
        Self::with_settings(|_| {}).await
    }

    pub async fn with_settings(configure: impl FnOnce(&mut Settings)) -> Self {
        Self::build(configure, ScriptedTranscoder::new()).await
    }

    pub async fn with_transcoder(transcoder: ScriptedTranscoder) -> Self {
        Self::build(|_| {}, transcoder).await
    }

    async fn build(configure: impl FnOnce(&mut Settings), transcoder: ScriptedTranscoder) -> Self {
        let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
        let mut settings = test_settings(temp_dir.path().join("users.json"));
        configure(&mut settings);

        let registry = UserRegistry::open(&settings.storage.registry_path)
            .await
            .expect("Failed to open registry");
        let messenger = Arc::new(MockMessenger::new());
        let transcoder = Arc::new(transcoder);

        let services = ServiceFactory::with_transcoder(
            settings,
            messenger.clone(),
            registry,
            transcoder.clone(),
            TEST_BOT_USERNAME,
        );

        Self {
            temp_dir,
            messenger,
            transcoder,
            services,
        }
    }

    pub fn registry_path(&self) -> PathBuf {
        self.temp_dir.path().join("users.json")
    }
}

//! IdBot Telegram Bot
//!
//! Main application entry point

use std::sync::Arc;
use teloxide::{prelude::*, types::{CallbackQuery, Update}};
use teloxide::dispatching::UpdateHandler;
use teloxide::utils::command::BotCommands;
use tracing::{info, warn};

use IdBot::{
    config::Settings,
    database::UserRegistry,
    handlers::{self, Command},
    models::{CallbackUpdate, InboundUpdate},
    services::{Messenger, ServiceFactory, TelegramMessenger},
    utils::{errors::IdBotError, logging},
};

type HandlerResult = Result<(), Box<dyn std::error::Error + Send + Sync>>;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv::dotenv().ok();

    // Load configuration
    let settings = Settings::new()?;
    settings.validate()?;

    // Initialize logging
    let _log_guard = logging::init_logging(&settings.logging)?;

    info!("Starting {}...", IdBot::info());

    // Open the user registry
    info!(path = %settings.storage.registry_path, "Opening user registry...");
    let registry = UserRegistry::open(&settings.storage.registry_path).await?;

    // Initialize bot
    let bot = create_bot(&settings)?;
    let me = bot.get_me().await?;
    let bot_username = me.username.clone().unwrap_or_default();
    info!(bot_id = me.id.0, username = %bot_username, "Authorized on Telegram");

    if let Err(e) = bot.set_my_commands(Command::bot_commands()).await {
        warn!(error = %e, "Failed to register bot commands");
    }

    // Initialize services
    let messenger: Arc<dyn Messenger> = Arc::new(TelegramMessenger::new(bot.clone()));
    let services = Arc::new(ServiceFactory::new(
        settings.clone(),
        messenger,
        registry,
        bot_username,
    ));

    info!("Setting up bot handlers...");
    let handler = create_handler();

    // Create dispatcher with dependencies registered
    let mut dispatcher = Dispatcher::builder(bot, handler)
        .dependencies(dptree::deps![services])
        .default_handler(|upd| async move {
            warn!("Unhandled update: {:?}", upd.kind);
        })
        .enable_ctrlc_handler()
        .build();

    info!(operator_id = settings.bot.operator_id, "IdBot is ready, starting polling...");

    dispatcher.dispatch().await;

    info!("IdBot has been shut down.");

    Ok(())
}

/// Build the Bot API client from settings
fn create_bot(settings: &Settings) -> Result<Bot, IdBotError> {
    let client = teloxide::net::default_reqwest_settings()
        .timeout(settings.request_timeout())
        .build()
        .map_err(|e| IdBotError::Config(format!("Failed to build HTTP client: {}", e)))?;

    let mut bot = Bot::with_client(&settings.bot.token, client);

    if let Some(api_url) = &settings.bot.api_url {
        let url = api_url
            .parse()
            .map_err(|e| IdBotError::Config(format!("Invalid bot API URL {}: {}", api_url, e)))?;
        bot = bot.set_api_url(url);
    }

    Ok(bot)
}

/// Create the main update handler
fn create_handler() -> UpdateHandler<Box<dyn std::error::Error + Send + Sync + 'static>> {
    dptree::entry()
        .branch(Update::filter_message().endpoint(handle_messages))
        .branch(Update::filter_callback_query().endpoint(handle_callbacks))
}

/// Handle incoming messages
async fn handle_messages(msg: Message, services: Arc<ServiceFactory>) -> HandlerResult {
    match InboundUpdate::from_message(&msg) {
        Some(update) => handlers::process_message(&services, update).await,
        None => warn!(chat_id = msg.chat.id.0, "Ignoring message without sender"),
    }

    Ok(())
}

/// Handle callback queries
async fn handle_callbacks(bot: Bot, query: CallbackQuery, services: Arc<ServiceFactory>) -> HandlerResult {
    if let Err(e) = bot.answer_callback_query(query.id.clone()).await {
        warn!(error = %e, "Failed to answer callback query");
    }

    if let Some(callback) = CallbackUpdate::from_query(&query) {
        handlers::process_callback(&services, callback).await;
    }

    Ok(())
}

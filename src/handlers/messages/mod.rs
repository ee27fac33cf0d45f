//! Message handlers module
//!
//! Records every sender, routes the update and executes the chosen reply.

use tracing::{debug, error, info, warn};
use crate::config::LookupMissPolicy;
use crate::handlers::commands::{admin, start};
use crate::handlers::replies;
use crate::handlers::router::{route, ReplyIntent, Route, RouterContext};
use crate::models::{AddResult, InboundUpdate, Sender};
use crate::services::{BroadcastPayload, ServiceFactory};
use crate::utils::errors::{ErrorSeverity, IdBotError, Result};
use crate::utils::logging::log_route;

/// Update boundary: handle one message and turn any failure into a log entry
/// and, where possible, a reply. Never returns an error.
pub async fn process_message(services: &ServiceFactory, update: InboundUpdate) {
    let chat_id = update.chat_id;
    let user_id = update.sender.id;

    if let Err(e) = handle_message(services, update).await {
        match e.severity() {
            ErrorSeverity::Info | ErrorSeverity::Warning => {
                warn!(user_id = user_id, chat_id = chat_id, error = %e, "Message not handled")
            }
            _ => error!(user_id = user_id, chat_id = chat_id, error = %e, "Error handling message"),
        }

        if let Err(reply_error) = services.messenger.send_text(chat_id, &e.user_message(), None).await {
            warn!(chat_id = chat_id, error = %reply_error, "Failed to send error reply");
        }
    }
}

/// Handle one inbound message
pub async fn handle_message(services: &ServiceFactory, update: InboundUpdate) -> Result<()> {
    record_sender(services, &update.sender).await;

    let ctx = RouterContext {
        operator_id: services.operator_id(),
        broadcast_armed: services.broadcast.is_armed(),
        conversion_enabled: services.settings.converter.enabled,
        bot_username: &services.bot_username,
    };
    let decision = route(&update, &ctx);
    log_route(update.sender.id, decision.label());

    match decision {
        Route::Broadcast => handle_broadcast_payload(services, &update).await,
        Route::Reply(intent) => execute_intent(services, &update, intent).await,
    }
}

/// Add the sender to the registry. A persistence failure is logged and the
/// update is still answered.
async fn record_sender(services: &ServiceFactory, sender: &Sender) {
    match services.registry.add(sender.id).await {
        Ok(AddResult::Added) => {
            info!(user_id = sender.id, "New user registered");
            if services.settings.registry.notify_operator_on_new_user && !services.is_operator(sender.id) {
                let notice = replies::new_user_notice(sender.id, &sender.full_name());
                if let Err(e) = services.messenger.send_text(services.operator_id(), &notice, None).await {
                    warn!(user_id = sender.id, error = %e, "Failed to notify operator about new user");
                }
            }
        }
        Ok(AddResult::AlreadyPresent) => {}
        Err(e) => error!(user_id = sender.id, error = %e, "Failed to record sender"),
    }
}

async fn handle_broadcast_payload(services: &ServiceFactory, update: &InboundUpdate) -> Result<()> {
    let payload = BroadcastPayload {
        chat_id: update.chat_id,
        message_id: update.message_id,
    };

    match services.broadcast.consume(update.sender.id, payload).await {
        Some(outcome) => {
            services
                .messenger
                .send_text(update.chat_id, &outcome.report(), None)
                .await?;
        }
        None => debug!(user_id = update.sender.id, "Broadcast already consumed"),
    }

    Ok(())
}

async fn execute_intent(services: &ServiceFactory, update: &InboundUpdate, intent: ReplyIntent) -> Result<()> {
    let chat_id = update.chat_id;
    let user_id = update.sender.id;

    let text = match intent {
        ReplyIntent::SharedChat { chat_id: shared } => replies::shared_chat(shared),
        ReplyIntent::SharedUsers { user_ids } => replies::shared_users(&user_ids),
        ReplyIntent::ForwardedChat { chat_id: origin, title, is_channel } => {
            replies::forwarded_chat(origin, title.as_deref(), is_channel)
        }
        ReplyIntent::ForwardedUser { user_id: origin, name, is_bot } => {
            replies::forwarded_user(origin, name.as_deref(), is_bot)
        }
        ReplyIntent::HiddenForward { name } => replies::hidden_forward(&name),
        ReplyIntent::Contact { user_id: contact, name } => replies::contact(contact, name.as_deref()),
        ReplyIntent::SelfId { user_id: own } => replies::self_id(own),
        ReplyIntent::Lookup { id } => match services.lookup.resolve(id).await {
            Ok(profile) => replies::lookup_found(&profile),
            Err(IdBotError::LookupNotFound { id }) => match services.lookup.miss_policy() {
                LookupMissPolicy::ReplyError => replies::lookup_not_found(id),
                LookupMissPolicy::FallThrough => replies::self_id(user_id),
            },
            Err(e) => return Err(e),
        },
        ReplyIntent::UnresolvableId { text } => match services.lookup.miss_policy() {
            LookupMissPolicy::ReplyError => replies::lookup_not_found(&text),
            LookupMissPolicy::FallThrough => replies::self_id(user_id),
        },
        ReplyIntent::ConvertVideo(video) => {
            return services.converter.convert_video(chat_id, &video).await;
        }
        ReplyIntent::Welcome => return start::handle_start(services, chat_id, user_id).await,
        ReplyIntent::Help => return start::handle_help(services, chat_id).await,
        ReplyIntent::PromptManualId => return start::handle_manual_id_prompt(services, chat_id).await,
        ReplyIntent::ShowAdminPanel => return admin::handle_admin_panel(services, chat_id, user_id).await,
        ReplyIntent::ShowStats => return admin::handle_stats(services, chat_id, user_id).await,
    };

    services.messenger.send_text(chat_id, &text, None).await?;
    Ok(())
}

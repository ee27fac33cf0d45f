//! Callback query handlers module
//!
//! Inline buttons only exist on the operator's admin panel.

use tracing::{error, warn};
use crate::handlers::commands::admin::{handle_admin_action, AdminAction};
use crate::models::CallbackUpdate;
use crate::services::ServiceFactory;
use crate::utils::errors::{ErrorSeverity, Result};

/// Update boundary for button presses; never returns an error
pub async fn process_callback(services: &ServiceFactory, callback: CallbackUpdate) {
    let user_id = callback.sender.id;

    if let Err(e) = handle_callback_query(services, callback).await {
        match e.severity() {
            ErrorSeverity::Info | ErrorSeverity::Warning => {
                warn!(user_id = user_id, error = %e, "Callback not handled")
            }
            _ => error!(user_id = user_id, error = %e, "Error handling callback query"),
        }

        if let Err(reply_error) = services.messenger.send_text(user_id, &e.user_message(), None).await {
            warn!(user_id = user_id, error = %reply_error, "Failed to send error reply");
        }
    }
}

/// Handle one button press
pub async fn handle_callback_query(services: &ServiceFactory, callback: CallbackUpdate) -> Result<()> {
    let Some(action) = AdminAction::parse(&callback.data) else {
        warn!(user_id = callback.sender.id, data = %callback.data, "Unknown callback data");
        return Ok(());
    };

    handle_admin_action(services, callback.sender.id, action, callback.message).await
}

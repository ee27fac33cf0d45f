//! Broadcast dispatcher
//!
//! Relays one operator message to every registered user. Delivery is
//! sequential, paced by a constant delay, and tolerant of per-recipient
//! failures: a blocked bot or a timed-out request is counted and the loop
//! moves on.

use std::sync::Arc;
use std::time::Duration;
use tracing::info;
use crate::database::UserRegistry;
use crate::models::{BroadcastOutcome, InlineButton, InlineKeyboard, Keyboard};
use crate::state::BroadcastSession;
use crate::utils::errors::Result;
use crate::utils::logging::{log_admin_action, log_relay_failure};
use super::messenger::Messenger;

pub const BROADCAST_PROMPT: &str =
    "📢 Send the message you want to broadcast. It will be copied to every user.";

/// The message captured as broadcast payload
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BroadcastPayload {
    pub chat_id: i64,
    pub message_id: i32,
}

#[derive(Clone)]
pub struct BroadcastDispatcher {
    operator_id: i64,
    session: Arc<BroadcastSession>,
    registry: UserRegistry,
    messenger: Arc<dyn Messenger>,
    relay_delay: Duration,
    relay_timeout: Duration,
}

impl BroadcastDispatcher {
    pub fn new(
        operator_id: i64,
        registry: UserRegistry,
        messenger: Arc<dyn Messenger>,
        relay_delay: Duration,
        relay_timeout: Duration,
    ) -> Self {
        Self {
            operator_id,
            session: Arc::new(BroadcastSession::new()),
            registry,
            messenger,
            relay_delay,
            relay_timeout,
        }
    }

    pub fn is_operator(&self, user_id: i64) -> bool {
        user_id == self.operator_id
    }

    pub fn is_armed(&self) -> bool {
        self.session.is_armed()
    }

    /// Arm the session and ask the operator for the payload.
    /// Returns `true` if it was already armed.
    pub async fn arm(&self) -> Result<bool> {
        let already_armed = self.session.arm();

        let keyboard = InlineKeyboard::new(vec![vec![InlineButton::callback(
            "❌ Cancel",
            "admin:cancel",
        )]]);
        self.messenger
            .send_text(self.operator_id, BROADCAST_PROMPT, Some(Keyboard::Inline(keyboard)))
            .await?;

        log_admin_action(self.operator_id, "broadcast_arm", None, None);
        Ok(already_armed)
    }

    /// Disarm without broadcasting; returns `true` if a session was armed
    pub fn cancel(&self) -> bool {
        let was_armed = self.session.disarm();
        if was_armed {
            log_admin_action(self.operator_id, "broadcast_cancel", None, None);
        }
        was_armed
    }

    /// Broadcast `payload` if it comes from the operator while armed.
    ///
    /// The session is disarmed before the first relay, so a concurrent or
    /// repeated trigger returns `None`.
    pub async fn consume(&self, sender_id: i64, payload: BroadcastPayload) -> Option<BroadcastOutcome> {
        if !self.is_operator(sender_id) || !self.session.take_armed() {
            return None;
        }

        let recipients = self.registry.list().await;
        info!(recipients = recipients.len(), "Starting broadcast");

        let mut outcome = BroadcastOutcome::default();
        for (position, recipient) in recipients.into_iter().enumerate() {
            if position > 0 && !self.relay_delay.is_zero() {
                tokio::time::sleep(self.relay_delay).await;
            }

            match self.relay(recipient, payload).await {
                Ok(()) => outcome.record_success(),
                Err(reason) => {
                    log_relay_failure(recipient, &reason);
                    outcome.record_failure();
                }
            }
        }

        info!(sent = outcome.sent, failed = outcome.failed, total = outcome.total, "Broadcast completed");
        Some(outcome)
    }

    async fn relay(&self, recipient: i64, payload: BroadcastPayload) -> std::result::Result<(), String> {
        let attempt = self
            .messenger
            .copy_message(recipient, payload.chat_id, payload.message_id);

        match tokio::time::timeout(self.relay_timeout, attempt).await {
            Ok(Ok(())) => Ok(()),
            Ok(Err(e)) => Err(e.to_string()),
            Err(_) => Err(format!("timed out after {:?}", self.relay_timeout)),
        }
    }
}

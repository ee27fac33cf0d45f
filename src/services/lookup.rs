//! Numeric identifier lookup

use std::sync::Arc;
use std::time::Duration;
use tracing::debug;
use crate::config::LookupMissPolicy;
use crate::models::ChatProfile;
use crate::utils::errors::{IdBotError, Result};
use super::messenger::Messenger;

#[derive(Clone)]
pub struct LookupService {
    messenger: Arc<dyn Messenger>,
    timeout: Duration,
    on_miss: LookupMissPolicy,
}

impl LookupService {
    pub fn new(messenger: Arc<dyn Messenger>, timeout: Duration, on_miss: LookupMissPolicy) -> Self {
        Self { messenger, timeout, on_miss }
    }

    pub fn miss_policy(&self) -> LookupMissPolicy {
        self.on_miss
    }

    /// Resolve `id`. Any failure, including a timeout, is `LookupNotFound`.
    pub async fn resolve(&self, id: i64) -> Result<ChatProfile> {
        match tokio::time::timeout(self.timeout, self.messenger.lookup_chat(id)).await {
            Ok(Ok(profile)) => Ok(profile),
            Ok(Err(e)) => {
                debug!(id = id, error = %e, "Lookup failed");
                Err(IdBotError::LookupNotFound { id })
            }
            Err(_) => {
                debug!(id = id, "Lookup timed out");
                Err(IdBotError::LookupNotFound { id })
            }
        }
    }
}

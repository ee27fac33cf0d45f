//! User registry
//!
//! Durable set of every account that has interacted with the bot. The whole
//! state sits behind one async mutex, so writes are serialized and the
//! in-memory set only changes once the file has been flushed.

use std::collections::HashSet;
use std::path::PathBuf;
use std::sync::Arc;
use chrono::{DateTime, Utc};
use tokio::sync::Mutex;
use tracing::{debug, error, info};
use crate::models::{AddResult, RegistryDocument, UserRecord};
use crate::utils::errors::Result;
use super::file_store::JsonFileStore;

struct RegistryState {
    store: JsonFileStore,
    document: RegistryDocument,
    index: HashSet<i64>,
}

/// Shared handle to the registry; clones refer to the same state
#[derive(Clone)]
pub struct UserRegistry {
    inner: Arc<Mutex<RegistryState>>,
}

impl UserRegistry {
    /// Open the registry at `path`, creating an empty one if the file is missing.
    /// A corrupt file is an error and is left untouched.
    pub async fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let store = JsonFileStore::new(path);

        let document = match store.load().await? {
            Some(document) => document,
            None => {
                let document = RegistryDocument::new(Utc::now());
                store.save(&document).await?;
                info!(path = %store.path().display(), "Created empty registry");
                document
            }
        };

        let index = document.users.iter().map(|user| user.id).collect();
        info!(users = document.users.len(), "Registry opened");

        Ok(Self {
            inner: Arc::new(Mutex::new(RegistryState { store, document, index })),
        })
    }

    pub async fn has(&self, id: i64) -> bool {
        self.inner.lock().await.index.contains(&id)
    }

    /// Add `id` if it is new; the file is flushed before `Added` is returned
    pub async fn add(&self, id: i64) -> Result<AddResult> {
        let mut state = self.inner.lock().await;

        if state.index.contains(&id) {
            return Ok(AddResult::AlreadyPresent);
        }

        state.document.users.push(UserRecord::from(id));
        if let Err(e) = state.store.save(&state.document).await {
            state.document.users.pop();
            error!(user_id = id, error = %e, "Failed to persist new user");
            return Err(e.into());
        }
        state.index.insert(id);

        debug!(user_id = id, total = state.index.len(), "User added to registry");
        Ok(AddResult::Added)
    }

    /// Snapshot of all ids in insertion order
    pub async fn list(&self) -> Vec<i64> {
        self.inner.lock().await.document.ids()
    }

    /// Replace the whole set with `{seed}` and restart the registry clock
    pub async fn reset(&self, seed: i64) -> Result<()> {
        let mut state = self.inner.lock().await;

        let mut document = RegistryDocument::new(Utc::now());
        document.users.push(UserRecord::from(seed));
        state.store.save(&document).await?;

        let previous = state.index.len();
        state.document = document;
        state.index = HashSet::from([seed]);

        info!(seed = seed, removed = previous, "Registry reset");
        Ok(())
    }

    /// Raw persisted document, byte for byte
    pub async fn export(&self) -> Result<Vec<u8>> {
        let state = self.inner.lock().await;
        Ok(state.store.read_raw().await?)
    }

    pub async fn len(&self) -> usize {
        self.inner.lock().await.index.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    pub async fn start_time(&self) -> DateTime<Utc> {
        self.inner.lock().await.document.start_time
    }
}

//! User registry models

use std::collections::HashSet;
use serde::{Deserialize, Serialize};
use chrono::{DateTime, Utc};

/// A platform account that has interacted with the bot at least once
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserRecord {
    pub id: i64,
}

/// Persisted form of the registry, rewritten in full on every mutation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegistryDocument {
    pub users: Vec<UserRecord>,
    #[serde(rename = "startTime")]
    pub start_time: DateTime<Utc>,
}

/// Result of adding an id to the registry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddResult {
    AlreadyPresent,
    Added,
}

impl From<i64> for UserRecord {
    fn from(id: i64) -> Self {
        Self { id }
    }
}

impl RegistryDocument {
    pub fn new(start_time: DateTime<Utc>) -> Self {
        Self {
            users: Vec::new(),
            start_time,
        }
    }

    /// Parse a persisted document, dropping repeated ids while keeping the
    /// first occurrence of each.
    pub fn from_slice(bytes: &[u8]) -> serde_json::Result<Self> {
        let mut document: RegistryDocument = serde_json::from_slice(bytes)?;
        let mut seen = HashSet::with_capacity(document.users.len());
        document.users.retain(|user| seen.insert(user.id));
        Ok(document)
    }

    pub fn to_vec(&self) -> serde_json::Result<Vec<u8>> {
        serde_json::to_vec_pretty(self)
    }

    pub fn ids(&self) -> Vec<i64> {
        self.users.iter().map(|user| user.id).collect()
    }
}

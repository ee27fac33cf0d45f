//! Whole-file JSON store
//!
//! Writes go to a sibling temporary file which is synced and then renamed over
//! the target, so a crash mid-write leaves the previous document intact.

use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tracing::{debug, info};
use crate::models::RegistryDocument;
use crate::utils::errors::{PersistenceError, PersistenceResult};

#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the document, or `None` when the file does not exist yet
    pub async fn load(&self) -> PersistenceResult<Option<RegistryDocument>> {
        let bytes = match fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                info!(path = %self.path.display(), "Registry file not found");
                return Ok(None);
            }
            Err(source) => {
                return Err(PersistenceError::Read {
                    path: self.path.clone(),
                    source,
                })
            }
        };

        let document = RegistryDocument::from_slice(&bytes).map_err(|source| PersistenceError::Corrupt {
            path: self.path.clone(),
            source,
        })?;

        debug!(path = %self.path.display(), users = document.users.len(), "Registry loaded");
        Ok(Some(document))
    }

    /// Replace the file contents with `document`
    pub async fn save(&self, document: &RegistryDocument) -> PersistenceResult<()> {
        let bytes = document.to_vec().map_err(PersistenceError::Serialize)?;
        let tmp_path = self.tmp_path();

        self.write_synced(&tmp_path, &bytes).await.map_err(|source| PersistenceError::Write {
            path: tmp_path.clone(),
            source,
        })?;

        fs::rename(&tmp_path, &self.path).await.map_err(|source| PersistenceError::Write {
            path: self.path.clone(),
            source,
        })?;

        debug!(path = %self.path.display(), users = document.users.len(), bytes = bytes.len(), "Registry flushed");
        Ok(())
    }

    /// Raw persisted bytes
    pub async fn read_raw(&self) -> PersistenceResult<Vec<u8>> {
        fs::read(&self.path).await.map_err(|source| PersistenceError::Read {
            path: self.path.clone(),
            source,
        })
    }

    async fn write_synced(&self, path: &Path, bytes: &[u8]) -> std::io::Result<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).await?;
        }

        let mut file = fs::File::create(path).await?;
        file.write_all(bytes).await?;
        file.sync_all().await?;
        Ok(())
    }

    fn tmp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|name| name.to_os_string())
            .unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use crate::models::UserRecord;

    #[tokio::test]
    async fn test_missing_file_loads_as_none() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::new(dir.path().join("users.json"));
        assert!(store.load().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::new(dir.path().join("nested").join("users.json"));

        let mut document = RegistryDocument::new(Utc::now());
        document.users.push(UserRecord::from(42));
        store.save(&document).await.unwrap();

        let loaded = store.load().await.unwrap().unwrap();
        assert_eq!(loaded.ids(), vec![42]);
        assert!(!dir.path().join("nested").join("users.json.tmp").exists());
    }

    #[tokio::test]
    async fn test_corrupt_file_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("users.json");
        std::fs::write(&path, b"{ not json").unwrap();

        let store = JsonFileStore::new(&path);
        let err = store.load().await.unwrap_err();
        assert!(matches!(err, PersistenceError::Corrupt { .. }));
    }
}

//! File-backed wishlist slots.

use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use sha2::{Digest, Sha256};
use tokio::fs;
use tracing::{debug, warn};

use crate::domain::entities::StorageKey;
use crate::domain::errors::PersistenceError;
use crate::domain::ports::WishlistStoragePort;

const SLOT_DIR_NAME: &str = "wishlists";

/// Stores each slot as `<root>/wishlists/<sha256(key)>.json`.
///
/// Writes go through a temp file in the same directory and are renamed into
/// place, so a slot is either the old or the new payload.
#[derive(Debug, Clone)]
pub struct FileWishlistStorage {
    dir: PathBuf,
}

impl FileWishlistStorage {
    #[must_use]
    pub fn new(data_dir: impl AsRef<Path>) -> Self {
        Self {
            dir: data_dir.as_ref().join(SLOT_DIR_NAME),
        }
    }

    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of the slot file for `key`.
    #[must_use]
    pub fn slot_path(&self, key: &StorageKey) -> PathBuf {
        let digest = hex::encode(Sha256::digest(key.as_str().as_bytes()));
        self.dir.join(format!("{digest}.json"))
    }
}

fn write_atomic(dir: &Path, path: &Path, payload: &str) -> std::io::Result<()> {
    std::fs::create_dir_all(dir)?;
    let mut temp_file = tempfile::NamedTempFile::new_in(dir)?;
    temp_file.write_all(payload.as_bytes())?;
    temp_file.persist(path).map_err(|e| e.error)?;
    Ok(())
}

#[async_trait]
impl WishlistStoragePort for FileWishlistStorage {
    async fn read(&self, key: &StorageKey) -> Result<Option<String>, PersistenceError> {
        let path = self.slot_path(key);

        match fs::read_to_string(&path).await {
            Ok(content) => {
                debug!(key = %key, path = %path.display(), "Read wishlist slot");
                Ok(Some(content))
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => {
                warn!(key = %key, error = %e, "Failed to read wishlist slot");
                Err(PersistenceError::read_failed(key.as_str(), e.to_string()))
            }
        }
    }

    async fn write(&self, key: &StorageKey, payload: &str) -> Result<(), PersistenceError> {
        let dir = self.dir.clone();
        let path = self.slot_path(key);
        let payload = payload.to_string();

        tokio::task::spawn_blocking(move || write_atomic(&dir, &path, &payload))
            .await
            .map_err(|e| PersistenceError::write_failed(key.as_str(), e.to_string()))?
            .map_err(|e| PersistenceError::write_failed(key.as_str(), e.to_string()))?;

        debug!(key = %key, "Wrote wishlist slot");
        Ok(())
    }

    async fn remove(&self, key: &StorageKey) -> Result<(), PersistenceError> {
        match fs::remove_file(self.slot_path(key)).await {
            Ok(()) => {
                debug!(key = %key, "Removed wishlist slot");
                Ok(())
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(PersistenceError::remove_failed(key.as_str(), e.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::Identity;
    use tempfile::tempdir;

    fn key(email: &str) -> StorageKey {
        Identity::from_email(email).storage_key()
    }

    #[tokio::test]
    async fn test_missing_slot_reads_none() {
        let dir = tempdir().unwrap();
        let storage = FileWishlistStorage::new(dir.path());

        assert_eq!(storage.read(&key("a@example.com")).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_write_then_read() {
        let dir = tempdir().unwrap();
        let storage = FileWishlistStorage::new(dir.path());
        let key = key("a@example.com");

        storage.write(&key, r#"[{"id":"p1","name":"Jacket"}]"#).await.unwrap();
        storage.write(&key, "[]").await.unwrap();

        assert_eq!(storage.read(&key).await.unwrap().as_deref(), Some("[]"));
        assert!(storage.slot_path(&key).starts_with(dir.path().join("wishlists")));
    }

    #[tokio::test]
    async fn test_slots_are_isolated_per_key() {
        let dir = tempdir().unwrap();
        let storage = FileWishlistStorage::new(dir.path());

        storage.write(&key("a@example.com"), "a").await.unwrap();
        storage.write(&key("b@example.com"), "b").await.unwrap();

        assert_ne!(
            storage.slot_path(&key("a@example.com")),
            storage.slot_path(&key("b@example.com"))
        );
        assert_eq!(
            storage.read(&key("a@example.com")).await.unwrap().as_deref(),
            Some("a")
        );
    }

    #[tokio::test]
    async fn test_remove_is_idempotent() {
        let dir = tempdir().unwrap();
        let storage = FileWishlistStorage::new(dir.path());
        let key = key("a@example.com");

        storage.write(&key, "[]").await.unwrap();
        storage.remove(&key).await.unwrap();
        storage.remove(&key).await.unwrap();

        assert_eq!(storage.read(&key).await.unwrap(), None);
    }
}

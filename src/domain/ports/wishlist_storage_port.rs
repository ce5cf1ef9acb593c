//! Wishlist slot storage port definition.

use async_trait::async_trait;

use crate::domain::entities::StorageKey;
use crate::domain::errors::PersistenceError;

/// String-valued slots, one per storage key.
#[async_trait]
pub trait WishlistStoragePort: Send + Sync {
    /// Reads a slot; `None` when it was never written or has been removed.
    async fn read(&self, key: &StorageKey) -> Result<Option<String>, PersistenceError>;

    /// Overwrites a slot.
    async fn write(&self, key: &StorageKey, payload: &str) -> Result<(), PersistenceError>;

    /// Removes a slot. Removing an absent slot succeeds.
    async fn remove(&self, key: &StorageKey) -> Result<(), PersistenceError>;
}

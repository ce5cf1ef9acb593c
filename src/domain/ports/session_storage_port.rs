//! Session credential storage port definition.

use async_trait::async_trait;

use crate::domain::entities::SessionToken;
use crate::domain::errors::HandoffError;

/// Port for persisting the storefront session credential.
#[async_trait]
pub trait SessionStoragePort: Send + Sync {
    /// Retrieves stored session.
    async fn get_session(&self) -> Result<Option<SessionToken>, HandoffError>;

    /// Stores session securely.
    async fn store_session(&self, token: &SessionToken) -> Result<(), HandoffError>;

    /// Deletes stored session.
    async fn delete_session(&self) -> Result<(), HandoffError>;
}

#[cfg(test)]
pub mod mock {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicBool, Ordering};
    use tokio::sync::RwLock;

    /// In-memory session storage for testing.
    pub struct MockSessionStorage {
        token: Arc<RwLock<Option<SessionToken>>>,
        fail_reads: AtomicBool,
    }

    impl MockSessionStorage {
        pub fn new() -> Self {
            Self {
                token: Arc::new(RwLock::new(None)),
                fail_reads: AtomicBool::new(false),
            }
        }

        pub fn with_session(token: SessionToken) -> Self {
            let storage = Self::new();
            *storage.token.try_write().expect("fresh lock") = Some(token);
            storage
        }

        pub fn set_fail_reads(&self, fail: bool) {
            self.fail_reads.store(fail, Ordering::SeqCst);
        }
    }

    impl Default for MockSessionStorage {
        fn default() -> Self {
            Self::new()
        }
    }

    #[async_trait]
    impl SessionStoragePort for MockSessionStorage {
        async fn get_session(&self) -> Result<Option<SessionToken>, HandoffError> {
            if self.fail_reads.load(Ordering::SeqCst) {
                return Err(HandoffError::storage("keyring locked"));
            }
            Ok(self.token.read().await.clone())
        }

        async fn store_session(&self, token: &SessionToken) -> Result<(), HandoffError> {
            *self.token.write().await = Some(token.clone());
            Ok(())
        }

        async fn delete_session(&self) -> Result<(), HandoffError> {
            *self.token.write().await = None;
            Ok(())
        }
    }
}

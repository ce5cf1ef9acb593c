//! Session storage for builds without the `keyring` feature.

use async_trait::async_trait;
use tracing::warn;

use crate::domain::entities::SessionToken;
use crate::domain::errors::HandoffError;
use crate::domain::ports::SessionStoragePort;

/// Has nowhere to save a session: reads find nothing, saves fail.
#[derive(Default)]
pub struct KeyringSessionStorage;

impl KeyringSessionStorage {
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

#[async_trait]
impl SessionStoragePort for KeyringSessionStorage {
    async fn get_session(&self) -> Result<Option<SessionToken>, HandoffError> {
        Ok(None)
    }

    async fn store_session(&self, _token: &SessionToken) -> Result<(), HandoffError> {
        warn!("Built without keyring support, session not saved");
        Err(HandoffError::storage("built without keyring support"))
    }

    async fn delete_session(&self) -> Result<(), HandoffError> {
        Ok(())
    }
}

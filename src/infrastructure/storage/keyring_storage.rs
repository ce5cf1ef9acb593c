//! Session storage in the operating system keyring.

use async_trait::async_trait;
use keyring::Entry;
use tracing::{debug, warn};

use crate::domain::entities::SessionToken;
use crate::domain::errors::HandoffError;
use crate::domain::ports::SessionStoragePort;

const KEYRING_SERVICE: &str = "retag";
const KEYRING_USER: &str = "session";

/// Saves the storefront session under one keyring entry.
///
/// Keyring calls block on the platform secret service, so each one runs on
/// the blocking pool.
pub struct KeyringSessionStorage {
    service: String,
    user: String,
}

impl KeyringSessionStorage {
    #[must_use]
    pub fn new() -> Self {
        Self::with_names(KEYRING_SERVICE, KEYRING_USER)
    }

    #[must_use]
    pub fn with_names(service: impl Into<String>, user: impl Into<String>) -> Self {
        Self {
            service: service.into(),
            user: user.into(),
        }
    }

    async fn with_entry<T, F>(&self, op: F) -> Result<T, HandoffError>
    where
        T: Send + 'static,
        F: FnOnce(Entry) -> Result<T, HandoffError> + Send + 'static,
    {
        let service = self.service.clone();
        let user = self.user.clone();

        tokio::task::spawn_blocking(move || {
            let entry = Entry::new(&service, &user)
                .map_err(|e| HandoffError::storage(format!("failed to open keyring entry: {e}")))?;
            op(entry)
        })
        .await
        .map_err(|e| HandoffError::unexpected(format!("keyring task failed: {e}")))?
    }
}

impl Default for KeyringSessionStorage {
    fn default() -> Self {
        Self::new()
    }
}

fn storage_error(action: &str, e: &keyring::Error) -> HandoffError {
    warn!(error = %e, action, "Keyring operation failed");
    HandoffError::storage(format!("failed to {action} session: {e}"))
}

#[async_trait]
impl SessionStoragePort for KeyringSessionStorage {
    async fn get_session(&self) -> Result<Option<SessionToken>, HandoffError> {
        debug!(service = %self.service, "Reading saved session");
        self.with_entry(|entry| match entry.get_password() {
            Ok(secret) => Ok(SessionToken::new(secret)),
            Err(keyring::Error::NoEntry) => Ok(None),
            Err(e) => Err(storage_error("read", &e)),
        })
        .await
    }

    async fn store_session(&self, token: &SessionToken) -> Result<(), HandoffError> {
        debug!(service = %self.service, session = %token, "Saving session");
        let token = token.clone();
        self.with_entry(move |entry| {
            entry
                .set_password(token.as_str())
                .map_err(|e| storage_error("save", &e))
        })
        .await
    }

    async fn delete_session(&self) -> Result<(), HandoffError> {
        debug!(service = %self.service, "Removing saved session");
        self.with_entry(|entry| match entry.delete_credential() {
            Ok(()) | Err(keyring::Error::NoEntry) => Ok(()),
            Err(e) => Err(storage_error("remove", &e)),
        })
        .await
    }
}

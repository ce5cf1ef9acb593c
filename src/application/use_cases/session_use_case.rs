//! Storefront session sign-in, sign-out and lookup.

use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::application::dto::{ActiveSession, SessionSource};
use crate::domain::entities::SessionToken;
use crate::domain::errors::HandoffError;
use crate::domain::ports::SessionStoragePort;

/// Keeps the shopper's session credential between runs.
///
/// Signing in saves the credential; signing out removes it. Commands that
/// need a session take an explicit one first and the saved one otherwise.
pub struct SessionUseCase {
    storage: Arc<dyn SessionStoragePort>,
}

impl SessionUseCase {
    #[must_use]
    pub const fn new(storage: Arc<dyn SessionStoragePort>) -> Self {
        Self { storage }
    }

    /// Validates and saves `raw` as the current session.
    ///
    /// # Errors
    /// Returns [`HandoffError::InvalidSession`] for a malformed credential,
    /// or a storage error if it cannot be saved.
    pub async fn login(&self, raw: &str) -> Result<SessionToken, HandoffError> {
        let token = SessionToken::new(raw).ok_or(HandoffError::InvalidSession)?;
        self.storage.store_session(&token).await?;
        info!(session = %token, "Session saved");
        Ok(token)
    }

    /// Removes the saved session. Returns whether one was saved.
    ///
    /// # Errors
    /// Returns error if the saved session cannot be removed.
    pub async fn logout(&self) -> Result<bool, HandoffError> {
        let had_session = self.saved().await.ok().flatten().is_some();
        self.storage.delete_session().await?;
        info!(had_session, "Session removed");
        Ok(had_session)
    }

    /// The saved session, if any.
    ///
    /// # Errors
    /// Returns error if session storage cannot be read.
    pub async fn saved(&self) -> Result<Option<SessionToken>, HandoffError> {
        self.storage.get_session().await
    }

    /// Picks the session for one command.
    ///
    /// A non-blank `explicit` credential wins and is not saved. Without one
    /// the saved session is used; unreadable storage counts as signed out.
    ///
    /// # Errors
    /// Returns [`HandoffError::InvalidSession`] if `explicit` is malformed.
    pub async fn active(
        &self,
        explicit: Option<&str>,
    ) -> Result<Option<ActiveSession>, HandoffError> {
        if let Some(raw) = explicit.filter(|raw| !raw.trim().is_empty()) {
            let token = SessionToken::new(raw).ok_or(HandoffError::InvalidSession)?;
            return Ok(Some(ActiveSession {
                token,
                source: SessionSource::Explicit,
            }));
        }

        match self.saved().await {
            Ok(token) => {
                debug!(found = token.is_some(), "Looked up saved session");
                Ok(token.map(|token| ActiveSession {
                    token,
                    source: SessionSource::Saved,
                }))
            }
            Err(e) => {
                warn!(error = %e, "Saved session unavailable, continuing signed out");
                Ok(None)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::mocks::MockSessionStorage;

    const SESSION: &str = "eyJhbGciOiJIUzI1NiJ9.eyJzdWIiOiIxMjMifQ.c2ln";

    fn saved(value: &str) -> Arc<MockSessionStorage> {
        Arc::new(MockSessionStorage::with_session(
            SessionToken::new(value).unwrap(),
        ))
    }

    #[tokio::test]
    async fn test_login_saves_trimmed_token() {
        let storage = Arc::new(MockSessionStorage::new());
        let sessions = SessionUseCase::new(storage.clone());

        let token = sessions.login(&format!("  {SESSION}\n")).await.unwrap();

        assert_eq!(token.as_str(), SESSION);
        assert_eq!(storage.get_session().await.unwrap().unwrap().as_str(), SESSION);
    }

    #[tokio::test]
    async fn test_login_rejects_malformed_token() {
        let storage = Arc::new(MockSessionStorage::new());
        let sessions = SessionUseCase::new(storage.clone());

        let result = sessions.login("two words").await;

        assert!(matches!(result, Err(HandoffError::InvalidSession)));
        assert!(storage.get_session().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_logout_reports_whether_session_existed() {
        let sessions = SessionUseCase::new(saved(SESSION));

        assert!(sessions.logout().await.unwrap());
        assert!(sessions.saved().await.unwrap().is_none());
        assert!(!sessions.logout().await.unwrap());
    }

    #[tokio::test]
    async fn test_explicit_session_wins_without_saving() {
        let storage = saved("stored-session-value");
        let sessions = SessionUseCase::new(storage.clone());

        let active = sessions.active(Some(SESSION)).await.unwrap().unwrap();

        assert_eq!(active.source, SessionSource::Explicit);
        assert_eq!(active.token.as_str(), SESSION);
        assert_eq!(
            storage.get_session().await.unwrap().unwrap().as_str(),
            "stored-session-value"
        );
    }

    #[tokio::test]
    async fn test_blank_explicit_falls_back_to_saved() {
        let sessions = SessionUseCase::new(saved(SESSION));

        let active = sessions.active(Some("   ")).await.unwrap().unwrap();

        assert_eq!(active.source, SessionSource::Saved);
    }

    #[tokio::test]
    async fn test_malformed_explicit_is_an_error() {
        let sessions = SessionUseCase::new(saved(SESSION));

        let result = sessions.active(Some("not a token")).await;

        assert!(matches!(result, Err(HandoffError::InvalidSession)));
    }

    #[tokio::test]
    async fn test_unreadable_storage_counts_as_signed_out() {
        let storage = Arc::new(MockSessionStorage::new());
        storage.set_fail_reads(true);
        let sessions = SessionUseCase::new(storage);

        assert!(sessions.active(None).await.unwrap().is_none());
        assert!(sessions.saved().await.is_err());
    }
}

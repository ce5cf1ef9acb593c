//! Handoff token port definition.

use async_trait::async_trait;

use crate::domain::entities::{HandoffToken, SessionToken};
use crate::domain::errors::HandoffError;

/// Port for the external auth service that issues handoff tokens.
#[async_trait]
pub trait HandoffPort: Send + Sync {
    /// Exchanges a session credential for a short-lived handoff token.
    async fn issue_token(&self, session: &SessionToken) -> Result<HandoffToken, HandoffError>;
}

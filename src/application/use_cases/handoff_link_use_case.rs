//! Mobile handoff link use case.

use std::sync::Arc;

use reqwest::Url;
use tracing::{debug, info, warn};

use crate::application::dto::HandoffLink;
use crate::domain::entities::SessionToken;
use crate::domain::errors::HandoffError;
use crate::domain::ports::HandoffPort;

const TOKEN_QUERY_PARAM: &str = "token";

/// Builds the link shown as a QR code for opening the storefront on a phone.
#[derive(Clone)]
pub struct HandoffLinkUseCase {
    handoff_port: Arc<dyn HandoffPort>,
}

impl HandoffLinkUseCase {
    /// Creates new handoff link use case.
    #[must_use]
    pub const fn new(handoff_port: Arc<dyn HandoffPort>) -> Self {
        Self { handoff_port }
    }

    /// Produces the handoff link for `base_url`.
    ///
    /// Without a session the plain storefront link is returned. With a
    /// session a short-lived token is requested and appended as the `token`
    /// query parameter; when that request fails the plain link is returned.
    /// The session credential itself is never embedded in the link, not even
    /// as a fallback. Older storefront clients appended the session when the
    /// token request failed; this client does not.
    ///
    /// # Errors
    /// Returns error if `base_url` is not an absolute URL.
    pub async fn execute(
        &self,
        base_url: &str,
        session: Option<&SessionToken>,
    ) -> Result<HandoffLink, HandoffError> {
        let base = Url::parse(base_url).map_err(|e| HandoffError::invalid_url(e.to_string()))?;

        let Some(session) = session else {
            debug!("No session, using plain storefront link");
            return Ok(HandoffLink::plain(base_url.to_string()));
        };

        match self.handoff_port.issue_token(session).await {
            Ok(token) => {
                let mut url = base;
                url.query_pairs_mut()
                    .append_pair(TOKEN_QUERY_PARAM, token.as_str());
                info!(token = %token, "Generated auto-login handoff link");
                Ok(HandoffLink::auto_login(url.into()))
            }
            Err(e) => {
                warn!(error = %e, "Failed to generate handoff token, using plain link");
                Ok(HandoffLink::plain(base_url.to_string()))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::dto::LinkKind;
    use crate::domain::ports::mocks::MockHandoffPort;

    fn session() -> SessionToken {
        SessionToken::new("eyJhbGciOiJIUzI1NiJ9.eyJzdWIiOiIxMjMifQ.c2ln").unwrap()
    }

    #[tokio::test]
    async fn test_no_session_returns_plain_link() {
        let port = Arc::new(MockHandoffPort::new(true));
        let use_case = HandoffLinkUseCase::new(port.clone());

        let link = use_case
            .execute("https://retag.example.com", None)
            .await
            .unwrap();

        assert_eq!(link.url, "https://retag.example.com");
        assert_eq!(link.kind, LinkKind::Plain);
        assert_eq!(port.calls(), 0);
    }

    #[tokio::test]
    async fn test_token_is_url_encoded() {
        let port = Arc::new(MockHandoffPort::new(true));
        let use_case = HandoffLinkUseCase::new(port.clone());

        let link = use_case
            .execute("https://retag.example.com/", Some(&session()))
            .await
            .unwrap();

        assert_eq!(link.kind, LinkKind::AutoLogin);
        assert_eq!(
            link.url,
            "https://retag.example.com/?token=qr%2Btoken%2Fwith%3Dchars"
        );

        let parsed = Url::parse(&link.url).unwrap();
        let token = parsed
            .query_pairs()
            .find(|(k, _)| k == "token")
            .map(|(_, v)| v.into_owned());
        assert_eq!(token.as_deref(), Some(port.token()));
    }

    #[tokio::test]
    async fn test_rejection_falls_back_without_leaking_session() {
        let port = Arc::new(MockHandoffPort::new(false));
        let use_case = HandoffLinkUseCase::new(port.clone());
        let session = session();

        let link = use_case
            .execute("https://retag.example.com", Some(&session))
            .await
            .unwrap();

        assert_eq!(link.kind, LinkKind::Plain);
        assert!(!link.url.contains(session.as_str()));
        assert_eq!(port.calls(), 1);
    }

    #[tokio::test]
    async fn test_invalid_base_url() {
        let use_case = HandoffLinkUseCase::new(Arc::new(MockHandoffPort::new(true)));

        let result = use_case.execute("not a url", None).await;

        assert!(matches!(result, Err(HandoffError::InvalidUrl { .. })));
    }
}

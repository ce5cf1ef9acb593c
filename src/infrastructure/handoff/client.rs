//! Storefront auth API HTTP client.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode, header};
use tracing::{debug, warn};

use super::dto::{ErrorResponse, QrTokenResponse};
use crate::domain::entities::{HandoffToken, SessionToken};
use crate::domain::errors::HandoffError;
use crate::domain::ports::HandoffPort;

/// Storefront API used when none is configured.
pub const DEFAULT_STOREFRONT_API: &str = "https://retag-1n7d.onrender.com";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);
const USER_AGENT: &str = concat!("retag/", env!("CARGO_PKG_VERSION"));

/// Issues handoff tokens through the storefront auth API.
pub struct HandoffClient {
    client: Client,
    base_url: String,
}

impl HandoffClient {
    /// Creates client with default base URL.
    ///
    /// # Errors
    /// Returns error if HTTP client creation fails.
    pub fn new() -> Result<Self, HandoffError> {
        Self::with_base_url(DEFAULT_STOREFRONT_API)
    }

    /// Creates client with custom base URL.
    ///
    /// # Errors
    /// Returns error if HTTP client creation fails.
    pub fn with_base_url(base_url: impl Into<String>) -> Result<Self, HandoffError> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| HandoffError::unexpected(format!("failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    fn token_endpoint(&self) -> String {
        format!("{}/auth/generate-qr-token", self.base_url)
    }
}

fn map_error_response(status: StatusCode, body: &str) -> HandoffError {
    let message = serde_json::from_str::<ErrorResponse>(body)
        .map(|error| error.message)
        .unwrap_or_else(|_| format!("HTTP {status}"));

    match status {
        StatusCode::UNAUTHORIZED => HandoffError::rejected("invalid or expired session"),
        StatusCode::FORBIDDEN => HandoffError::rejected(format!("access denied: {message}")),
        StatusCode::SERVICE_UNAVAILABLE | StatusCode::GATEWAY_TIMEOUT => {
            HandoffError::network("storefront API is temporarily unavailable")
        }
        _ => HandoffError::unexpected(format!("unexpected response: {status} - {message}")),
    }
}

#[async_trait]
impl HandoffPort for HandoffClient {
    async fn issue_token(&self, session: &SessionToken) -> Result<HandoffToken, HandoffError> {
        debug!(session = %session, "Requesting handoff token");

        let response = self
            .client
            .post(self.token_endpoint())
            .header(header::AUTHORIZATION, format!("Bearer {}", session.as_str()))
            .send()
            .await
            .map_err(|e| {
                warn!(error = %e, "Failed to connect to storefront API");
                if e.is_timeout() {
                    HandoffError::network("request timed out")
                } else if e.is_connect() {
                    HandoffError::network("failed to connect to storefront API")
                } else {
                    HandoffError::network(e.to_string())
                }
            })?;

        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(map_error_response(status, &body));
        }

        let body: QrTokenResponse = response.json().await.map_err(|e| {
            warn!(error = %e, "Failed to parse handoff token response");
            HandoffError::unexpected(format!("failed to parse response: {e}"))
        })?;

        let token = HandoffToken::new(body.qr_token)
            .ok_or_else(|| HandoffError::unexpected("empty handoff token"))?;

        debug!(token = %token, "Handoff token issued");
        Ok(token)
    }
}

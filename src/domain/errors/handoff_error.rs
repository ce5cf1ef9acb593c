//! Mobile handoff error types.

use thiserror::Error;

/// Errors while issuing a handoff token or reading a stored session.
#[derive(Debug, Clone, Error)]
#[allow(missing_docs)]
pub enum HandoffError {
    #[error("invalid storefront url: {message}")]
    InvalidUrl { message: String },

    #[error("handoff token request rejected: {message}")]
    Rejected { message: String },

    #[error("network error during handoff: {message}")]
    Network { message: String },

    #[error("session credential is blank or contains whitespace")]
    InvalidSession,

    #[error("failed to access session storage: {message}")]
    Storage { message: String },

    #[error("unexpected handoff error: {message}")]
    Unexpected { message: String },
}

impl HandoffError {
    #[must_use]
    pub fn invalid_url(message: impl Into<String>) -> Self {
        Self::InvalidUrl {
            message: message.into(),
        }
    }

    #[must_use]
    pub fn rejected(message: impl Into<String>) -> Self {
        Self::Rejected {
            message: message.into(),
        }
    }

    #[must_use]
    pub fn network(message: impl Into<String>) -> Self {
        Self::Network {
            message: message.into(),
        }
    }

    #[must_use]
    pub fn storage(message: impl Into<String>) -> Self {
        Self::Storage {
            message: message.into(),
        }
    }

    #[must_use]
    pub fn unexpected(message: impl Into<String>) -> Self {
        Self::Unexpected {
            message: message.into(),
        }
    }
}

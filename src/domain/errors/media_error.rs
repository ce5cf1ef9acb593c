//! Media host error types.

use thiserror::Error;

/// Errors raised while talking to the media host.
#[derive(Debug, Clone, Error)]
#[allow(missing_docs)]
pub enum MediaError {
    #[error("media host credentials are not configured")]
    NotConfigured,

    #[error("media host rejected the request ({status}): {message}")]
    Rejected { status: u16, message: String },

    #[error("network error talking to media host: {message}")]
    Network { message: String },

    #[error("upload failed - no result returned")]
    NoResult,

    #[error("invalid media request: {reason}")]
    InvalidInput { reason: String },

    #[error("unexpected media host error: {message}")]
    Unexpected { message: String },
}

impl MediaError {
    /// Creates rejected error.
    #[must_use]
    pub fn rejected(status: u16, message: impl Into<String>) -> Self {
        Self::Rejected {
            status,
            message: message.into(),
        }
    }

    /// Creates network error.
    #[must_use]
    pub fn network(message: impl Into<String>) -> Self {
        Self::Network {
            message: message.into(),
        }
    }

    /// Creates invalid input error.
    #[must_use]
    pub fn invalid_input(reason: impl Into<String>) -> Self {
        Self::InvalidInput {
            reason: reason.into(),
        }
    }

    /// Creates unexpected error.
    #[must_use]
    pub fn unexpected(message: impl Into<String>) -> Self {
        Self::Unexpected {
            message: message.into(),
        }
    }

    /// Returns whether a caller-side retry could succeed.
    #[must_use]
    pub const fn is_recoverable(&self) -> bool {
        match self {
            Self::Network { .. } | Self::NoResult => true,
            Self::Rejected { status, .. } => *status == 429 || *status >= 500,
            Self::NotConfigured | Self::InvalidInput { .. } | Self::Unexpected { .. } => false,
        }
    }
}

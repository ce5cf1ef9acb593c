//! Wishlist persistence error types.

use thiserror::Error;

/// Failures of the wishlist slot storage. Never surfaced to shoppers.
#[derive(Debug, Clone, Error)]
#[allow(missing_docs)]
pub enum PersistenceError {
    #[error("failed to read wishlist slot {key}: {message}")]
    ReadFailed { key: String, message: String },

    #[error("failed to write wishlist slot {key}: {message}")]
    WriteFailed { key: String, message: String },

    #[error("failed to remove wishlist slot {key}: {message}")]
    RemoveFailed { key: String, message: String },

    #[error("wishlist slot {key} is corrupt: {message}")]
    Corrupt { key: String, message: String },
}

impl PersistenceError {
    #[must_use]
    pub fn read_failed(key: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ReadFailed {
            key: key.into(),
            message: message.into(),
        }
    }

    #[must_use]
    pub fn write_failed(key: impl Into<String>, message: impl Into<String>) -> Self {
        Self::WriteFailed {
            key: key.into(),
            message: message.into(),
        }
    }

    #[must_use]
    pub fn remove_failed(key: impl Into<String>, message: impl Into<String>) -> Self {
        Self::RemoveFailed {
            key: key.into(),
            message: message.into(),
        }
    }

    #[must_use]
    pub fn corrupt(key: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Corrupt {
            key: key.into(),
            message: message.into(),
        }
    }
}

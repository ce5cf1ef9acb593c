//! Session DTOs.

use crate::domain::entities::SessionToken;

/// Where the session credential came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionSource {
    /// Passed for this run only, by flag or environment variable.
    Explicit,
    /// Saved by an earlier `session login`.
    Saved,
}

impl std::fmt::Display for SessionSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::Explicit => "command line / environment",
            Self::Saved => "saved session",
        })
    }
}

/// Session credential together with its source.
#[derive(Debug, Clone)]
pub struct ActiveSession {
    pub token: SessionToken,
    pub source: SessionSource,
}

//! Shopper identity and the keys derived from it.

use std::fmt;

/// Identity key used when nobody is logged in.
pub const ANONYMOUS_KEY: &str = "guest";

const STORAGE_KEY_PREFIX: &str = "retag-wishlist-";

/// The logged-in shopper, or the anonymous shopper when both fields are empty.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Identity {
    id: Option<String>,
    email: Option<String>,
}

impl Identity {
    #[must_use]
    pub fn new(id: Option<String>, email: Option<String>) -> Self {
        Self {
            id: id.filter(|s| !s.trim().is_empty()),
            email: email.filter(|s| !s.trim().is_empty()),
        }
    }

    #[must_use]
    pub const fn anonymous() -> Self {
        Self {
            id: None,
            email: None,
        }
    }

    #[must_use]
    pub fn from_email(email: impl Into<String>) -> Self {
        Self::new(None, Some(email.into()))
    }

    #[must_use]
    pub fn from_id(id: impl Into<String>) -> Self {
        Self::new(Some(id.into()), None)
    }

    #[must_use]
    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    #[must_use]
    pub fn email(&self) -> Option<&str> {
        self.email.as_deref()
    }

    #[must_use]
    pub const fn is_anonymous(&self) -> bool {
        self.id.is_none() && self.email.is_none()
    }

    /// Stable per-shopper key: email, then id, then the anonymous key.
    #[must_use]
    pub fn key(&self) -> &str {
        self.email
            .as_deref()
            .or(self.id.as_deref())
            .unwrap_or(ANONYMOUS_KEY)
    }

    #[must_use]
    pub fn storage_key(&self) -> StorageKey {
        StorageKey(format!("{STORAGE_KEY_PREFIX}{}", self.key()))
    }
}

impl fmt::Display for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.key())
    }
}

/// Name of the persistence slot holding one identity's wishlist.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct StorageKey(String);

impl StorageKey {
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for StorageKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

//! Mobile handoff DTOs.

/// What kind of link was produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkKind {
    /// Link carries a short-lived sign-in token.
    AutoLogin,
    /// Plain storefront link.
    Plain,
}

/// Link to open the storefront on another device.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HandoffLink {
    /// The link to encode in the QR code.
    pub url: String,
    /// Whether the link signs the shopper in.
    pub kind: LinkKind,
}

impl HandoffLink {
    #[must_use]
    pub const fn plain(url: String) -> Self {
        Self {
            url,
            kind: LinkKind::Plain,
        }
    }

    #[must_use]
    pub const fn auto_login(url: String) -> Self {
        Self {
            url,
            kind: LinkKind::AutoLogin,
        }
    }
}

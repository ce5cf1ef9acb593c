//! Plain-text rendering of command results.

use std::fmt::Write;

use crate::application::dto::{HandoffLink, LinkKind};
use crate::domain::entities::{BatchDeleteOutcome, SessionToken, UploadedAsset, WishlistState};
use crate::infrastructure::cloudinary::ResponsiveUrls;

/// One line per item: `id  name  [price]  [brand]`.
#[must_use]
pub fn render_wishlist(label: &str, state: &WishlistState) -> String {
    let mut out = String::new();

    if state.is_empty() {
        let _ = writeln!(out, "{label}: wishlist is empty");
        return out;
    }

    let _ = writeln!(out, "{label}: {} item(s)", state.len());
    for item in state.items() {
        let _ = write!(out, "  {}  {}", item.id(), item.name());
        if let Some(price) = item.price() {
            let _ = write!(out, "  {price:.2}");
        }
        if let Some(brand) = item.brand() {
            let _ = write!(out, "  [{brand}]");
        }
        out.push('\n');
    }
    out
}

#[must_use]
pub fn render_responsive(urls: &ResponsiveUrls) -> String {
    [
        ("thumbnail", &urls.thumbnail),
        ("small", &urls.small),
        ("medium", &urls.medium),
        ("large", &urls.large),
        ("original", &urls.original),
    ]
    .iter()
    .fold(String::new(), |mut out, (name, url)| {
        let _ = writeln!(out, "{name:<10} {url}");
        out
    })
}

#[must_use]
pub fn render_uploads(assets: &[UploadedAsset]) -> String {
    assets.iter().fold(String::new(), |mut out, asset| {
        let _ = writeln!(
            out,
            "{}  {}x{}  {} bytes  {}",
            asset.public_id, asset.width, asset.height, asset.bytes, asset.secure_url
        );
        out
    })
}

#[must_use]
pub fn render_deletes(outcome: &BatchDeleteOutcome) -> String {
    let mut out = outcome
        .results
        .iter()
        .fold(String::new(), |mut out, (id, result)| {
            let _ = writeln!(out, "{id}: {result}");
            out
        });

    let _ = writeln!(
        out,
        "{} of {} deleted",
        outcome.deleted_count(),
        outcome.results.len()
    );
    if outcome.partial {
        out.push_str("host stopped early; run again for the rest\n");
    }
    out
}

#[must_use]
pub fn render_handoff(link: &HandoffLink) -> String {
    match link.kind {
        LinkKind::AutoLogin => format!("{}\n(auto-login link, expires shortly)\n", link.url),
        LinkKind::Plain => format!("{}\n", link.url),
    }
}

#[must_use]
pub fn render_session_status(saved: Option<&SessionToken>) -> String {
    saved.map_or_else(
        || "Signed out".to_string(),
        |token| format!("Signed in ({token})"),
    )
}

#[must_use]
pub const fn render_logout(had_session: bool) -> &'static str {
    if had_session {
        "Signed out"
    } else {
        "No saved session"
    }
}

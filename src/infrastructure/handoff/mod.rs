//! Storefront auth API adapter for mobile handoff tokens.

mod client;
mod dto;

pub use client::{DEFAULT_STOREFRONT_API, HandoffClient};

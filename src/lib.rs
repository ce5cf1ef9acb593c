//! `ReTag` - storefront core for a second-hand fashion marketplace.
//!
//! This crate keeps a per-shopper wishlist persisted to pluggable slot
//! storage, builds Cloudinary delivery URLs, and wraps Cloudinary uploads and
//! deletions, laid out as domain, application, infrastructure and
//! presentation layers.

#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

/// Application layer containing services, use cases and DTOs.
pub mod application;
/// Domain layer containing entities, errors, and port definitions.
pub mod domain;
/// Infrastructure layer containing adapters for external services.
pub mod infrastructure;
/// Presentation layer containing command dispatch and output rendering.
pub mod presentation;

/// Current version of the application.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Application name.
pub const NAME: &str = "retag";

//! Infrastructure layer with external service adapters.

/// Cloudinary delivery URLs and REST client.
pub mod cloudinary;
/// Application configuration.
pub mod config;
/// Storefront auth API client.
pub mod handoff;
/// Wishlist slot and session storage.
pub mod storage;

pub use cloudinary::{CloudinaryClient, CloudinaryConfig, DeliveryUrlBuilder, ImagePreset};
pub use config::{AppConfig, CliArgs, LogLevel, StorageManager};
pub use handoff::HandoffClient;
pub use storage::{FileWishlistStorage, KeyringSessionStorage};

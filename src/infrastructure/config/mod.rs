//! Application configuration.

pub mod app_config;
pub mod args;
pub mod storage;

pub use app_config::{AppConfig, CloudinarySettings, LogLevel, StorefrontSettings};
pub use args::{
    CliArgs, Command, HandoffArgs, SessionAction, UploadArgs, UrlArgs, WishlistAction,
    WishlistArgs,
};
pub use storage::{ConfigError, StorageManager};

use super::app_config::LogLevel;
use crate::domain::entities::{Crop, Gravity, ImageFormat, Quality};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(
    name = "retag",
    version,
    about = "ReTag storefront tools: wishlists, Cloudinary image URLs and uploads",
    long_about = None
)]
pub struct CliArgs {
    /// Configuration file path.
    #[arg(short, long, value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    /// Log file path.
    #[arg(long, value_name = "PATH", global = true)]
    pub log_path: Option<PathBuf>,

    /// Log verbosity level.
    #[arg(long, value_enum, global = true)]
    pub log_level: Option<LogLevel>,

    /// Directory for wishlist data and logs.
    #[arg(long, value_name = "PATH", global = true)]
    pub data_dir: Option<PathBuf>,

    /// Cloudinary account name, if not set in the environment.
    #[arg(long, global = true)]
    pub cloud_name: Option<String>,

    /// Storefront API base URL.
    #[arg(long, value_name = "URL", global = true)]
    pub api_url: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Print a delivery URL for an asset.
    Url(UrlArgs),

    /// Print the responsive URL set for an asset.
    Responsive {
        asset_id: String,
    },

    /// Print the asset id contained in a versioned delivery URL.
    Extract {
        url: String,
    },

    /// Upload image files.
    Upload(UploadArgs),

    /// Delete uploaded assets.
    Delete {
        #[arg(required = true)]
        ids: Vec<String>,
    },

    /// Inspect or change a wishlist.
    Wishlist(WishlistArgs),

    /// Print a storefront link that signs the current session in on a phone.
    Handoff(HandoffArgs),

    /// Save, remove or show the storefront session.
    Session {
        #[command(subcommand)]
        action: SessionAction,
    },
}

#[derive(Debug, Subcommand)]
pub enum SessionAction {
    /// Save a session credential for later commands.
    Login {
        #[arg(env = "RETAG_SESSION_TOKEN", hide_env_values = true)]
        token: String,
    },

    /// Remove the saved session.
    Logout,

    /// Show whether a session is saved.
    Status,
}

#[derive(Debug, Args)]
pub struct UrlArgs {
    pub asset_id: String,

    /// Named preset (thumbnail, small, medium, large, product-card,
    /// product-detail, mobile, retina, blurred, original).
    #[arg(long, conflicts_with_all = ["crop", "quality", "format", "gravity"])]
    pub preset: Option<String>,

    #[arg(long)]
    pub width: Option<u32>,

    #[arg(long)]
    pub height: Option<u32>,

    #[arg(long, value_enum)]
    pub crop: Option<Crop>,

    /// `auto`, `auto:best|good|eco|low` or 1-100.
    #[arg(long)]
    pub quality: Option<Quality>,

    #[arg(long, value_enum)]
    pub format: Option<ImageFormat>,

    #[arg(long, value_enum)]
    pub gravity: Option<Gravity>,

    /// Fill unset quality, format and crop with web defaults.
    #[arg(long)]
    pub optimized: bool,

    /// Append a slug of this product name to the asset path.
    #[arg(
        long,
        conflicts_with_all = ["preset", "crop", "quality", "format", "gravity", "optimized"]
    )]
    pub seo_name: Option<String>,
}

#[derive(Debug, Args)]
pub struct UploadArgs {
    #[arg(required = true)]
    pub files: Vec<PathBuf>,

    #[arg(long)]
    pub folder: Option<String>,

    #[arg(long)]
    pub quality: Option<Quality>,

    #[arg(long, value_enum)]
    pub format: Option<ImageFormat>,

    /// Resize to this width on ingestion.
    #[arg(long)]
    pub width: Option<u32>,

    /// Resize to this height on ingestion.
    #[arg(long)]
    pub height: Option<u32>,
}

#[derive(Debug, Args)]
pub struct WishlistArgs {
    /// Signed-in shopper email.
    #[arg(long, global = true)]
    pub user_email: Option<String>,

    /// Signed-in shopper id, used when no email is given.
    #[arg(long, global = true)]
    pub user_id: Option<String>,

    #[command(subcommand)]
    pub action: WishlistAction,
}

#[derive(Debug, Subcommand)]
pub enum WishlistAction {
    /// List saved items.
    List,

    /// Save an item.
    Add {
        id: String,
        name: String,
        #[arg(long)]
        price: Option<f64>,
        #[arg(long)]
        image: Option<String>,
        #[arg(long)]
        brand: Option<String>,
    },

    /// Remove an item by id.
    Remove { id: String },

    /// Remove every item.
    Clear,

    /// Drop the shopper's saved wishlist and switch to the guest list.
    Logout,
}

#[derive(Debug, Args)]
pub struct HandoffArgs {
    /// Public storefront URL; falls back to the configured one.
    pub base_url: Option<String>,

    /// Session credential for this run; falls back to the saved session.
    #[arg(long, env = "RETAG_SESSION_TOKEN", hide_env_values = true)]
    pub session_token: Option<String>,
}

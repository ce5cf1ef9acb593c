//! Cloudinary media host adapter.

mod client;
mod config;
mod delivery;
mod dto;
mod signature;

pub use client::CloudinaryClient;
pub use config::{CloudinaryConfig, DEFAULT_API_BASE, DEFAULT_CDN_HOST};
pub use delivery::{
    DeliveryUrlBuilder, ImagePreset, ResponsiveUrls, build_image_url, extract_asset_id,
    is_cloudinary_url,
};
pub use signature::{SignatureAlgorithm, sign};

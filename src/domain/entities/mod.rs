//! Domain entity definitions.

mod identity;
mod image_options;
mod media;
mod token;
mod wishlist;

pub use identity::{ANONYMOUS_KEY, Identity, StorageKey};
pub use image_options::{Crop, Gravity, ImageFormat, ImageOptions, Quality};
pub use media::{
    AssetId, BatchDeleteOutcome, DEFAULT_UPLOAD_FOLDER, DeleteOutcome, UploadOptions,
    UploadedAsset,
};
pub use token::{HandoffToken, SessionToken};
pub use wishlist::{WishlistCommand, WishlistItem, WishlistState};

//! Application services.

mod media_service;
mod wishlist_store;

pub use media_service::{MAX_DELETE_BATCH, MediaService};
pub use wishlist_store::{PersistenceEvent, WishlistStore};

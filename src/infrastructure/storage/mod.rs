//! Wishlist slot and session storage adapters.

mod file_wishlist_storage;
#[cfg(feature = "keyring")]
mod keyring_storage;
#[cfg(not(feature = "keyring"))]
mod keyring_storage_stub;

pub use file_wishlist_storage::FileWishlistStorage;
#[cfg(feature = "keyring")]
pub use keyring_storage::KeyringSessionStorage;
#[cfg(not(feature = "keyring"))]
pub use keyring_storage_stub::KeyringSessionStorage;

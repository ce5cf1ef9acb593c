mod handoff_port;
mod media_host_port;
mod session_storage_port;
mod wishlist_storage_port;

pub use handoff_port::HandoffPort;
pub use media_host_port::{MediaHostPort, UploadParams};
pub use session_storage_port::SessionStoragePort;
pub use wishlist_storage_port::WishlistStoragePort;

#[cfg(test)]
pub use media_host_port::MockMediaHostPort;

//! Domain layer with core business entities and port definitions.

/// Entity definitions.
pub mod entities;
/// Error types.
pub mod errors;
/// Port definitions.
pub mod ports;

pub use entities::{Identity, ImageOptions, WishlistItem, WishlistState};
pub use errors::{HandoffError, MediaError, PersistenceError};
pub use ports::{HandoffPort, MediaHostPort, SessionStoragePort, WishlistStoragePort};

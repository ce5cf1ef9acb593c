//! Domain error types.

mod handoff_error;
mod media_error;
mod persistence_error;

pub use handoff_error::HandoffError;
pub use media_error::MediaError;
pub use persistence_error::PersistenceError;

//! Data transfer objects for the application layer.

mod handoff_dto;
mod session_dto;

pub use handoff_dto::{HandoffLink, LinkKind};
pub use session_dto::{ActiveSession, SessionSource};

//! Use case implementations.

mod handoff_link_use_case;
mod session_use_case;

pub use handoff_link_use_case::HandoffLinkUseCase;
pub use session_use_case::SessionUseCase;

//! Application layer with services, use cases and DTOs.

/// Data transfer objects.
pub mod dto;
/// Long-lived application services.
pub mod services;
/// Use case implementations.
pub mod use_cases;

pub use dto::{ActiveSession, HandoffLink, SessionSource};
pub use services::{MediaService, PersistenceEvent, WishlistStore};
pub use use_cases::{HandoffLinkUseCase, SessionUseCase};

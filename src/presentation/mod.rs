//! Command-line presentation layer.

/// Command dispatch.
pub mod app;
/// Result rendering.
pub mod output;

pub use app::App;

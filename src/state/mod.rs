//! Client state (pure).
//!
//! All state transitions are pure functions testable without a terminal or socket.

pub mod line_editor;
pub mod scroll_window;

// Re-export for convenience
pub use line_editor::{EditResult, InputLine};
pub use scroll_window::ScrollWindow;

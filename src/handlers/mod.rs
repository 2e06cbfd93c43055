//! Event Handlers
//!
//! This module contains handlers for terminal input:
//! - keyboard: Key presses routed through dialogs, popups, drawer, shortcuts
//! - mouse: Clicks resolved against the last frame's hit regions
//!
//! Handlers mutate `ScaffoldState` and return a `ScaffoldEvent` for the host
//! to act on (dispatch a handler id, toggle the theme, ...).

pub mod keyboard;
pub mod mouse;

// Re-export for convenience
pub use keyboard::handle_key;
pub use mouse::handle_mouse;

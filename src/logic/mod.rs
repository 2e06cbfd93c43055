//! Business Logic
//!
//! Pure functions that can be unit tested without a terminal:
//! - app_bar: App bar slot composition and overflow dispatch
//! - errors: Error classification and user-facing messages
//! - filename: Remote file naming and paths
//! - layout: Layout mode resolution and navigation widths
//! - status_bar: Status bar bucketing and ordering
//! - ui: UI state cycling (theme mode, toasts, cursors)

pub mod app_bar;
pub mod errors;
pub mod filename;
pub mod layout;
pub mod status_bar;
pub mod ui;

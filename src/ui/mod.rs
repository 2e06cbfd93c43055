// UI module - handles all TUI rendering using Ratatui
//
// Architecture:
// - scaffold: Responsive scaffold that composes everything below
// - layout: Calculates screen layout (app bar, rail, drawer, content, status)
// - app_bar: Renders the composed app bar slots
// - nav: Renders the navigation rail and drawer
// - status_bar: Renders the narrow/medium/wide status bar
// - dialogs: Renders modal dialogs and the overflow popup
// - toast: Renders toast notifications (brief pop-up messages)
// - theme: Light and dark colour palettes
// - view: Content view trait
// - file_browser: POD file browser content view

pub mod app_bar;
pub mod dialogs;
pub mod file_browser;
pub mod layout;
pub mod nav;
pub mod scaffold;
pub mod status_bar;
pub mod theme;
pub mod toast;
pub mod view;

// Re-export the main entry points for convenience
pub use file_browser::FileBrowserView;
pub use scaffold::{Scaffold, ScaffoldBuilder};
pub use theme::Palette;
pub use view::{TextView, View};

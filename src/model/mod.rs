//! Scaffold Model
//!
//! Configuration values handed to the scaffold at construction time, plus
//! the mutable per-scaffold state the render and input paths share:
//!
//! - **menu / app_bar / status_bar / theme / about**: immutable config
//! - **NavigationModel**: selected tab, drawer
//! - **UiModel**: dialogs, overflow popup, toasts, hit regions
//! - **FileState**: per-panel file browser snapshot
//! - **HandlerRegistry**: handler ids → host closures

pub mod about;
pub mod app_bar;
pub mod events;
pub mod file_state;
pub mod handlers;
pub mod menu;
pub mod navigation;
pub mod status_bar;
pub mod theme;
pub mod ui;

pub use about::{AboutConfig, VersionConfig};
pub use app_bar::{Action, AppBarConfig, Breakpoints, OverflowItem};
pub use events::{ScaffoldEvent, StatusKey};
pub use file_state::FileState;
pub use handlers::HandlerRegistry;
pub use menu::MenuItem;
pub use navigation::{NavigationModel, Selection};
pub use status_bar::{
    LoginStatus, SecurityKeyStatus, ServerInfo, StatusBarConfig, StatusBarItem,
};
pub use theme::{ThemeControl, ThemeMode, ThemeToggleConfig, TogglePlacement};
pub use ui::{Dialog, Notice, UiModel};

use crate::logic::app_bar::ComposedAppBar;
use crate::logic::layout::LayoutMode;
use crate::logic::status_bar::ComposedStatusBar;

/// What the last frame decided, used by input handling between frames
#[derive(Debug, Clone, Default)]
pub struct FrameInfo {
    pub mode: Option<LayoutMode>,
    pub width: u16,
    pub app_bar: Option<ComposedAppBar>,
    pub status_bar: Option<ComposedStatusBar>,
}

/// Mutable state owned by the host alongside a `Scaffold`
#[derive(Debug, Default)]
pub struct ScaffoldState {
    pub navigation: NavigationModel,
    pub ui: UiModel,
    pub frame: FrameInfo,
}

impl ScaffoldState {
    pub fn new(selection: Selection) -> Self {
        Self {
            navigation: NavigationModel::new(selection),
            ui: UiModel::default(),
            frame: FrameInfo::default(),
        }
    }

    pub fn selected_index(&self) -> usize {
        self.navigation.selected_index()
    }

    pub fn has_modal(&self) -> bool {
        self.ui.has_modal()
    }

    /// Route a pending passphrase request into a prompt dialog
    pub fn open_key_prompt(&mut self, request: crate::services::security_key::KeyPromptRequest) {
        self.ui.open_key_prompt(request);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_state_creation() {
        let state = ScaffoldState::new(Selection::Internal(1));
        assert_eq!(state.selected_index(), 1);
        assert!(!state.navigation.drawer_open);
        assert!(!state.has_modal());
        assert!(state.frame.mode.is_none());
    }
}

//! Events the scaffold reports back to its host

/// Identifies a status bar entry
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum StatusKey {
    ServerInfo,
    Login,
    SecurityKey,
    Custom(String),
}

/// Outcome of a key press or click that the host may need to act on
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScaffoldEvent {
    /// A tab was chosen; `action` is the tab's handler id, if any
    TabSelected { index: usize, action: Option<String> },
    /// An app bar action was pressed
    ActionPressed(String),
    /// A host-defined overflow entry was chosen
    OverflowItemSelected(String),
    /// Theme toggle pressed. With managed control the host awaits
    /// `ThemeController::toggle`; otherwise it dispatches `external_handler`.
    ThemeToggleRequested { external_handler: Option<String> },
    AboutOpened,
    DrawerToggled(bool),
    /// A status entry was tapped; `handler` is its `on_tap` id, if any
    StatusItemTapped { key: StatusKey, handler: Option<String> },
}

impl ScaffoldEvent {
    /// Handler id to dispatch for this event, if it names one
    pub fn handler_id(&self) -> Option<&str> {
        match self {
            ScaffoldEvent::TabSelected { action, .. } => action.as_deref(),
            ScaffoldEvent::ActionPressed(id) | ScaffoldEvent::OverflowItemSelected(id) => Some(id),
            ScaffoldEvent::ThemeToggleRequested { external_handler } => external_handler.as_deref(),
            ScaffoldEvent::StatusItemTapped { handler, .. } => handler.as_deref(),
            ScaffoldEvent::AboutOpened | ScaffoldEvent::DrawerToggled(_) => None,
        }
    }
}

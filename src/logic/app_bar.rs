//! App bar composition
//!
//! Turns an [`AppBarConfig`] and the current width into an ordered list of
//! slots. Priority order is fixed:
//!
//! 1. version display (hidden below the very-narrow threshold)
//! 2. configured actions, each filtered by its own visibility flags
//! 3. theme toggle (inline, or overflow-eligible)
//! 4. overflow menu, or the overflow entries as plain buttons
//! 5. About, always last

use ratatui::style::Color;

use crate::model::app_bar::{AppBarConfig, Breakpoints};
use crate::model::about::AboutConfig;
use crate::model::theme::{ThemeMode, ThemeToggleConfig, TogglePlacement};

pub const THEME_TOGGLE_ID: &str = "theme_toggle";
pub const ABOUT_ID: &str = "about";

/// Stored identifier of an overflow entry
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum OverflowId {
    ThemeToggle,
    About,
    Item(String),
}

impl OverflowId {
    pub fn as_str(&self) -> &str {
        match self {
            OverflowId::ThemeToggle => THEME_TOGGLE_ID,
            OverflowId::About => ABOUT_ID,
            OverflowId::Item(id) => id,
        }
    }

    pub fn parse(id: &str) -> Self {
        match id {
            THEME_TOGGLE_ID => OverflowId::ThemeToggle,
            ABOUT_ID => OverflowId::About,
            other => OverflowId::Item(other.to_string()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OverflowEntry {
    pub id: OverflowId,
    pub label: String,
    pub icon: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppBarSlot {
    Version(String),
    Action {
        id: String,
        icon: String,
        tooltip: Option<String>,
        color: Option<Color>,
    },
    ThemeToggle {
        icon: String,
        tooltip: String,
    },
    /// An overflow entry shown as a plain button because the menu is not
    /// materialised at this width
    OverflowButton(OverflowEntry),
    OverflowMenu(Vec<OverflowEntry>),
    About {
        icon: String,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComposedAppBar {
    pub title: String,
    pub background: Option<Color>,
    pub slots: Vec<AppBarSlot>,
}

impl ComposedAppBar {
    pub fn has_overflow_menu(&self) -> bool {
        self.overflow_entries().is_some()
    }

    pub fn overflow_entries(&self) -> Option<&[OverflowEntry]> {
        self.slots.iter().find_map(|slot| match slot {
            AppBarSlot::OverflowMenu(entries) => Some(entries.as_slice()),
            _ => None,
        })
    }

    /// Whether the theme toggle is reachable anywhere in the bar
    pub fn has_theme_toggle(&self) -> bool {
        self.slots.iter().any(|slot| match slot {
            AppBarSlot::ThemeToggle { .. } => true,
            AppBarSlot::OverflowButton(entry) => entry.id == OverflowId::ThemeToggle,
            AppBarSlot::OverflowMenu(entries) => {
                entries.iter().any(|e| e.id == OverflowId::ThemeToggle)
            }
            _ => false,
        })
    }

    /// Whether About is reachable anywhere in the bar
    pub fn has_about(&self) -> bool {
        self.slots.iter().any(|slot| match slot {
            AppBarSlot::About { .. } => true,
            AppBarSlot::OverflowButton(entry) => entry.id == OverflowId::About,
            AppBarSlot::OverflowMenu(entries) => entries.iter().any(|e| e.id == OverflowId::About),
            _ => false,
        })
    }

    pub fn has_action(&self, action_id: &str) -> bool {
        self.slots
            .iter()
            .any(|slot| matches!(slot, AppBarSlot::Action { id, .. } if id == action_id))
    }
}

/// Visibility of the theme toggle at this width
fn theme_visible(theme: &ThemeToggleConfig, width: u16, bp: &Breakpoints) -> bool {
    if !theme.enabled {
        return false;
    }
    if theme.hide_on_very_narrow && bp.is_very_narrow(width) {
        return false;
    }
    !(theme.hide_on_narrow && bp.is_narrow(width))
}

fn about_visible(about: &AboutConfig, width: u16, bp: &Breakpoints) -> bool {
    if !about.enabled {
        return false;
    }
    if about.hide_on_very_narrow && bp.is_very_narrow(width) {
        return false;
    }
    !(about.hide_on_narrow && bp.is_narrow(width))
}

/// Compose the app bar for the given width
///
/// # Arguments
/// * `config` - App bar configuration
/// * `width` - Viewport width in logical pixels
/// * `managed_mode` - Mode of the managed theme controller (used unless the
///   toggle is externally controlled)
pub fn compose_app_bar(config: &AppBarConfig, width: u16, managed_mode: ThemeMode) -> ComposedAppBar {
    let bp = &config.breakpoints;
    let very_narrow = bp.is_very_narrow(width);
    let mut slots = Vec::new();

    // 1. Version
    if let Some(version) = &config.version {
        if !very_narrow {
            slots.push(AppBarSlot::Version(version.display()));
        }
    }

    // 2. Actions
    for action in config.actions.iter().filter(|a| a.visible_at(width, bp)) {
        slots.push(AppBarSlot::Action {
            id: action.id.clone(),
            icon: action.icon.clone(),
            tooltip: action.tooltip.clone(),
            color: action.color,
        });
    }

    // 3. Theme toggle: inline or overflow-eligible
    let mut theme_overflow: Option<OverflowEntry> = None;
    if let Some(theme) = config.theme.as_ref().filter(|t| theme_visible(t, width, bp)) {
        let mode = theme.control.mode_or(managed_mode);
        let icon = theme.icons.for_mode(mode).to_string();
        if !very_narrow && theme.placement == TogglePlacement::Inline {
            slots.push(AppBarSlot::ThemeToggle {
                icon,
                tooltip: theme.tooltip.clone(),
            });
        } else {
            theme_overflow = Some(OverflowEntry {
                id: OverflowId::ThemeToggle,
                label: format!("Theme: {}", mode),
                icon,
            });
        }
    }

    // 5 (decided early). About, overflow-eligible only on very narrow screens
    let about = config.about.as_ref().filter(|a| about_visible(a, width, bp));
    let about_overflow = about.filter(|a| very_narrow && a.overflow_on_very_narrow);

    // 4. Overflow
    let mut entries: Vec<OverflowEntry> = config
        .overflow_items
        .iter()
        .map(|item| OverflowEntry {
            id: OverflowId::Item(item.id.clone()),
            label: item.label.clone(),
            icon: item.icon.clone(),
        })
        .collect();
    entries.extend(theme_overflow);
    if let Some(about) = about_overflow {
        entries.push(OverflowEntry {
            id: OverflowId::About,
            label: "About".to_string(),
            icon: about.icon.clone(),
        });
    }

    // Regular items, an overflow-eligible toggle or an overflow-eligible
    // About each justify the menu on very narrow screens
    let materialise = very_narrow && !entries.is_empty();

    if materialise {
        slots.push(AppBarSlot::OverflowMenu(entries));
        if about_overflow.is_none() {
            if let Some(about) = about {
                slots.push(AppBarSlot::About {
                    icon: about.icon.clone(),
                });
            }
        }
    } else {
        slots.extend(entries.into_iter().map(AppBarSlot::OverflowButton));
        if let Some(about) = about {
            slots.push(AppBarSlot::About {
                icon: about.icon.clone(),
            });
        }
    }

    ComposedAppBar {
        title: config.title.clone(),
        background: config.background_color,
        slots,
    }
}

/// What selecting an overflow entry should do
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OverflowCommand {
    ToggleTheme,
    ShowAbout,
    Host(String),
}

/// Route a stored overflow identifier to its handler
///
/// # Examples
/// ```
/// use solidtui::logic::app_bar::{dispatch_overflow, OverflowCommand};
///
/// assert_eq!(dispatch_overflow("theme_toggle"), OverflowCommand::ToggleTheme);
/// assert_eq!(dispatch_overflow("about"), OverflowCommand::ShowAbout);
/// assert_eq!(dispatch_overflow("logout"), OverflowCommand::Host("logout".into()));
/// ```
pub fn dispatch_overflow(id: &str) -> OverflowCommand {
    match OverflowId::parse(id) {
        OverflowId::ThemeToggle => OverflowCommand::ToggleTheme,
        OverflowId::About => OverflowCommand::ShowAbout,
        OverflowId::Item(id) => OverflowCommand::Host(id),
    }
}

//! App bar configuration
//!
//! Plain data only. Actions name a handler id instead of carrying a
//! callback; hosts register the handlers separately in a
//! [`HandlerRegistry`](super::handlers::HandlerRegistry).

use ratatui::style::Color;

use super::about::{AboutConfig, VersionConfig};
use super::theme::ThemeToggleConfig;
use crate::error::ScaffoldError;

/// Default width (logical px) at or below which the scaffold switches to
/// the drawer and app bar actions start hiding
pub const DEFAULT_NARROW_THRESHOLD: u16 = 800;

/// Default width (logical px) below which the overflow menu appears
pub const DEFAULT_VERY_NARROW_THRESHOLD: u16 = 600;

/// Responsive breakpoints in logical pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Breakpoints {
    pub narrow: u16,
    pub very_narrow: u16,
}

impl Default for Breakpoints {
    fn default() -> Self {
        Self {
            narrow: DEFAULT_NARROW_THRESHOLD,
            very_narrow: DEFAULT_VERY_NARROW_THRESHOLD,
        }
    }
}

impl Breakpoints {
    /// Thresholds must satisfy `very_narrow <= narrow`
    pub fn new(narrow: u16, very_narrow: u16) -> Result<Self, ScaffoldError> {
        let breakpoints = Self { narrow, very_narrow };
        breakpoints.validate()?;
        Ok(breakpoints)
    }

    pub fn validate(&self) -> Result<(), ScaffoldError> {
        if self.very_narrow > self.narrow {
            return Err(ScaffoldError::InvalidThresholds {
                narrow: self.narrow,
                very_narrow: self.very_narrow,
            });
        }
        Ok(())
    }

    pub fn is_narrow(&self, width: u16) -> bool {
        width < self.narrow
    }

    pub fn is_very_narrow(&self, width: u16) -> bool {
        width < self.very_narrow
    }
}

/// A primary app bar button
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Action {
    /// Handler id dispatched when pressed
    pub id: String,
    pub icon: String,
    pub tooltip: Option<String>,
    pub color: Option<Color>,
    pub hide_on_narrow: bool,
    pub hide_on_very_narrow: bool,
    pub shortcut: Option<char>,
}

impl Action {
    pub fn new(id: impl Into<String>, icon: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            icon: icon.into(),
            tooltip: None,
            color: None,
            hide_on_narrow: false,
            hide_on_very_narrow: false,
            shortcut: None,
        }
    }

    pub fn with_tooltip(mut self, tooltip: impl Into<String>) -> Self {
        self.tooltip = Some(tooltip.into());
        self
    }

    pub fn with_shortcut(mut self, key: char) -> Self {
        self.shortcut = Some(key);
        self
    }

    pub fn with_color(mut self, color: Color) -> Self {
        self.color = Some(color);
        self
    }

    pub fn hide_on_narrow(mut self) -> Self {
        self.hide_on_narrow = true;
        self
    }

    pub fn hide_on_very_narrow(mut self) -> Self {
        self.hide_on_very_narrow = true;
        self
    }

    /// Whether the action survives the current breakpoint
    pub fn visible_at(&self, width: u16, breakpoints: &Breakpoints) -> bool {
        if self.hide_on_very_narrow && breakpoints.is_very_narrow(width) {
            return false;
        }
        if self.hide_on_narrow && breakpoints.is_narrow(width) {
            return false;
        }
        true
    }
}

/// An entry that moves into the overflow menu on very narrow screens
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OverflowItem {
    pub id: String,
    pub label: String,
    pub icon: String,
    pub shortcut: Option<char>,
}

impl OverflowItem {
    pub fn new(id: impl Into<String>, label: impl Into<String>, icon: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            icon: icon.into(),
            shortcut: None,
        }
    }

    pub fn with_shortcut(mut self, key: char) -> Self {
        self.shortcut = Some(key);
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppBarConfig {
    pub title: String,
    pub background_color: Option<Color>,
    pub actions: Vec<Action>,
    pub overflow_items: Vec<OverflowItem>,
    pub version: Option<VersionConfig>,
    pub theme: Option<ThemeToggleConfig>,
    pub about: Option<AboutConfig>,
    pub breakpoints: Breakpoints,
}

impl AppBarConfig {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            background_color: None,
            actions: Vec::new(),
            overflow_items: Vec::new(),
            version: None,
            theme: None,
            about: None,
            breakpoints: Breakpoints::default(),
        }
    }

    pub fn action(mut self, action: Action) -> Self {
        self.actions.push(action);
        self
    }

    pub fn overflow_item(mut self, item: OverflowItem) -> Self {
        self.overflow_items.push(item);
        self
    }

    pub fn version(mut self, version: VersionConfig) -> Self {
        self.version = Some(version);
        self
    }

    pub fn theme(mut self, theme: ThemeToggleConfig) -> Self {
        self.theme = Some(theme);
        self
    }

    pub fn about(mut self, about: AboutConfig) -> Self {
        self.about = Some(about);
        self
    }

    pub fn background(mut self, color: Color) -> Self {
        self.background_color = Some(color);
        self
    }

    pub fn breakpoints(mut self, breakpoints: Breakpoints) -> Self {
        self.breakpoints = breakpoints;
        self
    }

    pub fn validate(&self) -> Result<(), ScaffoldError> {
        self.breakpoints.validate()
    }
}

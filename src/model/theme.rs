//! Theme mode and theme toggle configuration

use std::fmt;
use std::str::FromStr;

/// Process-wide colour scheme selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ThemeMode {
    Light,
    Dark,
    #[default]
    System,
}

impl ThemeMode {
    /// Literal persisted under the theme preference key
    pub fn as_str(&self) -> &'static str {
        match self {
            ThemeMode::Light => "light",
            ThemeMode::Dark => "dark",
            ThemeMode::System => "system",
        }
    }
}

impl fmt::Display for ThemeMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ThemeMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "light" => Ok(ThemeMode::Light),
            "dark" => Ok(ThemeMode::Dark),
            "system" => Ok(ThemeMode::System),
            other => Err(format!("unknown theme mode: {}", other)),
        }
    }
}

/// Who owns the theme mode shown by the toggle
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ThemeControl {
    /// The scaffold's `ThemeController` owns the mode and cycles it on toggle
    #[default]
    Managed,
    /// The host owns the mode; toggling dispatches the named handler
    External { mode: ThemeMode, on_toggle: String },
}

impl ThemeControl {
    /// Mode to display, falling back to the managed controller's value
    pub fn mode_or(&self, managed: ThemeMode) -> ThemeMode {
        match self {
            ThemeControl::Managed => managed,
            ThemeControl::External { mode, .. } => *mode,
        }
    }

    pub fn external_handler(&self) -> Option<&str> {
        match self {
            ThemeControl::Managed => None,
            ThemeControl::External { on_toggle, .. } => Some(on_toggle),
        }
    }
}

/// Where the toggle prefers to live in the app bar
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TogglePlacement {
    #[default]
    Inline,
    Overflow,
}

/// Glyph shown for each mode (the icon hints at the current mode)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThemeIcons {
    pub light: String,
    pub dark: String,
    pub system: String,
}

impl Default for ThemeIcons {
    fn default() -> Self {
        Self {
            light: "☀".to_string(),
            dark: "☾".to_string(),
            system: "◐".to_string(),
        }
    }
}

impl ThemeIcons {
    pub fn for_mode(&self, mode: ThemeMode) -> &str {
        match mode {
            ThemeMode::Light => &self.light,
            ThemeMode::Dark => &self.dark,
            ThemeMode::System => &self.system,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThemeToggleConfig {
    pub enabled: bool,
    pub icons: ThemeIcons,
    pub control: ThemeControl,
    pub placement: TogglePlacement,
    pub tooltip: String,
    pub hide_on_narrow: bool,
    pub hide_on_very_narrow: bool,
}

impl Default for ThemeToggleConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            icons: ThemeIcons::default(),
            control: ThemeControl::Managed,
            placement: TogglePlacement::Inline,
            tooltip: "Toggle theme".to_string(),
            hide_on_narrow: false,
            hide_on_very_narrow: false,
        }
    }
}

impl ThemeToggleConfig {
    pub fn external(mode: ThemeMode, on_toggle: impl Into<String>) -> Self {
        Self {
            control: ThemeControl::External {
                mode,
                on_toggle: on_toggle.into(),
            },
            ..Self::default()
        }
    }

    pub fn in_overflow(mut self) -> Self {
        self.placement = TogglePlacement::Overflow;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_theme_mode_round_trips_literals() {
        for mode in [ThemeMode::Light, ThemeMode::Dark, ThemeMode::System] {
            assert_eq!(mode.as_str().parse::<ThemeMode>(), Ok(mode));
        }
    }

    #[test]
    fn test_theme_mode_rejects_unknown() {
        assert!("sepia".parse::<ThemeMode>().is_err());
    }

    #[test]
    fn test_external_control_overrides_managed_mode() {
        let control = ThemeControl::External {
            mode: ThemeMode::Dark,
            on_toggle: "toggle".to_string(),
        };
        assert_eq!(control.mode_or(ThemeMode::Light), ThemeMode::Dark);
        assert_eq!(ThemeControl::Managed.mode_or(ThemeMode::Light), ThemeMode::Light);
        assert_eq!(control.external_handler(), Some("toggle"));
    }
}

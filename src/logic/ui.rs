//! UI state transition logic
//!
//! Pure functions for UI state cycling and transitions.

use crate::model::theme::ThemeMode;

/// How long a toast stays on screen
pub const TOAST_DURATION_MS: u128 = 1500;

/// Cycle to the next theme mode: System → Light → Dark → System
///
/// # Examples
/// ```
/// use solidtui::model::ThemeMode;
/// use solidtui::logic::ui::cycle_theme_mode;
///
/// assert_eq!(cycle_theme_mode(ThemeMode::System), ThemeMode::Light);
/// assert_eq!(cycle_theme_mode(ThemeMode::Light), ThemeMode::Dark);
/// assert_eq!(cycle_theme_mode(ThemeMode::Dark), ThemeMode::System);
/// ```
pub fn cycle_theme_mode(current: ThemeMode) -> ThemeMode {
    match current {
        ThemeMode::System => ThemeMode::Light,
        ThemeMode::Light => ThemeMode::Dark,
        ThemeMode::Dark => ThemeMode::System,
    }
}

/// Whether a toast shown `elapsed_ms` ago should disappear
pub fn should_dismiss_toast(elapsed_ms: u128) -> bool {
    elapsed_ms >= TOAST_DURATION_MS
}

/// Move a list cursor by `delta`, wrapping around
pub fn wrap_index(current: usize, delta: isize, len: usize) -> usize {
    if len == 0 {
        return 0;
    }
    let len = len as isize;
    (((current as isize + delta) % len + len) % len) as usize
}

//! Layout resolution logic
//!
//! Pure functions deciding how the scaffold arranges navigation for a given
//! viewport width.

/// Default terminal cell width in logical pixels
pub const DEFAULT_CELL_WIDTH: u16 = 8;

/// How the scaffold renders navigation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayoutMode {
    /// No menu configured: behave like a plain page scaffold
    Compatibility,
    /// Persistent side rail next to the content, no drawer
    Wide,
    /// Collapsible drawer instead of the rail
    Narrow,
}

impl LayoutMode {
    pub fn has_rail(&self) -> bool {
        matches!(self, LayoutMode::Wide)
    }

    pub fn has_drawer(&self) -> bool {
        matches!(self, LayoutMode::Narrow)
    }
}

/// Convert a width in terminal columns to logical pixels
///
/// # Examples
/// ```
/// use solidtui::logic::layout::logical_width;
///
/// assert_eq!(logical_width(80, 8), 640);
/// assert_eq!(logical_width(u16::MAX, 8), u16::MAX);
/// ```
pub fn logical_width(columns: u16, cell_width: u16) -> u16 {
    columns.saturating_mul(cell_width.max(1))
}

/// Decide the layout mode
///
/// # Arguments
/// * `width` - Viewport width in logical pixels
/// * `has_menu` - Whether a menu was configured
/// * `narrow_threshold` - Widths at or below this use the drawer
///
/// # Examples
/// ```
/// use solidtui::logic::layout::{resolve_layout_mode, LayoutMode};
///
/// assert_eq!(resolve_layout_mode(1000, true, 800), LayoutMode::Wide);
/// assert_eq!(resolve_layout_mode(800, true, 800), LayoutMode::Narrow);
/// assert_eq!(resolve_layout_mode(1000, false, 800), LayoutMode::Compatibility);
/// ```
pub fn resolve_layout_mode(width: u16, has_menu: bool, narrow_threshold: u16) -> LayoutMode {
    if !has_menu {
        LayoutMode::Compatibility
    } else if width > narrow_threshold {
        LayoutMode::Wide
    } else {
        LayoutMode::Narrow
    }
}

/// Width of the navigation rail in columns
///
/// Fits the longest label plus the selection marker and borders, but never
/// takes more than a third of the screen.
pub fn rail_width(labels: &[String], columns: u16) -> u16 {
    const MIN_RAIL: u16 = 12;
    let longest = labels
        .iter()
        .map(|l| unicode_width::UnicodeWidthStr::width(l.as_str()) as u16)
        .max()
        .unwrap_or(0);
    let wanted = longest.saturating_add(6).max(MIN_RAIL);
    wanted.min((columns / 3).max(MIN_RAIL)).min(columns)
}

/// Width of the drawer overlay in columns
pub fn drawer_width(columns: u16) -> u16 {
    const MAX_DRAWER: u16 = 32;
    (columns.saturating_mul(3) / 4).min(MAX_DRAWER).min(columns)
}

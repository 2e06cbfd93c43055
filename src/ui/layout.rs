use ratatui::layout::{Constraint, Direction, Layout, Rect};

use crate::logic::layout::LayoutMode;

/// Rows taken by the app bar
pub const APP_BAR_HEIGHT: u16 = 1;

/// Columns taken by the hamburger and leading menu icon
pub const MENU_BUTTON_WIDTH: u16 = 3;

/// Screen areas for one scaffold frame
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScaffoldLayout {
    pub app_bar: Option<Rect>,
    /// Navigation rail (wide layout only)
    pub rail: Option<Rect>,
    /// Drawer overlay, present only while the drawer is open
    pub drawer: Option<Rect>,
    pub content: Rect,
    pub status_bar: Option<Rect>,
    /// Floating menu button (narrow layout without an app bar)
    pub hamburger: Option<Rect>,
    /// Menu icon at the start of the app bar (narrow layout with an app bar)
    pub leading_menu_icon: Option<Rect>,
}

/// What the layout needs to know about the frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LayoutRequest {
    pub mode: LayoutMode,
    pub has_app_bar: bool,
    /// Height of the composed status bar; `None` when there is none
    pub status_height: Option<u16>,
    pub rail_width: u16,
    pub drawer_width: u16,
    pub drawer_open: bool,
    /// Compatibility mode only: whether a plain drawer view was supplied
    pub has_drawer_view: bool,
}

/// Calculate the screen layout for the scaffold
pub fn calculate_layout(area: Rect, request: LayoutRequest) -> ScaffoldLayout {
    let app_bar_height = if request.has_app_bar {
        APP_BAR_HEIGHT.min(area.height)
    } else {
        0
    };

    // Compatibility mode has no status bar; the content keeps at least a row
    let status_height = match (request.mode, request.status_height) {
        (LayoutMode::Compatibility, _) | (_, None) => 0,
        (_, Some(h)) => h.min(area.height.saturating_sub(app_bar_height + 1)),
    };

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(app_bar_height),
            Constraint::Min(1),
            Constraint::Length(status_height),
        ])
        .split(area);

    let app_bar = request.has_app_bar.then_some(rows[0]);
    let body = rows[1];
    let status_bar = (status_height > 0).then_some(rows[2]);

    let (rail, content) = if request.mode.has_rail() {
        let width = request.rail_width.min(body.width.saturating_sub(1));
        let cols = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Length(width), Constraint::Min(1)])
            .split(body);
        (Some(cols[0]), cols[1])
    } else {
        (None, body)
    };

    let drawer_allowed = match request.mode {
        LayoutMode::Narrow => true,
        LayoutMode::Compatibility => request.has_drawer_view,
        LayoutMode::Wide => false,
    };
    let drawer = (drawer_allowed && request.drawer_open).then(|| Rect {
        x: body.x,
        y: body.y,
        width: request.drawer_width.min(body.width),
        height: body.height,
    });

    let menu_button = |anchor: Rect| Rect {
        x: anchor.x,
        y: anchor.y,
        width: MENU_BUTTON_WIDTH.min(anchor.width),
        height: 1.min(anchor.height),
    };

    let (hamburger, leading_menu_icon) = if drawer_allowed {
        match app_bar {
            Some(bar) => (None, Some(menu_button(bar))),
            None => (Some(menu_button(content)), None),
        }
    } else {
        (None, None)
    };

    ScaffoldLayout {
        app_bar,
        rail,
        drawer,
        content,
        status_bar,
        hamburger,
        leading_menu_icon,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(mode: LayoutMode) -> LayoutRequest {
        LayoutRequest {
            mode,
            has_app_bar: true,
            status_height: Some(1),
            rail_width: 16,
            drawer_width: 30,
            drawer_open: false,
            has_drawer_view: false,
        }
    }

    #[test]
    fn test_wide_layout_has_rail() {
        let layout = calculate_layout(Rect::new(0, 0, 120, 40), request(LayoutMode::Wide));
        assert_eq!(layout.rail, Some(Rect::new(0, 1, 16, 38)));
        assert_eq!(layout.content, Rect::new(16, 1, 104, 38));
        assert_eq!(layout.status_bar, Some(Rect::new(0, 39, 120, 1)));
        assert!(layout.drawer.is_none());
        assert!(layout.leading_menu_icon.is_none());
    }

    #[test]
    fn test_narrow_layout_leading_icon_with_app_bar() {
        let layout = calculate_layout(Rect::new(0, 0, 60, 20), request(LayoutMode::Narrow));
        assert!(layout.rail.is_none());
        assert_eq!(layout.leading_menu_icon, Some(Rect::new(0, 0, 3, 1)));
        assert!(layout.hamburger.is_none());
        assert_eq!(layout.content.width, 60);
    }

    #[test]
    fn test_narrow_layout_hamburger_without_app_bar() {
        let req = LayoutRequest {
            has_app_bar: false,
            ..request(LayoutMode::Narrow)
        };
        let layout = calculate_layout(Rect::new(0, 0, 60, 20), req);
        assert_eq!(layout.hamburger, Some(Rect::new(0, 0, 3, 1)));
        assert!(layout.app_bar.is_none());
    }

    #[test]
    fn test_open_drawer_overlays_body() {
        let req = LayoutRequest {
            drawer_open: true,
            ..request(LayoutMode::Narrow)
        };
        let layout = calculate_layout(Rect::new(0, 0, 60, 20), req);
        assert_eq!(layout.drawer, Some(Rect::new(0, 1, 30, 18)));
    }

    #[test]
    fn test_compatibility_ignores_status_bar() {
        let layout = calculate_layout(
            Rect::new(0, 0, 80, 24),
            request(LayoutMode::Compatibility),
        );
        assert!(layout.status_bar.is_none());
        assert!(layout.rail.is_none());
        assert!(layout.hamburger.is_none() && layout.leading_menu_icon.is_none());
        assert_eq!(layout.content, Rect::new(0, 1, 80, 23));
    }

    #[test]
    fn test_status_bar_never_swallows_content() {
        let req = LayoutRequest {
            status_height: Some(10),
            ..request(LayoutMode::Narrow)
        };
        let layout = calculate_layout(Rect::new(0, 0, 40, 5), req);
        assert_eq!(layout.content.height, 1);
        assert_eq!(layout.status_bar.map(|r| r.height), Some(3));
    }
}

//! Mouse Input Handler
//!
//! Resolves clicks against the hit regions recorded by the last frame.

use crossterm::event::{MouseButton, MouseEvent, MouseEventKind};

use crate::logic::status_bar::StatusLayout;
use crate::model::ui::HitTarget;
use crate::model::{ScaffoldEvent, ScaffoldState};
use crate::ui::Scaffold;

const SCROLL_STEP: u16 = 4;

pub fn handle_mouse(
    scaffold: &Scaffold,
    state: &mut ScaffoldState,
    mouse: MouseEvent,
) -> Option<ScaffoldEvent> {
    if state.ui.dialog.is_some() {
        return None;
    }

    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => {}
        MouseEventKind::ScrollDown | MouseEventKind::ScrollRight => {
            scroll_status(state, mouse, true);
            return None;
        }
        MouseEventKind::ScrollUp | MouseEventKind::ScrollLeft => {
            scroll_status(state, mouse, false);
            return None;
        }
        _ => return None,
    }

    let target = state.ui.hit_at(mouse.column, mouse.row).cloned();

    // A click outside the popup dismisses it
    if state.ui.overflow.is_some()
        && !matches!(target, Some(HitTarget::OverflowEntry(_)) | Some(HitTarget::OverflowMenu))
    {
        state.ui.overflow = None;
        return None;
    }

    match target? {
        HitTarget::Tab(index) => scaffold.select_tab(state, index),
        HitTarget::Hamburger => scaffold.toggle_drawer(state),
        HitTarget::Action(id) => Some(ScaffoldEvent::ActionPressed(id)),
        HitTarget::ThemeToggle => Some(scaffold.theme_toggle_event()),
        HitTarget::OverflowButton(id) => scaffold.activate_overflow(state, &id),
        HitTarget::OverflowMenu => {
            if state.ui.overflow.is_none() {
                scaffold.open_overflow(state);
            }
            None
        }
        HitTarget::OverflowEntry(index) => {
            let id = state
                .ui
                .overflow
                .as_ref()?
                .entries
                .get(index)?
                .id
                .as_str()
                .to_string();
            scaffold.activate_overflow(state, &id)
        }
        HitTarget::About => scaffold.open_about(state),
        HitTarget::Status(key) => scaffold.status_tap(state, &key),
    }
}

/// Scroll the medium status bar's second row when the pointer is over it
fn scroll_status(state: &mut ScaffoldState, mouse: MouseEvent, forward: bool) {
    let over_status = matches!(
        state.ui.hit_at(mouse.column, mouse.row),
        Some(HitTarget::Status(_))
    );
    let medium = state
        .frame
        .status_bar
        .as_ref()
        .is_some_and(|bar| bar.layout == StatusLayout::Medium);
    if over_status && medium {
        state.ui.status_scroll = if forward {
            state.ui.status_scroll.saturating_add(SCROLL_STEP)
        } else {
            state.ui.status_scroll.saturating_sub(SCROLL_STEP)
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{AppBarConfig, MenuItem, ThemeToggleConfig};
    use crossterm::event::KeyModifiers;
    use ratatui::layout::Rect;
    use ratatui::{backend::TestBackend, Terminal};

    fn click(column: u16, row: u16) -> MouseEvent {
        MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column,
            row,
            modifiers: KeyModifiers::NONE,
        }
    }

    fn center(rect: Rect) -> (u16, u16) {
        (rect.x + rect.width / 2, rect.y + rect.height / 2)
    }

    fn find(state: &ScaffoldState, target: &HitTarget) -> Rect {
        state
            .ui
            .hits
            .iter()
            .find(|(_, t)| t == target)
            .map(|(r, _)| *r)
            .unwrap()
    }

    #[test]
    fn test_click_rail_and_toggle() {
        let scaffold = Scaffold::builder()
            .menu(vec![
                MenuItem::new("a", "Alpha", "α"),
                MenuItem::new("b", "Beta", "β").on_tap("beta"),
            ])
            .app_bar(AppBarConfig::new("App").theme(ThemeToggleConfig::default()))
            .build()
            .unwrap();
        let mut state = ScaffoldState::default();
        let mut terminal = Terminal::new(TestBackend::new(120, 20)).unwrap();
        terminal.draw(|f| scaffold.render(f, &mut state)).unwrap();

        let (x, y) = center(find(&state, &HitTarget::Tab(1)));
        assert_eq!(
            handle_mouse(&scaffold, &mut state, click(x, y)),
            Some(ScaffoldEvent::TabSelected {
                index: 1,
                action: Some("beta".into())
            })
        );

        let (x, y) = center(find(&state, &HitTarget::ThemeToggle));
        assert_eq!(
            handle_mouse(&scaffold, &mut state, click(x, y)),
            Some(ScaffoldEvent::ThemeToggleRequested {
                external_handler: None
            })
        );
    }

    #[test]
    fn test_click_hamburger_opens_drawer() {
        let scaffold = Scaffold::builder()
            .menu(vec![MenuItem::new("a", "Alpha", "α")])
            .build()
            .unwrap();
        let mut state = ScaffoldState::default();
        let mut terminal = Terminal::new(TestBackend::new(50, 20)).unwrap();
        terminal.draw(|f| scaffold.render(f, &mut state)).unwrap();

        let (x, y) = center(find(&state, &HitTarget::Hamburger));
        assert_eq!(
            handle_mouse(&scaffold, &mut state, click(x, y)),
            Some(ScaffoldEvent::DrawerToggled(true))
        );
    }
}

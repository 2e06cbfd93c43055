//! Keyboard Input Handler
//!
//! Routes a key press through the scaffold in priority order: open dialog,
//! content view capturing text, overflow popup, drawer, global shortcuts,
//! and finally the content view.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::logic::app_bar::AppBarSlot;
use crate::logic::ui::wrap_index;
use crate::model::{Dialog, ScaffoldEvent, ScaffoldState, StatusKey};
use crate::ui::Scaffold;

/// Handle a key press. Returns the event the host should act on, if any.
pub fn handle_key(
    scaffold: &Scaffold,
    state: &mut ScaffoldState,
    key: KeyEvent,
) -> Option<ScaffoldEvent> {
    // Dialogs are modal
    if state.ui.dialog.is_some() {
        handle_dialog_key(state, key);
        return None;
    }

    if let Some(view) = scaffold.content_view(state) {
        if view.captures_input() {
            view.handle_key(key);
            return None;
        }
    }

    if state.ui.overflow.is_some() {
        return handle_overflow_key(scaffold, state, key);
    }

    if state.navigation.drawer_open {
        return handle_drawer_key(scaffold, state, key);
    }

    if let Some(event) = handle_global_key(scaffold, state, key) {
        return Some(event);
    }

    if let Some(view) = scaffold.content_view(state) {
        view.handle_key(key);
    }
    None
}

fn handle_dialog_key(state: &mut ScaffoldState, key: KeyEvent) {
    match state.ui.dialog.as_mut() {
        Some(Dialog::KeyPrompt { input, .. }) => match key.code {
            KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => input.push(c),
            KeyCode::Backspace => {
                input.pop();
            }
            KeyCode::Enter => state.ui.submit_key_prompt(),
            KeyCode::Esc => state.ui.close_dialog(),
            _ => {}
        },
        Some(_) => {
            if matches!(key.code, KeyCode::Enter | KeyCode::Esc | KeyCode::Char('q')) {
                state.ui.close_dialog();
            }
        }
        None => {}
    }
}

fn handle_overflow_key(
    scaffold: &Scaffold,
    state: &mut ScaffoldState,
    key: KeyEvent,
) -> Option<ScaffoldEvent> {
    let menu = state.ui.overflow.as_mut()?;
    let len = menu.entries.len();
    match key.code {
        KeyCode::Up | KeyCode::Char('k') => menu.selected = wrap_index(menu.selected, -1, len),
        KeyCode::Down | KeyCode::Char('j') => menu.selected = wrap_index(menu.selected, 1, len),
        KeyCode::Enter => {
            let id = menu.entries.get(menu.selected)?.id.as_str().to_string();
            return scaffold.activate_overflow(state, &id);
        }
        KeyCode::Esc | KeyCode::Char('.') => state.ui.overflow = None,
        _ => {}
    }
    None
}

fn handle_drawer_key(
    scaffold: &Scaffold,
    state: &mut ScaffoldState,
    key: KeyEvent,
) -> Option<ScaffoldEvent> {
    let len = scaffold.menu().len();
    let nav = &mut state.navigation;
    match key.code {
        KeyCode::Up | KeyCode::Char('k') => nav.drawer_cursor = wrap_index(nav.drawer_cursor, -1, len),
        KeyCode::Down | KeyCode::Char('j') => nav.drawer_cursor = wrap_index(nav.drawer_cursor, 1, len),
        KeyCode::Enter if len > 0 => {
            let index = nav.drawer_cursor;
            return scaffold.select_tab(state, index);
        }
        KeyCode::Esc | KeyCode::Char('m') => return scaffold.toggle_drawer(state),
        _ => {}
    }
    None
}

fn handle_global_key(
    scaffold: &Scaffold,
    state: &mut ScaffoldState,
    key: KeyEvent,
) -> Option<ScaffoldEvent> {
    let bar = state.frame.app_bar.clone();
    match key.code {
        KeyCode::Tab => scaffold.cycle_tab(state, 1),
        KeyCode::BackTab => scaffold.cycle_tab(state, -1),
        KeyCode::Char(c @ '1'..='9') => {
            let index = c as usize - '1' as usize;
            scaffold.select_tab(state, index)
        }
        KeyCode::Char('m') => scaffold.toggle_drawer(state),
        KeyCode::Char('.') if bar.as_ref().is_some_and(|b| b.has_overflow_menu()) => {
            scaffold.open_overflow(state);
            None
        }
        KeyCode::Char('t') if bar.as_ref().is_some_and(|b| b.has_theme_toggle()) => {
            Some(scaffold.theme_toggle_event())
        }
        KeyCode::Char('?') if bar.as_ref().is_some_and(|b| b.has_about()) => {
            scaffold.open_about(state)
        }
        KeyCode::Char('K') => scaffold.status_tap(state, &StatusKey::SecurityKey),
        KeyCode::Char('[') => {
            state.ui.status_scroll = state.ui.status_scroll.saturating_sub(4);
            None
        }
        KeyCode::Char(']') => {
            state.ui.status_scroll = state.ui.status_scroll.saturating_add(4);
            None
        }
        KeyCode::Char(c) => bar.and_then(|bar| shortcut_event(scaffold, state, &bar, c)),
        _ => None,
    }
}

/// Match a character against the shortcuts of visible actions and overflow
/// items
fn shortcut_event(
    scaffold: &Scaffold,
    state: &mut ScaffoldState,
    bar: &crate::logic::app_bar::ComposedAppBar,
    c: char,
) -> Option<ScaffoldEvent> {
    let config = scaffold.app_bar_config()?;

    if let Some(action) = config
        .actions
        .iter()
        .find(|a| a.shortcut == Some(c) && bar.has_action(&a.id))
    {
        return Some(ScaffoldEvent::ActionPressed(action.id.clone()));
    }

    let item = config.overflow_items.iter().find(|i| i.shortcut == Some(c))?;
    let visible = bar.slots.iter().any(|slot| match slot {
        AppBarSlot::OverflowButton(entry) => entry.id.as_str() == item.id,
        AppBarSlot::OverflowMenu(entries) => entries.iter().any(|e| e.id.as_str() == item.id),
        _ => false,
    });
    if visible {
        scaffold.activate_overflow(state, &item.id)
    } else {
        None
    }
}

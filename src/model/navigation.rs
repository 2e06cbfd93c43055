//! Navigation Model
//!
//! Selected tab and drawer state.

use std::fmt;

/// Ownership of the selected tab index. Pick one model per scaffold and keep
/// it for the scaffold's lifetime.
pub enum Selection {
    /// The scaffold owns the index and updates it on selection
    Internal(usize),
    /// The host owns the index. Selecting calls `on_select`; the displayed
    /// index only changes when the host calls [`Selection::sync`].
    External {
        index: usize,
        on_select: Box<dyn FnMut(usize) + Send>,
    },
}

impl Selection {
    pub fn external<F>(index: usize, on_select: F) -> Self
    where
        F: FnMut(usize) + Send + 'static,
    {
        Selection::External {
            index,
            on_select: Box::new(on_select),
        }
    }

    pub fn index(&self) -> usize {
        match self {
            Selection::Internal(index) => *index,
            Selection::External { index, .. } => *index,
        }
    }

    pub fn is_external(&self) -> bool {
        matches!(self, Selection::External { .. })
    }

    pub fn select(&mut self, new_index: usize) {
        match self {
            Selection::Internal(index) => *index = new_index,
            Selection::External { on_select, .. } => on_select(new_index),
        }
    }

    /// Push the host-owned index into the scaffold (no-op for internal)
    pub fn sync(&mut self, new_index: usize) {
        if let Selection::External { index, .. } = self {
            *index = new_index;
        }
    }
}

impl Default for Selection {
    fn default() -> Self {
        Selection::Internal(0)
    }
}

impl fmt::Debug for Selection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Selection::Internal(index) => f.debug_tuple("Internal").field(index).finish(),
            Selection::External { index, .. } => {
                f.debug_struct("External").field("index", index).finish()
            }
        }
    }
}

/// Navigation state (selected tab, drawer)
#[derive(Debug, Default)]
pub struct NavigationModel {
    pub selection: Selection,

    /// Drawer visibility (narrow layout only)
    pub drawer_open: bool,

    /// Highlighted row while the drawer is open
    pub drawer_cursor: usize,
}

impl NavigationModel {
    pub fn new(selection: Selection) -> Self {
        Self {
            selection,
            drawer_open: false,
            drawer_cursor: 0,
        }
    }

    pub fn selected_index(&self) -> usize {
        self.selection.index()
    }

    pub fn open_drawer(&mut self) {
        self.drawer_open = true;
        self.drawer_cursor = self.selection.index();
    }

    pub fn close_drawer(&mut self) {
        self.drawer_open = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    #[test]
    fn test_internal_selection_updates_index() {
        let mut selection = Selection::Internal(0);
        selection.select(2);
        assert_eq!(selection.index(), 2);
    }

    #[test]
    fn test_external_selection_delegates_to_owner() {
        let chosen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&chosen);
        let mut selection = Selection::external(0, move |i| sink.lock().unwrap().push(i));

        selection.select(1);
        assert_eq!(selection.index(), 0, "host has not synced yet");
        assert_eq!(*chosen.lock().unwrap(), vec![1]);

        selection.sync(1);
        assert_eq!(selection.index(), 1);
    }

    #[test]
    fn test_open_drawer_starts_at_selected_tab() {
        let mut nav = NavigationModel::new(Selection::Internal(2));
        nav.open_drawer();
        assert!(nav.drawer_open);
        assert_eq!(nav.drawer_cursor, 2);
        nav.close_drawer();
        assert!(!nav.drawer_open);
    }
}

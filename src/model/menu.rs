//! Menu/Tab Model
//!
//! An ordered list of navigation entries. The position of an entry in the
//! list is its tab index.

use std::fmt;
use std::sync::Arc;

use ratatui::style::Color;

use crate::ui::view::View;

/// A single navigation destination
#[derive(Clone)]
pub struct MenuItem {
    pub id: String,
    pub title: String,
    pub icon: String,
    pub color: Option<Color>,
    /// View rendered in the content area while this tab is selected
    pub content: Option<Arc<dyn View>>,
    pub tooltip: Option<String>,
    /// Informational text shown in a dialog when the tab is chosen
    pub message: Option<String>,
    pub dialog_title: Option<String>,
    /// Handler id dispatched when the tab is chosen
    pub on_tap: Option<String>,
}

impl MenuItem {
    pub fn new(id: impl Into<String>, title: impl Into<String>, icon: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            icon: icon.into(),
            color: None,
            content: None,
            tooltip: None,
            message: None,
            dialog_title: None,
            on_tap: None,
        }
    }

    pub fn with_content(mut self, content: Arc<dyn View>) -> Self {
        self.content = Some(content);
        self
    }

    pub fn with_color(mut self, color: Color) -> Self {
        self.color = Some(color);
        self
    }

    pub fn with_tooltip(mut self, tooltip: impl Into<String>) -> Self {
        self.tooltip = Some(tooltip.into());
        self
    }

    pub fn with_message(mut self, dialog_title: impl Into<String>, message: impl Into<String>) -> Self {
        self.dialog_title = Some(dialog_title.into());
        self.message = Some(message.into());
        self
    }

    pub fn on_tap(mut self, handler_id: impl Into<String>) -> Self {
        self.on_tap = Some(handler_id.into());
        self
    }

    /// Icon and title as shown in the rail and the drawer
    pub fn label(&self) -> String {
        if self.icon.is_empty() {
            self.title.clone()
        } else {
            format!("{} {}", self.icon, self.title)
        }
    }
}

impl fmt::Debug for MenuItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MenuItem")
            .field("id", &self.id)
            .field("title", &self.title)
            .field("icon", &self.icon)
            .field("color", &self.color)
            .field("content", &self.content.as_ref().map(|_| "<View>"))
            .field("tooltip", &self.tooltip)
            .field("message", &self.message)
            .field("dialog_title", &self.dialog_title)
            .field("on_tap", &self.on_tap)
            .finish()
    }
}

/// Look up a tab by index; out-of-range indices yield `None`
pub fn item_at(menu: &[MenuItem], index: usize) -> Option<&MenuItem> {
    menu.get(index)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_label_includes_icon() {
        let item = MenuItem::new("home", "Home", "⌂");
        assert_eq!(item.label(), "⌂ Home");
    }

    #[test]
    fn test_label_without_icon() {
        let item = MenuItem::new("home", "Home", "");
        assert_eq!(item.label(), "Home");
    }

    #[test]
    fn test_item_at_out_of_range() {
        let menu = vec![MenuItem::new("a", "A", "")];
        assert!(item_at(&menu, 0).is_some());
        assert!(item_at(&menu, 3).is_none());
    }
}

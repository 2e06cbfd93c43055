//! Status bar composition
//!
//! Chooses a width bucket and orders entries: server info, login status,
//! security key, then custom items by ascending priority.

use crate::model::events::StatusKey;
use crate::model::status_bar::{StatusBarConfig, StatusBarItem, StatusThresholds};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusLayout {
    /// Items stacked vertically
    Narrow,
    /// Server info on its own line, the rest on a scrollable row below
    Medium,
    /// Server info left-aligned, the rest right-aligned on one row
    Wide,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusEntry {
    pub key: StatusKey,
    pub text: String,
    pub tooltip: Option<String>,
    pub on_tap: Option<String>,
    /// Highlight as a warning (logged out, key not saved)
    pub warn: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComposedStatusBar {
    pub layout: StatusLayout,
    pub height: u16,
    pub entries: Vec<StatusEntry>,
}

impl ComposedStatusBar {
    pub fn server_entry(&self) -> Option<&StatusEntry> {
        self.entries.first().filter(|e| e.key == StatusKey::ServerInfo)
    }

    /// Entries after the server info
    pub fn trailing_entries(&self) -> &[StatusEntry] {
        match self.server_entry() {
            Some(_) => &self.entries[1..],
            None => &self.entries,
        }
    }
}

/// Pick the layout for a width
///
/// # Examples
/// ```
/// use solidtui::logic::status_bar::{choose_status_layout, StatusLayout};
/// use solidtui::model::status_bar::StatusThresholds;
///
/// let t = StatusThresholds::default();
/// assert_eq!(choose_status_layout(599, &t), StatusLayout::Narrow);
/// assert_eq!(choose_status_layout(600, &t), StatusLayout::Medium);
/// assert_eq!(choose_status_layout(800, &t), StatusLayout::Medium);
/// assert_eq!(choose_status_layout(801, &t), StatusLayout::Wide);
/// ```
pub fn choose_status_layout(width: u16, thresholds: &StatusThresholds) -> StatusLayout {
    if width < thresholds.narrow {
        StatusLayout::Narrow
    } else if width <= thresholds.medium {
        StatusLayout::Medium
    } else {
        StatusLayout::Wide
    }
}

/// Custom items sorted by ascending priority; ties keep insertion order
pub fn sort_custom_items(items: &[StatusBarItem]) -> Vec<&StatusBarItem> {
    let mut sorted: Vec<&StatusBarItem> = items.iter().collect();
    // sort_by_key is stable
    sorted.sort_by_key(|item| item.priority);
    sorted
}

/// Compose the status bar, or `None` when it is suppressed at this width
pub fn compose_status_bar(config: &StatusBarConfig, width: u16) -> Option<ComposedStatusBar> {
    if width < config.thresholds.narrow && !config.show_on_narrow_screens {
        return None;
    }

    let mut entries = Vec::new();

    if let Some(server) = &config.server_info {
        entries.push(StatusEntry {
            key: StatusKey::ServerInfo,
            text: server.display(),
            tooltip: server.tooltip.clone(),
            on_tap: server.on_tap.clone(),
            warn: false,
        });
    }

    if let Some(login) = &config.login_status {
        entries.push(StatusEntry {
            key: StatusKey::Login,
            text: login.display(),
            tooltip: login.tooltip.clone(),
            on_tap: login.on_tap.clone(),
            warn: login.web_id.is_none(),
        });
    }

    if let Some(key) = &config.security_key_status {
        entries.push(StatusEntry {
            key: StatusKey::SecurityKey,
            text: key.display(),
            tooltip: Some(key.tooltip.clone()),
            on_tap: key.on_tap.clone(),
            warn: !key.is_key_saved,
        });
    }

    for item in sort_custom_items(&config.custom_items) {
        let text = match &item.icon {
            Some(icon) => format!("{} {}", icon, item.text),
            None => item.text.clone(),
        };
        entries.push(StatusEntry {
            key: StatusKey::Custom(item.id.clone()),
            text,
            tooltip: item.tooltip.clone(),
            on_tap: item.on_tap.clone(),
            warn: false,
        });
    }

    let layout = choose_status_layout(width, &config.thresholds);
    let height = match layout {
        StatusLayout::Narrow => config.heights.narrow,
        StatusLayout::Medium => config.heights.medium,
        StatusLayout::Wide => config.heights.wide,
    };

    Some(ComposedStatusBar {
        layout,
        height,
        entries,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::status_bar::{LoginStatus, SecurityKeyStatus, ServerInfo};

    fn keys(bar: &ComposedStatusBar) -> Vec<StatusKey> {
        bar.entries.iter().map(|e| e.key.clone()).collect()
    }

    #[test]
    fn test_custom_items_sorted_by_priority() {
        let config = StatusBarConfig::new()
            .item(StatusBarItem::new("five", "5", 5))
            .item(StatusBarItem::new("one", "1", 1))
            .item(StatusBarItem::new("three", "3", 3));
        let bar = compose_status_bar(&config, 1000).unwrap();
        let texts: Vec<&str> = bar.entries.iter().map(|e| e.text.as_str()).collect();
        assert_eq!(texts, vec!["1", "3", "5"]);
    }

    #[test]
    fn test_equal_priorities_keep_insertion_order() {
        let config = StatusBarConfig::new()
            .item(StatusBarItem::new("b", "b", 2))
            .item(StatusBarItem::new("a", "a", 2))
            .item(StatusBarItem::new("c", "c", 1));
        let bar = compose_status_bar(&config, 1000).unwrap();
        let ids: Vec<StatusKey> = keys(&bar);
        assert_eq!(
            ids,
            vec![
                StatusKey::Custom("c".into()),
                StatusKey::Custom("b".into()),
                StatusKey::Custom("a".into())
            ]
        );
    }

    #[test]
    fn test_fixed_order_of_builtin_entries() {
        let config = StatusBarConfig::new()
            .item(StatusBarItem::new("sync", "Synced", -10))
            .security_key(SecurityKeyStatus::default())
            .login(LoginStatus::logged_out())
            .server(ServerInfo::new("https://pod.example"));
        let bar = compose_status_bar(&config, 1000).unwrap();
        assert_eq!(
            keys(&bar),
            vec![
                StatusKey::ServerInfo,
                StatusKey::Login,
                StatusKey::SecurityKey,
                StatusKey::Custom("sync".into())
            ]
        );
        assert_eq!(bar.server_entry().map(|e| e.key.clone()), Some(StatusKey::ServerInfo));
        assert_eq!(bar.trailing_entries().len(), 3);
    }

    #[test]
    fn test_suppressed_on_narrow_screens() {
        let config = StatusBarConfig::new()
            .server(ServerInfo::new("https://pod.example"))
            .hide_on_narrow_screens();
        assert!(compose_status_bar(&config, 500).is_none());
        assert!(compose_status_bar(&config, 600).is_some());
    }

    #[test]
    fn test_heights_follow_layout() {
        let config = StatusBarConfig::new();
        assert_eq!(compose_status_bar(&config, 400).unwrap().height, 4);
        assert_eq!(compose_status_bar(&config, 700).unwrap().height, 2);
        assert_eq!(compose_status_bar(&config, 1200).unwrap().height, 1);
    }

    #[test]
    fn test_warnings_for_logged_out_and_unsaved_key() {
        let config = StatusBarConfig::new()
            .login(LoginStatus::logged_out())
            .security_key(SecurityKeyStatus::default());
        let bar = compose_status_bar(&config, 1000).unwrap();
        assert!(bar.entries.iter().all(|e| e.warn));
        assert!(bar.server_entry().is_none());
    }
}

//! Status bar configuration

use crate::services::security_key::GateState;

/// Width (logical px) below which the narrow layout is used
pub const DEFAULT_STATUS_NARROW: u16 = 600;

/// Width (logical px) above which the wide layout is used
pub const DEFAULT_STATUS_MEDIUM: u16 = 800;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerInfo {
    pub server_uri: String,
    pub label: Option<String>,
    pub tooltip: Option<String>,
    pub on_tap: Option<String>,
}

impl ServerInfo {
    pub fn new(server_uri: impl Into<String>) -> Self {
        Self {
            server_uri: server_uri.into(),
            label: None,
            tooltip: None,
            on_tap: None,
        }
    }

    pub fn display(&self) -> String {
        match &self.label {
            Some(label) => format!("{}: {}", label, self.server_uri),
            None => format!("Server: {}", self.server_uri),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginStatus {
    pub web_id: Option<String>,
    pub logged_out_text: String,
    pub tooltip: Option<String>,
    pub on_tap: Option<String>,
}

impl LoginStatus {
    pub fn logged_in(web_id: impl Into<String>) -> Self {
        Self {
            web_id: Some(web_id.into()),
            ..Self::logged_out()
        }
    }

    pub fn logged_out() -> Self {
        Self {
            web_id: None,
            logged_out_text: "Not logged in".to_string(),
            tooltip: None,
            on_tap: None,
        }
    }

    pub fn display(&self) -> String {
        match &self.web_id {
            Some(web_id) => format!("Logged in: {}", web_id),
            None => self.logged_out_text.clone(),
        }
    }
}

/// View model mirrored from the security-key gate
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SecurityKeyStatus {
    pub is_key_saved: bool,
    pub title: Option<String>,
    pub tooltip: String,
    pub on_tap: Option<String>,
}

impl Default for SecurityKeyStatus {
    fn default() -> Self {
        Self {
            is_key_saved: false,
            title: None,
            tooltip: "Manage your security key".to_string(),
            on_tap: None,
        }
    }
}

impl SecurityKeyStatus {
    /// Copy with `is_key_saved` taken from the gate's state
    pub fn synced(&self, state: GateState) -> Self {
        Self {
            is_key_saved: state == GateState::Verified,
            ..self.clone()
        }
    }

    pub fn display(&self) -> String {
        let title = self.title.as_deref().unwrap_or("Security key");
        if self.is_key_saved {
            format!("{}: saved", title)
        } else {
            format!("{}: not saved", title)
        }
    }
}

/// A host-defined status entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusBarItem {
    pub id: String,
    pub text: String,
    pub icon: Option<String>,
    /// Lower priorities render first
    pub priority: i32,
    pub tooltip: Option<String>,
    pub on_tap: Option<String>,
}

impl StatusBarItem {
    pub fn new(id: impl Into<String>, text: impl Into<String>, priority: i32) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
            icon: None,
            priority,
            tooltip: None,
            on_tap: None,
        }
    }

    pub fn with_icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = Some(icon.into());
        self
    }

    pub fn on_tap(mut self, handler_id: impl Into<String>) -> Self {
        self.on_tap = Some(handler_id.into());
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusThresholds {
    pub narrow: u16,
    pub medium: u16,
}

impl Default for StatusThresholds {
    fn default() -> Self {
        Self {
            narrow: DEFAULT_STATUS_NARROW,
            medium: DEFAULT_STATUS_MEDIUM,
        }
    }
}

/// Rows used by each layout
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusHeights {
    pub narrow: u16,
    pub medium: u16,
    pub wide: u16,
}

impl Default for StatusHeights {
    fn default() -> Self {
        Self {
            narrow: 4,
            medium: 2,
            wide: 1,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusBarConfig {
    pub server_info: Option<ServerInfo>,
    pub login_status: Option<LoginStatus>,
    pub security_key_status: Option<SecurityKeyStatus>,
    pub custom_items: Vec<StatusBarItem>,
    pub show_on_narrow_screens: bool,
    pub thresholds: StatusThresholds,
    pub heights: StatusHeights,
}

impl Default for StatusBarConfig {
    fn default() -> Self {
        Self {
            server_info: None,
            login_status: None,
            security_key_status: None,
            custom_items: Vec::new(),
            show_on_narrow_screens: true,
            thresholds: StatusThresholds::default(),
            heights: StatusHeights::default(),
        }
    }
}

impl StatusBarConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn server(mut self, info: ServerInfo) -> Self {
        self.server_info = Some(info);
        self
    }

    pub fn login(mut self, status: LoginStatus) -> Self {
        self.login_status = Some(status);
        self
    }

    pub fn security_key(mut self, status: SecurityKeyStatus) -> Self {
        self.security_key_status = Some(status);
        self
    }

    pub fn item(mut self, item: StatusBarItem) -> Self {
        self.custom_items.push(item);
        self
    }

    pub fn hide_on_narrow_screens(mut self) -> Self {
        self.show_on_narrow_screens = false;
        self
    }
}

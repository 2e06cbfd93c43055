//! About dialog and version display configuration

/// Build date stamped by build.rs
pub const BUILD_DATE: &str = env!("SOLIDTUI_BUILD_DATE");

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionConfig {
    pub version: String,
    pub label: Option<String>,
}

impl VersionConfig {
    pub fn new(version: impl Into<String>) -> Self {
        Self {
            version: version.into(),
            label: None,
        }
    }

    /// Text shown in the app bar, e.g. "v1.2.0" or "Beta v1.2.0"
    pub fn display(&self) -> String {
        match &self.label {
            Some(label) => format!("{} v{}", label, self.version),
            None => format!("v{}", self.version),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AboutConfig {
    pub enabled: bool,
    pub app_name: String,
    pub version: Option<String>,
    pub description: Option<String>,
    /// Extra lines rendered below the description (authors, links)
    pub lines: Vec<String>,
    pub icon: String,
    pub hide_on_narrow: bool,
    pub hide_on_very_narrow: bool,
    /// Move the About entry into the overflow menu on very narrow screens
    pub overflow_on_very_narrow: bool,
}

impl AboutConfig {
    pub fn new(app_name: impl Into<String>) -> Self {
        Self {
            enabled: true,
            app_name: app_name.into(),
            version: None,
            description: None,
            lines: Vec::new(),
            icon: "ⓘ".to_string(),
            hide_on_narrow: false,
            hide_on_very_narrow: false,
            overflow_on_very_narrow: true,
        }
    }

    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = Some(version.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn line(mut self, line: impl Into<String>) -> Self {
        self.lines.push(line.into());
        self
    }

    /// Dialog body lines
    pub fn body_lines(&self) -> Vec<String> {
        let mut out = Vec::new();
        match &self.version {
            Some(version) => out.push(format!("{} v{}", self.app_name, version)),
            None => out.push(self.app_name.clone()),
        }
        out.push(format!("Built {}", BUILD_DATE));
        if let Some(description) = &self.description {
            out.push(String::new());
            out.push(description.clone());
        }
        if !self.lines.is_empty() {
            out.push(String::new());
            out.extend(self.lines.iter().cloned());
        }
        out
    }
}

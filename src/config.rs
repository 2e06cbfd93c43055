use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::error::ConfigError;
use crate::logic::layout::DEFAULT_CELL_WIDTH;
use crate::model::app_bar::{Breakpoints, DEFAULT_NARROW_THRESHOLD, DEFAULT_VERY_NARROW_THRESHOLD};
use crate::model::status_bar::{StatusThresholds, DEFAULT_STATUS_MEDIUM, DEFAULT_STATUS_NARROW};

/// Directory name under the platform config dir
pub const CONFIG_DIR_NAME: &str = "solidtui";

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Config {
    /// App bar title
    pub title: String,
    /// Logical pixels per terminal column
    pub cell_width: u16,
    pub narrow_threshold: u16,
    pub very_narrow_threshold: u16,
    pub status_narrow_threshold: u16,
    pub status_medium_threshold: u16,
    pub show_status_on_narrow: bool,
    /// Root directory of the local POD store
    pub pod_root: Option<PathBuf>,
    /// Browser base directory inside the POD
    pub base_dir: String,
    /// Server URL shown in the status bar and used for resource URLs
    pub server_url: Option<String>,
    pub web_id: Option<String>,
    /// Verification key the security key must match; none disables the prompt
    pub verification_key: Option<String>,
    /// Theme preference file; defaults to the platform config dir
    pub preferences_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            title: "SolidTUI".to_string(),
            cell_width: DEFAULT_CELL_WIDTH,
            narrow_threshold: DEFAULT_NARROW_THRESHOLD,
            very_narrow_threshold: DEFAULT_VERY_NARROW_THRESHOLD,
            status_narrow_threshold: DEFAULT_STATUS_NARROW,
            status_medium_threshold: DEFAULT_STATUS_MEDIUM,
            show_status_on_narrow: true,
            pod_root: None,
            base_dir: "solidtui/data".to_string(),
            server_url: None,
            web_id: None,
            verification_key: None,
            preferences_path: None,
        }
    }
}

impl Config {
    /// Parse and validate a YAML config file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_yaml(&text)
    }

    pub fn from_yaml(text: &str) -> Result<Self, ConfigError> {
        // An empty file means all defaults
        if text.trim().is_empty() {
            return Ok(Self::default());
        }
        let config: Config = serde_yaml::from_str(text)?;
        config.breakpoints()?;
        Ok(config)
    }

    pub fn breakpoints(&self) -> Result<Breakpoints, ConfigError> {
        Ok(Breakpoints::new(self.narrow_threshold, self.very_narrow_threshold)?)
    }

    pub fn status_thresholds(&self) -> StatusThresholds {
        StatusThresholds {
            narrow: self.status_narrow_threshold,
            medium: self.status_medium_threshold,
        }
    }

    pub fn pod_root(&self) -> PathBuf {
        self.pod_root
            .clone()
            .unwrap_or_else(|| std::env::temp_dir().join("solidtui-pod"))
    }
}

/// Determine the config file path with fallback logic
///
/// An explicit path must exist. Otherwise `<config_dir>/solidtui/config.yaml`
/// then `./config.yaml` are tried; `None` means run with defaults.
pub fn get_config_path(cli_path: Option<&str>) -> Result<Option<PathBuf>, ConfigError> {
    if let Some(path) = cli_path {
        let p = PathBuf::from(path);
        if p.exists() {
            return Ok(Some(p));
        }
        return Err(ConfigError::NotFound(path.to_string()));
    }

    if let Some(config_dir) = dirs::config_dir() {
        let config_path = config_dir.join(CONFIG_DIR_NAME).join("config.yaml");
        if config_path.exists() {
            return Ok(Some(config_path));
        }
    }

    let local_config = PathBuf::from("config.yaml");
    if local_config.exists() {
        return Ok(Some(local_config));
    }

    Ok(None)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_yaml_keeps_defaults() {
        let config = Config::from_yaml("title: Notes\ncell_width: 10\n").unwrap();
        assert_eq!(config.title, "Notes");
        assert_eq!(config.cell_width, 10);
        assert_eq!(config.narrow_threshold, 800);
        assert!(config.show_status_on_narrow);
    }

    #[test]
    fn test_empty_yaml_is_default() {
        assert_eq!(Config::from_yaml("").unwrap(), Config::default());
    }

    #[test]
    fn test_inverted_thresholds_rejected() {
        let result = Config::from_yaml("narrow_threshold: 500\nvery_narrow_threshold: 700\n");
        assert!(matches!(result, Err(ConfigError::Thresholds(_))));
    }

    #[test]
    fn test_missing_explicit_path_is_error() {
        let result = get_config_path(Some("/definitely/not/here.yaml"));
        assert!(matches!(result, Err(ConfigError::NotFound(_))));
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        std::fs::write(&path, "base_dir: app/files\nweb_id: https://me.example/card#me\n").unwrap();
        let config = Config::load(&path).unwrap();
        assert_eq!(config.base_dir, "app/files");
        assert_eq!(config.web_id.as_deref(), Some("https://me.example/card#me"));
    }
}

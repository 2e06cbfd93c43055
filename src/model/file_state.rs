//! File panel state
//!
//! Replaced wholesale on every operation (struct update syntax) so readers
//! always see a consistent snapshot.

use std::path::PathBuf;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FileState {
    /// Local file chosen for upload
    pub upload_file: Option<PathBuf>,
    /// Local destination of the last download
    pub download_file: Option<PathBuf>,
    /// Remote resource name (with the encrypted suffix)
    pub remote_file_name: Option<String>,
    /// Remote name without the encrypted suffix
    pub clean_file_name: Option<String>,
    /// Current directory relative to the browser's base directory
    pub path: String,
    /// Resource URL of the selected remote file
    pub remote_url: Option<String>,
    /// First lines of the file being uploaded
    pub preview: Option<String>,

    pub uploading: bool,
    pub upload_done: bool,
    pub downloading: bool,
    pub download_done: bool,
    pub deleting: bool,
    pub delete_done: bool,
}

impl FileState {
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            ..Self::default()
        }
    }

    /// Any operation still in flight
    pub fn is_busy(&self) -> bool {
        self.uploading || self.downloading || self.deleting
    }

    pub fn can_upload(&self) -> bool {
        !self.uploading && !self.deleting
    }

    pub fn can_download(&self) -> bool {
        !self.downloading && !self.deleting
    }

    pub fn can_delete(&self) -> bool {
        !self.is_busy()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_state_is_idle() {
        let state = FileState::new("docs");
        assert_eq!(state.path, "docs");
        assert!(!state.is_busy());
        assert!(state.can_upload() && state.can_download() && state.can_delete());
    }

    #[test]
    fn test_flags_disable_conflicting_actions() {
        let state = FileState {
            uploading: true,
            ..FileState::default()
        };
        assert!(state.is_busy());
        assert!(!state.can_upload());
        assert!(state.can_download());
        assert!(!state.can_delete());

        let state = FileState {
            deleting: true,
            ..FileState::default()
        };
        assert!(!state.can_upload());
        assert!(!state.can_download());
    }
}

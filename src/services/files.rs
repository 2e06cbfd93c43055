//! POD file browser flow
//!
//! Upload, download, delete and directory navigation against a
//! [`PodStorage`], tracking progress in a [`FileState`] snapshot that is
//! replaced wholesale on every transition.

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, PoisonError};

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use log::{debug, info, warn};

use super::security_key::SecurityKeyGate;
use super::storage::{ContainerListing, PodStorage};
use crate::error::{FileOpError, StorageError};
use crate::logic::filename::{
    acl_path, clean_file_name, is_text, join_remote_path, parent_path, preview, remote_path,
    resource_url, sanitize_file_name, BINARY_PREFIX,
};
use crate::model::FileState;

/// Lines of an uploaded text file kept for the preview pane
pub const PREVIEW_LINES: usize = 8;

/// Whether bytes can be stored as-is. Text that already starts with the
/// binary marker is not, or it would be decoded on the way back.
fn stores_verbatim(bytes: &[u8]) -> bool {
    is_text(bytes) && !bytes.starts_with(BINARY_PREFIX.as_bytes())
}

/// Encode local bytes for storage: UTF-8 text verbatim, anything else as a
/// base64 data payload
pub fn encode_payload(bytes: &[u8]) -> String {
    if stores_verbatim(bytes) {
        String::from_utf8_lossy(bytes).into_owned()
    } else {
        format!("{}{}", BINARY_PREFIX, STANDARD.encode(bytes))
    }
}

/// Inverse of [`encode_payload`]
pub fn decode_payload(content: &str) -> Result<Vec<u8>, FileOpError> {
    match content.strip_prefix(BINARY_PREFIX) {
        Some(encoded) => Ok(STANDARD.decode(encoded.trim())?),
        None => Ok(content.as_bytes().to_vec()),
    }
}

#[derive(Clone)]
pub struct FileBrowser {
    storage: Arc<dyn PodStorage>,
    gate: Option<SecurityKeyGate>,
    base_dir: String,
    state: Arc<Mutex<FileState>>,
    listing: Arc<Mutex<ContainerListing>>,
}

impl FileBrowser {
    pub fn new(storage: Arc<dyn PodStorage>, base_dir: impl Into<String>) -> Self {
        Self {
            storage,
            gate: None,
            base_dir: base_dir.into(),
            state: Arc::new(Mutex::new(FileState::default())),
            listing: Arc::new(Mutex::new(ContainerListing::default())),
        }
    }

    /// Require the security key before encrypted reads and writes
    pub fn with_gate(mut self, gate: SecurityKeyGate) -> Self {
        self.gate = Some(gate);
        self
    }

    pub fn base_dir(&self) -> &str {
        &self.base_dir
    }

    pub fn state(&self) -> FileState {
        self.state.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }

    pub fn listing(&self) -> ContainerListing {
        self.listing.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }

    /// Remote path of the directory being shown
    pub fn current_dir(&self) -> String {
        join_remote_path(&[&self.base_dir, &self.state().path])
    }

    fn update(&self, f: impl FnOnce(&FileState) -> FileState) {
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        *state = f(&state);
    }

    /// Atomically check `allowed` and apply `start`, or report `Busy`
    fn begin(
        &self,
        allowed: impl FnOnce(&FileState) -> bool,
        start: impl FnOnce(&FileState) -> FileState,
    ) -> Result<(), FileOpError> {
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        if !allowed(&state) {
            return Err(FileOpError::Busy);
        }
        *state = start(&state);
        Ok(())
    }

    async fn require_key(&self) -> Result<(), FileOpError> {
        match &self.gate {
            Some(gate) if !gate.ensure_key().await => Err(FileOpError::KeyRequired),
            _ => Ok(()),
        }
    }

    async fn list(&self, sub_path: &str) -> Result<ContainerListing, FileOpError> {
        let dir = join_remote_path(&[&self.base_dir, sub_path]);
        let mut listing = self.storage.list_container(&dir).await?;
        listing.sort();
        Ok(listing)
    }

    /// Reload the current directory
    pub async fn refresh(&self) -> Result<ContainerListing, FileOpError> {
        let path = self.state().path;
        let listing = self.list(&path).await?;
        *self.listing.lock().unwrap_or_else(PoisonError::into_inner) = listing.clone();
        debug!("listed {} ({} files)", path, listing.files.len());
        Ok(listing)
    }

    /// Descend into a subdirectory of the current directory
    pub async fn enter_directory(&self, name: &str) -> Result<(), FileOpError> {
        let name = name.trim_matches('/');
        if name.is_empty() || name == "." || name == ".." || name.contains('/') {
            return Err(FileOpError::InvalidName(name.to_string()));
        }
        let target = join_remote_path(&[&self.state().path, name]);
        let listing = self.list(&target).await?;

        *self.listing.lock().unwrap_or_else(PoisonError::into_inner) = listing;
        self.update(|s| FileState {
            path: target,
            ..s.clone()
        });
        Ok(())
    }

    /// Move to the parent directory. Returns false at the base directory.
    pub async fn go_up(&self) -> Result<bool, FileOpError> {
        let current = self.state().path;
        if current.is_empty() {
            return Ok(false);
        }
        let target = parent_path(&current);
        let listing = self.list(&target).await?;

        *self.listing.lock().unwrap_or_else(PoisonError::into_inner) = listing;
        self.update(|s| FileState {
            path: target,
            ..s.clone()
        });
        Ok(true)
    }

    /// Upload a local file into the current directory. `target_name`
    /// overrides the local file name. Returns the remote path written.
    pub async fn upload(
        &self,
        local: &Path,
        target_name: Option<&str>,
    ) -> Result<String, FileOpError> {
        let requested = match target_name {
            Some(name) => name.to_string(),
            None => local
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default(),
        };
        let remote_name =
            sanitize_file_name(&requested).ok_or(FileOpError::InvalidName(requested))?;

        let bytes = tokio::fs::read(local).await?;
        let payload = encode_payload(&bytes);
        let text_preview = stores_verbatim(&bytes).then(|| preview(&payload, PREVIEW_LINES));

        let sub_path = self.state().path;
        let path = remote_path(&self.base_dir, &sub_path, &remote_name);
        let url = self.storage.server_url().map(|server| resource_url(&server, &path));

        self.begin(FileState::can_upload, |s| FileState {
            upload_file: Some(local.to_path_buf()),
            clean_file_name: Some(clean_file_name(&remote_name).to_string()),
            remote_file_name: Some(remote_name.clone()),
            remote_url: url,
            preview: text_preview,
            uploading: true,
            upload_done: false,
            ..s.clone()
        })?;

        let result = self.write_remote(&path, &payload).await;
        self.update(|s| FileState {
            uploading: false,
            upload_done: result.is_ok(),
            ..s.clone()
        });

        match result {
            Ok(()) => {
                info!("uploaded {} to {}", local.display(), path);
                if let Err(e) = self.refresh().await {
                    warn!("listing refresh after upload failed: {}", e);
                }
                Ok(path)
            }
            Err(e) => {
                warn!("upload of {} failed: {}", local.display(), e);
                Err(e)
            }
        }
    }

    async fn write_remote(&self, path: &str, payload: &str) -> Result<(), FileOpError> {
        self.require_key().await?;
        self.storage.write(path, payload, true).await?;
        Ok(())
    }

    /// Download a file of the current directory to `dest`. A directory
    /// destination receives the file under its clean name.
    pub async fn download(&self, remote_name: &str, dest: &Path) -> Result<PathBuf, FileOpError> {
        let sub_path = self.state().path;
        let path = remote_path(&self.base_dir, &sub_path, remote_name);
        let clean = clean_file_name(remote_name).to_string();
        let target = if dest.is_dir() {
            dest.join(&clean)
        } else {
            dest.to_path_buf()
        };

        self.begin(FileState::can_download, |s| FileState {
            download_file: Some(target.clone()),
            remote_file_name: Some(remote_name.to_string()),
            clean_file_name: Some(clean.clone()),
            downloading: true,
            download_done: false,
            ..s.clone()
        })?;

        let result = self.read_to_local(&path, &target).await;
        self.update(|s| FileState {
            downloading: false,
            download_done: result.is_ok(),
            ..s.clone()
        });

        match &result {
            Ok(()) => info!("downloaded {} to {}", path, target.display()),
            Err(e) => warn!("download of {} failed: {}", path, e),
        }
        result.map(|()| target)
    }

    async fn read_to_local(&self, path: &str, target: &Path) -> Result<(), FileOpError> {
        self.require_key().await?;
        let content = self.storage.read(path).await?;
        let bytes = decode_payload(&content)?;
        if let Some(parent) = target.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await?;
            }
        }
        tokio::fs::write(target, bytes).await?;
        Ok(())
    }

    /// Delete a file of the current directory and its `.acl` companion
    pub async fn delete(&self, remote_name: &str) -> Result<(), FileOpError> {
        let sub_path = self.state().path;
        let path = remote_path(&self.base_dir, &sub_path, remote_name);

        self.begin(FileState::can_delete, |s| FileState {
            remote_file_name: Some(remote_name.to_string()),
            clean_file_name: Some(clean_file_name(remote_name).to_string()),
            deleting: true,
            delete_done: false,
            ..s.clone()
        })?;

        let result = self.delete_remote(&path).await;
        self.update(|s| FileState {
            deleting: false,
            delete_done: result.is_ok(),
            ..s.clone()
        });

        match result {
            Ok(()) => {
                info!("deleted {}", path);
                if let Err(e) = self.refresh().await {
                    warn!("listing refresh after delete failed: {}", e);
                }
                Ok(())
            }
            Err(e) => {
                warn!("delete of {} failed: {}", path, e);
                Err(e)
            }
        }
    }

    async fn delete_remote(&self, path: &str) -> Result<(), FileOpError> {
        self.storage.delete(path).await?;

        let companion = acl_path(path);
        match self.storage.delete(&companion).await {
            Ok(()) => debug!("deleted companion {}", companion),
            Err(StorageError::NotFound(_)) => debug!("no companion at {}", companion),
            Err(e) => warn!("could not delete companion {}: {}", companion, e),
        }
        Ok(())
    }
}

impl std::fmt::Debug for FileBrowser {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FileBrowser")
            .field("base_dir", &self.base_dir)
            .field("state", &self.state())
            .finish()
    }
}

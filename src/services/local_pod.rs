//! Filesystem-backed POD storage
//!
//! Lays resources out under a root directory. Every written resource gets an
//! empty `.acl` companion, mirroring how a POD server creates access-control
//! documents. Encryption is not performed here; the flag is only logged.

use std::io;
use std::path::{Component, Path, PathBuf};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use log::debug;

use super::storage::{ContainerListing, PodEntry, PodStorage};
use crate::error::StorageError;
use crate::logic::filename::{acl_path, is_acl};

#[derive(Debug, Clone)]
pub struct LocalPodStorage {
    root: PathBuf,
    server_url: Option<String>,
}

impl LocalPodStorage {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            server_url: None,
        }
    }

    pub fn with_server_url(mut self, url: impl Into<String>) -> Self {
        self.server_url = Some(url.into());
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Map a relative resource path onto the root, refusing escapes
    fn resolve(&self, path: &str) -> Result<PathBuf, StorageError> {
        let relative = Path::new(path.trim_start_matches('/'));
        let mut resolved = self.root.clone();
        for component in relative.components() {
            match component {
                Component::Normal(part) => resolved.push(part),
                Component::CurDir => {}
                _ => return Err(StorageError::PermissionDenied(path.to_string())),
            }
        }
        Ok(resolved)
    }
}

fn map_io(path: &str, err: io::Error) -> StorageError {
    match err.kind() {
        io::ErrorKind::NotFound => StorageError::NotFound(path.to_string()),
        io::ErrorKind::PermissionDenied => StorageError::PermissionDenied(path.to_string()),
        _ => StorageError::Other(format!("{}: {}", path, err)),
    }
}

#[async_trait]
impl PodStorage for LocalPodStorage {
    async fn read(&self, path: &str) -> Result<String, StorageError> {
        let file = self.resolve(path)?;
        tokio::fs::read_to_string(&file)
            .await
            .map_err(|e| map_io(path, e))
    }

    async fn write(&self, path: &str, content: &str, encrypted: bool) -> Result<(), StorageError> {
        let file = self.resolve(path)?;
        if let Some(parent) = file.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| map_io(path, e))?;
        }
        tokio::fs::write(&file, content)
            .await
            .map_err(|e| map_io(path, e))?;

        let acl = self.resolve(&acl_path(path))?;
        tokio::fs::write(&acl, "")
            .await
            .map_err(|e| map_io(path, e))?;

        debug!("wrote {} ({} bytes, encrypted={})", path, content.len(), encrypted);
        Ok(())
    }

    async fn delete(&self, path: &str) -> Result<(), StorageError> {
        let file = self.resolve(path)?;
        tokio::fs::remove_file(&file)
            .await
            .map_err(|e| map_io(path, e))
    }

    async fn list_container(&self, path: &str) -> Result<ContainerListing, StorageError> {
        let dir = self.resolve(path)?;
        let mut entries = tokio::fs::read_dir(&dir)
            .await
            .map_err(|e| map_io(path, e))?;

        let mut listing = ContainerListing::default();
        while let Some(entry) = entries.next_entry().await.map_err(|e| map_io(path, e))? {
            let name = entry.file_name().to_string_lossy().into_owned();
            let meta = entry.metadata().await.map_err(|e| map_io(path, e))?;
            if meta.is_dir() {
                listing.subdirectories.push(name);
            } else if !is_acl(&name) {
                listing.files.push(PodEntry {
                    name,
                    size: Some(meta.len()),
                    modified: meta.modified().ok().map(DateTime::<Utc>::from),
                });
            }
        }
        listing.sort();
        Ok(listing)
    }

    fn server_url(&self) -> Option<String> {
        self.server_url.clone()
    }
}

//! POD storage seam
//!
//! The file browser only talks to storage through [`PodStorage`]. Paths are
//! relative to the POD's application root and use `/` separators.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::error::StorageError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PodEntry {
    pub name: String,
    pub size: Option<u64>,
    pub modified: Option<DateTime<Utc>>,
}

/// Contents of one container (directory)
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContainerListing {
    pub files: Vec<PodEntry>,
    pub subdirectories: Vec<String>,
}

impl ContainerListing {
    /// Directories first, then files, each by name
    pub fn sort(&mut self) {
        self.subdirectories.sort();
        self.files.sort_by(|a, b| a.name.cmp(&b.name));
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty() && self.subdirectories.is_empty()
    }
}

#[async_trait]
pub trait PodStorage: Send + Sync {
    /// Read a resource. Encrypted resources are decrypted by the backend.
    async fn read(&self, path: &str) -> Result<String, StorageError>;

    /// Create or replace a resource, encrypting it when `encrypted` is set
    async fn write(&self, path: &str, content: &str, encrypted: bool) -> Result<(), StorageError>;

    async fn delete(&self, path: &str) -> Result<(), StorageError>;

    async fn list_container(&self, path: &str) -> Result<ContainerListing, StorageError>;

    /// Base URL shown for resources, if the backend has one
    fn server_url(&self) -> Option<String> {
        None
    }
}

//! Integration tests for the POD file browser flow
//!
//! These tests drive `FileBrowser` against an in-memory POD and a
//! filesystem-backed one:
//! 1. Deleting a file whose `.acl` companion is missing still succeeds
//! 2. Binary files survive an upload/download round trip
//! 3. Encrypted writes wait for the security key
//! 4. Navigation and uploads respect the current subdirectory
//! 5. Storage failures on upload and download clear the busy flags and map to
//!    user-facing messages

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use solidtui::error::{FileOpError, KeyError, StorageError};
use solidtui::logic::errors::format_error_message;
use solidtui::logic::filename::BINARY_PREFIX;
use solidtui::services::{
    ContainerListing, FileBrowser, KeyManager, KeyPrompt, LocalPodStorage, MemoryKeyManager,
    PodEntry, PodStorage, SecurityKeyGate,
};

/// In-memory POD. `acl_delete_error` replaces the outcome of deleting any
/// `.acl` resource; `write_error` and `read_error` fail every write or read.
#[derive(Default)]
struct MemoryPod {
    resources: Mutex<BTreeMap<String, String>>,
    acl_delete_error: Option<StorageError>,
    write_error: Option<StorageError>,
    read_error: Option<StorageError>,
}

impl MemoryPod {
    fn with_acl_delete_error(error: StorageError) -> Self {
        Self {
            acl_delete_error: Some(error),
            ..Self::default()
        }
    }

    fn failing(write_error: Option<StorageError>, read_error: Option<StorageError>) -> Self {
        Self {
            write_error,
            read_error,
            ..Self::default()
        }
    }

    fn contains(&self, path: &str) -> bool {
        self.resources.lock().unwrap().contains_key(path)
    }

    fn insert(&self, path: &str, content: &str) {
        self.resources
            .lock()
            .unwrap()
            .insert(path.to_string(), content.to_string());
    }
}

#[async_trait]
impl PodStorage for MemoryPod {
    async fn read(&self, path: &str) -> Result<String, StorageError> {
        if let Some(error) = &self.read_error {
            return Err(error.clone());
        }
        self.resources
            .lock()
            .unwrap()
            .get(path)
            .cloned()
            .ok_or_else(|| StorageError::NotFound(path.to_string()))
    }

    async fn write(&self, path: &str, content: &str, _encrypted: bool) -> Result<(), StorageError> {
        if let Some(error) = &self.write_error {
            return Err(error.clone());
        }
        // No companion is created, like a server without per-resource ACLs
        self.insert(path, content);
        Ok(())
    }

    async fn delete(&self, path: &str) -> Result<(), StorageError> {
        if path.ends_with(".acl") {
            if let Some(error) = &self.acl_delete_error {
                return Err(error.clone());
            }
        }
        self.resources
            .lock()
            .unwrap()
            .remove(path)
            .map(|_| ())
            .ok_or_else(|| StorageError::NotFound(path.to_string()))
    }

    async fn list_container(&self, path: &str) -> Result<ContainerListing, StorageError> {
        let prefix = format!("{}/", path.trim_end_matches('/'));
        let mut listing = ContainerListing::default();
        for (key, content) in self.resources.lock().unwrap().iter() {
            let Some(rest) = key.strip_prefix(&prefix) else {
                continue;
            };
            match rest.split_once('/') {
                Some((dir, _)) => {
                    if !listing.subdirectories.iter().any(|d| d == dir) {
                        listing.subdirectories.push(dir.to_string());
                    }
                }
                None => listing.files.push(PodEntry {
                    name: rest.to_string(),
                    size: Some(content.len() as u64),
                    modified: None,
                }),
            }
        }
        Ok(listing)
    }
}

fn write_local(dir: &tempfile::TempDir, name: &str, bytes: &[u8]) -> std::path::PathBuf {
    let path = dir.path().join(name);
    std::fs::write(&path, bytes).unwrap();
    path
}

/// Test: A missing `.acl` companion does not turn a delete into a failure
#[tokio::test]
async fn test_delete_with_missing_companion_succeeds() {
    let pod = Arc::new(MemoryPod::with_acl_delete_error(StorageError::NotFound(
        "acl".into(),
    )));
    pod.insert("app/data/report.enc.ttl", "quarterly numbers");
    let files = FileBrowser::new(pod.clone(), "app/data");
    files.refresh().await.unwrap();

    files.delete("report.enc.ttl").await.unwrap();

    let state = files.state();
    assert!(state.delete_done);
    assert!(!state.deleting);
    assert_eq!(state.clean_file_name.as_deref(), Some("report"));
    assert!(!pod.contains("app/data/report.enc.ttl"));
    assert!(files.listing().files.is_empty(), "listing refreshed after delete");
}

/// Test: Other companion failures are logged, not reported
#[tokio::test]
async fn test_companion_permission_error_is_not_fatal() {
    let pod = Arc::new(MemoryPod::with_acl_delete_error(
        StorageError::PermissionDenied("acl".into()),
    ));
    pod.insert("app/data/a.enc.ttl", "a");
    let files = FileBrowser::new(pod.clone(), "app/data");

    assert!(files.delete("a.enc.ttl").await.is_ok());
    assert!(files.state().delete_done);
}

/// Test: Failing to delete the file itself is reported
#[tokio::test]
async fn test_missing_primary_resource_fails_delete() {
    let pod = Arc::new(MemoryPod::default());
    let files = FileBrowser::new(pod, "app/data");

    let result = files.delete("ghost.enc.ttl").await;
    assert!(matches!(
        result,
        Err(FileOpError::Storage(StorageError::NotFound(_)))
    ));
    let state = files.state();
    assert!(!state.delete_done);
    assert!(!state.deleting, "flag is cleared on failure");
}

/// Test: Binary content is stored as a data payload and restored on download
#[tokio::test]
async fn test_binary_round_trip_through_local_pod() {
    let pod_dir = tempfile::tempdir().unwrap();
    let local = tempfile::tempdir().unwrap();
    let downloads = tempfile::tempdir().unwrap();

    let bytes: Vec<u8> = (0..=255u8).collect();
    let source = write_local(&local, "image.png", &bytes);

    let storage = LocalPodStorage::new(pod_dir.path()).with_server_url("https://pod.example");
    let files = FileBrowser::new(Arc::new(storage), "app/data");

    let remote = files.upload(&source, None).await.unwrap();
    assert_eq!(remote, "app/data/image.png.enc.ttl");

    let state = files.state();
    assert!(state.preview.is_none(), "binary uploads have no preview");
    assert_eq!(
        state.remote_url.as_deref(),
        Some("https://pod.example/app/data/image.png.enc.ttl")
    );

    let stored = std::fs::read_to_string(pod_dir.path().join(&remote)).unwrap();
    assert!(stored.starts_with(BINARY_PREFIX));

    // A directory destination receives the clean name
    let target = files
        .download("image.png.enc.ttl", downloads.path())
        .await
        .unwrap();
    assert_eq!(target, downloads.path().join("image.png"));
    assert_eq!(std::fs::read(&target).unwrap(), bytes);
    assert!(files.state().download_done);
}

/// Test: Upload with an explicit target name keeps the listing in sync
#[tokio::test]
async fn test_upload_with_target_name_updates_listing() {
    let pod_dir = tempfile::tempdir().unwrap();
    let local = tempfile::tempdir().unwrap();
    let source = write_local(&local, "draft.md", b"# Title\n\nbody");

    let files = FileBrowser::new(Arc::new(LocalPodStorage::new(pod_dir.path())), "notes");
    files.upload(&source, Some("final version.md")).await.unwrap();

    let names: Vec<String> = files.listing().files.into_iter().map(|f| f.name).collect();
    assert_eq!(names, vec!["final_version.md.enc.ttl"]);
    assert_eq!(files.state().preview.as_deref(), Some("# Title\n\nbody"));
}

/// Prompt that always cancels
struct CancelPrompt;

#[async_trait]
impl KeyPrompt for CancelPrompt {
    async fn collect_key(&self, _error: Option<String>) -> Result<String, KeyError> {
        Err(KeyError::Cancelled)
    }
}

/// Test: Without the security key nothing is written
#[tokio::test]
async fn test_upload_requires_security_key() {
    let local = tempfile::tempdir().unwrap();
    let source = write_local(&local, "secret.txt", b"classified");

    let pod = Arc::new(MemoryPod::default());
    let gate = SecurityKeyGate::new(
        Arc::new(MemoryKeyManager::new(Some("passphrase".into()))),
        Arc::new(CancelPrompt),
    );
    let files = FileBrowser::new(pod.clone(), "app/data").with_gate(gate);

    let result = files.upload(&source, None).await;
    assert!(matches!(result, Err(FileOpError::KeyRequired)));
    assert!(!pod.contains("app/data/secret.txt.enc.ttl"));

    let state = files.state();
    assert!(!state.uploading);
    assert!(!state.upload_done);
}

/// Test: A key already loaded lets the upload through without prompting
#[tokio::test]
async fn test_upload_with_loaded_key() {
    let local = tempfile::tempdir().unwrap();
    let source = write_local(&local, "ok.txt", b"fine");

    let keys = Arc::new(MemoryKeyManager::new(Some("passphrase".into())));
    keys.init_keys("passphrase").await.unwrap();
    let gate = SecurityKeyGate::new(keys, Arc::new(CancelPrompt));

    let pod = Arc::new(MemoryPod::default());
    let files = FileBrowser::new(pod.clone(), "app/data").with_gate(gate);
    files.upload(&source, None).await.unwrap();
    assert!(pod.contains("app/data/ok.txt.enc.ttl"));
}

/// Test: Uploads land in the current subdirectory
#[tokio::test]
async fn test_navigation_scopes_uploads() {
    let local = tempfile::tempdir().unwrap();
    let source = write_local(&local, "minutes.txt", b"agenda");

    let pod = Arc::new(MemoryPod::default());
    pod.insert("app/data/meetings/old.enc.ttl", "old");
    let files = FileBrowser::new(pod.clone(), "app/data");

    let listing = files.refresh().await.unwrap();
    assert_eq!(listing.subdirectories, vec!["meetings"]);

    files.enter_directory("meetings").await.unwrap();
    assert_eq!(files.state().path, "meetings");

    let remote = files.upload(&source, None).await.unwrap();
    assert_eq!(remote, "app/data/meetings/minutes.txt.enc.ttl");
    assert_eq!(files.listing().files.len(), 2);

    assert!(files.go_up().await.unwrap());
    assert_eq!(files.current_dir(), "app/data");
    assert!(!files.go_up().await.unwrap());
}

/// Test: A write rejected because the session ended clears the upload flags
/// and asks the user to log in again
#[tokio::test]
async fn test_upload_storage_failure_reports_login() {
    let local = tempfile::tempdir().unwrap();
    let source = write_local(&local, "notes.txt", b"draft");

    let pod = Arc::new(MemoryPod::failing(Some(StorageError::NotLoggedIn), None));
    let files = FileBrowser::new(pod.clone(), "app/data");

    let error = files.upload(&source, None).await.unwrap_err();
    assert!(matches!(
        error,
        FileOpError::Storage(StorageError::NotLoggedIn)
    ));
    assert!(format_error_message(&error).contains("not logged in"));

    let state = files.state();
    assert!(!state.uploading);
    assert!(!state.upload_done);
    assert!(!pod.contains("app/data/notes.txt.enc.ttl"));

    // The flow is not left busy: a retry is attempted, not rejected
    let retry = files.upload(&source, None).await.unwrap_err();
    assert!(!matches!(retry, FileOpError::Busy));
}

/// Test: A network failure on read clears the download flags and writes nothing
#[tokio::test]
async fn test_download_network_failure_reports_unreachable() {
    let downloads = tempfile::tempdir().unwrap();

    let pod = Arc::new(MemoryPod::failing(
        None,
        Some(StorageError::Network("connection reset".into())),
    ));
    pod.insert("app/data/report.enc.ttl", "quarterly numbers");
    let files = FileBrowser::new(pod, "app/data");

    let error = files
        .download("report.enc.ttl", downloads.path())
        .await
        .unwrap_err();
    assert!(matches!(
        error,
        FileOpError::Storage(StorageError::Network(_))
    ));
    assert!(format_error_message(&error).starts_with("Could not reach your POD"));

    let state = files.state();
    assert!(!state.downloading);
    assert!(!state.download_done);
    assert!(!downloads.path().join("report").exists());
}

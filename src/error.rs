//! Error types shared across the library
//!
//! Storage and key errors come from external collaborators and are always
//! converted to a visible message at the nearest UI boundary.

use thiserror::Error;

/// Failure reported by a POD storage backend
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum StorageError {
    /// The session is not authenticated; the user has to log in again
    #[error("not logged in")]
    NotLoggedIn,

    #[error("resource not found: {0}")]
    NotFound(String),

    #[error("permission denied: {0}")]
    PermissionDenied(String),

    #[error("network error: {0}")]
    Network(String),

    #[error("{0}")]
    Other(String),
}

/// Failure reported by the key manager or the passphrase prompt
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum KeyError {
    /// The passphrase does not match the stored verification key
    #[error("security key does not match the verification key")]
    Mismatch,

    /// The user dismissed the prompt
    #[error("security key prompt was cancelled")]
    Cancelled,

    #[error("key storage error: {0}")]
    Storage(String),
}

/// Invalid scaffold or app bar construction
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ScaffoldError {
    #[error("both `{0}` and `{1}` were supplied; pick one")]
    ConflictingFields(&'static str, &'static str),

    #[error("very narrow threshold {very_narrow} exceeds narrow threshold {narrow}")]
    InvalidThresholds { narrow: u16, very_narrow: u16 },
}

/// Failure of a file browser operation
#[derive(Debug, Error)]
pub enum FileOpError {
    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error("a security key is required for this operation")]
    KeyRequired,

    #[error("another file operation is still in progress")]
    Busy,

    #[error("invalid file name: {0}")]
    InvalidName(String),

    #[error("local file error: {0}")]
    Io(#[from] std::io::Error),

    #[error("could not decode downloaded content: {0}")]
    Decode(#[from] base64::DecodeError),
}

/// Failure loading the YAML configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config file not found at {0}")]
    NotFound(String),

    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_yaml::Error),

    #[error(transparent)]
    Thresholds(#[from] ScaffoldError),
}

/// Failure reading or writing persisted preferences
#[derive(Debug, Error)]
pub enum PreferenceError {
    #[error("preference file error: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed preference file: {0}")]
    Parse(#[from] serde_json::Error),
}

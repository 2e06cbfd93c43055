use crate::error::{FileOpError, KeyError, StorageError};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ErrorType {
    NotLoggedIn,
    NotFound,
    PermissionDenied,
    NetworkError,
    KeyRequired,
    LocalIo,
    Other,
}

/// Classify a storage failure
pub fn classify_storage_error(error: &StorageError) -> ErrorType {
    match error {
        StorageError::NotLoggedIn => ErrorType::NotLoggedIn,
        StorageError::NotFound(_) => ErrorType::NotFound,
        StorageError::PermissionDenied(_) => ErrorType::PermissionDenied,
        StorageError::Network(_) => ErrorType::NetworkError,
        StorageError::Other(msg) => {
            // Backends that only hand back text still get sorted where possible
            let msg = msg.to_lowercase();
            if msg.contains("not logged in") {
                ErrorType::NotLoggedIn
            } else if msg.contains("404") || msg.contains("not found") {
                ErrorType::NotFound
            } else if msg.contains("403") || msg.contains("forbidden") {
                ErrorType::PermissionDenied
            } else if msg.contains("timed out") || msg.contains("connection") {
                ErrorType::NetworkError
            } else {
                ErrorType::Other
            }
        }
    }
}

/// Classify a file operation failure
pub fn classify_error(error: &FileOpError) -> ErrorType {
    match error {
        FileOpError::Storage(e) => classify_storage_error(e),
        FileOpError::KeyRequired => ErrorType::KeyRequired,
        FileOpError::Io(_) | FileOpError::Decode(_) => ErrorType::LocalIo,
        FileOpError::Busy | FileOpError::InvalidName(_) => ErrorType::Other,
    }
}

/// Human-readable alert text for a failed file operation
pub fn format_error_message(error: &FileOpError) -> String {
    match classify_error(error) {
        ErrorType::NotLoggedIn => {
            "You are not logged in. Log in to your POD and try again.".to_string()
        }
        ErrorType::NotFound => "The file no longer exists on your POD.".to_string(),
        ErrorType::PermissionDenied => {
            "You do not have permission to access this file.".to_string()
        }
        ErrorType::NetworkError => format!("Could not reach your POD: {}", error),
        ErrorType::KeyRequired => {
            "Your security key is needed to read or write encrypted files.".to_string()
        }
        ErrorType::LocalIo | ErrorType::Other => error.to_string(),
    }
}

/// Inline text for a failed key entry
pub fn format_key_error(error: &KeyError) -> String {
    match error {
        KeyError::Mismatch => "Incorrect security key, please try again.".to_string(),
        KeyError::Cancelled => "Security key entry cancelled.".to_string(),
        KeyError::Storage(msg) => format!("Could not store the security key: {}", msg),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_typed_errors() {
        assert_eq!(
            classify_storage_error(&StorageError::NotLoggedIn),
            ErrorType::NotLoggedIn
        );
        assert_eq!(
            classify_storage_error(&StorageError::NotFound("a".into())),
            ErrorType::NotFound
        );
    }

    #[test]
    fn test_classify_textual_errors() {
        assert_eq!(
            classify_storage_error(&StorageError::Other("HTTP 404 Not Found".into())),
            ErrorType::NotFound
        );
        assert_eq!(
            classify_storage_error(&StorageError::Other("403 Forbidden".into())),
            ErrorType::PermissionDenied
        );
        assert_eq!(
            classify_storage_error(&StorageError::Other("request timed out".into())),
            ErrorType::NetworkError
        );
        assert_eq!(
            classify_storage_error(&StorageError::Other("weird".into())),
            ErrorType::Other
        );
    }

    #[test]
    fn test_not_logged_in_message_asks_for_login() {
        let err = FileOpError::Storage(StorageError::NotLoggedIn);
        assert!(format_error_message(&err).contains("not logged in"));
    }

    #[test]
    fn test_key_required_message() {
        assert!(format_error_message(&FileOpError::KeyRequired).contains("security key"));
    }

    #[test]
    fn test_other_errors_show_raw_text() {
        let err = FileOpError::InvalidName("???".into());
        assert_eq!(format_error_message(&err), "invalid file name: ???");
    }
}

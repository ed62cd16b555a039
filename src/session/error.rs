//! Session-specific error types.

use std::path::PathBuf;

/// Errors that can occur while loading or saving the session.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    /// File path was not set
    #[error("Session file path not set")]
    FilePathNotSet,

    /// Failed to find home directory
    #[error("Failed to find home directory")]
    HomeDirectoryNotFound,

    /// Failed to load session file
    #[error("Failed to load session from {path}: {message}")]
    LoadFailed { path: PathBuf, message: String },

    /// Failed to save session file
    #[error("Failed to save session to {path}: {source}")]
    SaveFailed {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Failed to create session directory
    #[error("Failed to create session directory {path}: {source}")]
    CreateDirectoryFailed {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Failed to serialize session
    #[error("Failed to serialize session: {0}")]
    SerializationFailed(String),

    /// Failed to deserialize session
    #[error("Failed to deserialize session: {0}")]
    DeserializationFailed(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_error_display() {
        let error = SessionError::FilePathNotSet;
        assert!(error.to_string().contains("file path not set"));

        let error = SessionError::HomeDirectoryNotFound;
        assert!(error.to_string().contains("home directory"));

        let error = SessionError::DeserializationFailed("bad yaml".to_string());
        assert!(error.to_string().contains("bad yaml"));
    }

    #[test]
    fn test_session_error_with_path() {
        let error = SessionError::LoadFailed {
            path: PathBuf::from("/tmp/session.yml"),
            message: "permission denied".to_string(),
        };
        let error_str = error.to_string();
        assert!(error_str.contains("/tmp/session.yml"));
        assert!(error_str.contains("permission denied"));
    }
}

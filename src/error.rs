//! Application-wide error types.
//!
//! This module defines the main error type hierarchy for the crate,
//! allowing for type-safe error handling throughout the codebase.

pub use crate::form::{FormError, SubmitError};
pub use crate::session::SessionError;

/// Main application error type.
///
/// This is the top-level error type that encompasses all error types
/// in the crate. It uses `thiserror` for automatic error derivation
/// and conversion.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Session persistence errors
    #[error("Session error: {0}")]
    Session(#[from] SessionError),

    /// Form contract errors
    #[error("Form error: {0}")]
    Form(#[from] FormError),

    /// Submit collaborator errors
    #[error("Submit error: {0}")]
    Submit(#[from] SubmitError),

    /// Logger initialization errors
    #[error("Logger error: {0}")]
    Logger(String),

    /// Generic error with context
    #[error("{0}")]
    Other(String),
}

/// Convenience type alias for Result with AppError
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_error_from_session_error() {
        let session_error = SessionError::FilePathNotSet;
        let app_error: AppError = session_error.into();
        assert!(matches!(app_error, AppError::Session(_)));
        assert!(app_error.to_string().contains("Session error"));
    }

    #[test]
    fn test_app_error_from_form_error() {
        let app_error: AppError = FormError::EmptyRecord.into();
        assert!(matches!(app_error, AppError::Form(_)));
        assert!(app_error.to_string().contains("Form error"));
    }

    #[test]
    fn test_app_error_from_submit_error() {
        let app_error: AppError = SubmitError::Failed("timeout".to_string()).into();
        assert!(matches!(app_error, AppError::Submit(_)));
        assert!(app_error.to_string().contains("timeout"));
    }

    #[test]
    fn test_app_error_other() {
        let error = AppError::Other("Generic error".to_string());
        assert_eq!(error.to_string(), "Generic error");
    }
}

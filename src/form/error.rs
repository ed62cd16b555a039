//! Form-specific error types.

/// Contract errors raised while building or driving a form.
///
/// These are programmer errors on the caller's side; user input that fails a
/// predicate is never a `FormError`, it lands in the form's field errors.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum FormError {
    /// Initial record has no fields
    #[error("Initial record must contain at least one field")]
    EmptyRecord,

    /// A table or a change event names a field the record does not have
    #[error("Unknown field '{field}' in {source_table}")]
    UnknownField { field: String, source_table: String },
}

/// Errors reported by the submit collaborator.
#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
pub enum SubmitError {
    /// The collaborator answered but refused the record
    #[error("Submission rejected: {}", .message.as_deref().unwrap_or("no reason given"))]
    Rejected { message: Option<String> },

    /// The collaborator could not be reached or failed before answering
    #[error("Submission failed: {0}")]
    Failed(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_form_error_display() {
        let error = FormError::EmptyRecord;
        assert!(error.to_string().contains("at least one field"));

        let error = FormError::UnknownField {
            field: "ModuleID".to_string(),
            source_table: "validation".to_string(),
        };
        assert!(error.to_string().contains("ModuleID"));
        assert!(error.to_string().contains("validation"));
    }

    #[test]
    fn test_submit_error_display() {
        let error = SubmitError::Rejected {
            message: Some("Duplicate project".to_string()),
        };
        assert!(error.to_string().contains("Duplicate project"));

        let error = SubmitError::Rejected { message: None };
        assert!(error.to_string().contains("no reason given"));

        let error = SubmitError::Failed("connection refused".to_string());
        assert!(error.to_string().contains("Submission failed"));
        assert!(error.to_string().contains("connection refused"));
    }
}

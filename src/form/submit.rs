//! Submit seam between a form and whatever persists its record.
//!
//! The form hands its record to a [`Submitter`] and turns the answer into a
//! [`SubmitOutcome`]. REST collaborators reply with an [`ApiEnvelope`], which
//! converts straight into a submit result.

use super::error::SubmitError;
use super::value::Record;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::future::Future;

/// Result of a submit attempt.
///
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Record was valid and accepted; the form has been closed
    Submitted,
    /// Record failed validation; the collaborator was never called
    InvalidFields(Vec<String>),
    /// Record was valid but the collaborator refused or failed
    SubmitFailed(SubmitError),
}

impl SubmitOutcome {
    pub fn is_submitted(&self) -> bool {
        matches!(self, SubmitOutcome::Submitted)
    }
}

/// Performs the persistence action for a submitted record.
///
#[async_trait]
pub trait Submitter: Send {
    async fn submit(&mut self, record: &Record) -> Result<(), SubmitError>;
}

/// Adapts an async closure into a [`Submitter`].
///
pub struct FnSubmitter<F>(F);

/// Wrap an async closure receiving an owned copy of the record.
///
pub fn submit_fn<F, Fut>(f: F) -> FnSubmitter<F>
where
    F: FnMut(Record) -> Fut + Send + 'static,
    Fut: Future<Output = Result<(), SubmitError>> + Send + 'static,
{
    FnSubmitter(f)
}

#[async_trait]
impl<F, Fut> Submitter for FnSubmitter<F>
where
    F: FnMut(Record) -> Fut + Send + 'static,
    Fut: Future<Output = Result<(), SubmitError>> + Send + 'static,
{
    async fn submit(&mut self, record: &Record) -> Result<(), SubmitError> {
        (self.0)(record.clone()).await
    }
}

/// Response envelope returned by the REST collaborators.
///
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiEnvelope {
    pub is_success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<serde_json::Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl ApiEnvelope {
    /// Return the result payload on success, or the rejection otherwise.
    ///
    pub fn into_result(self) -> Result<Option<serde_json::Value>, SubmitError> {
        if self.is_success {
            Ok(self.result)
        } else {
            Err(SubmitError::Rejected {
                message: self.message,
            })
        }
    }
}

impl From<ApiEnvelope> for Result<(), SubmitError> {
    fn from(envelope: ApiEnvelope) -> Self {
        envelope.into_result().map(|_| ())
    }
}

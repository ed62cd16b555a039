//! Entity forms.
//!
//! Each entity form supplies the initial record, validation table and
//! conformance table that the generic [`Form`] engine runs on. Field names
//! match the REST payloads, so a submitted record serializes directly into
//! the request body.

mod join_project;
mod project;
mod project_log;
mod sprint;
mod task_completion;

pub use join_project::{JoinProjectForm, ROLES};
pub use project::{Project, ProjectForm, STATUSES};
pub use project_log::{ProjectLog, ProjectLogForm};
pub use sprint::{Sprint, SprintForm};
pub use task_completion::{TaskCompletion, TaskCompletionForm};

use crate::form::{Conformance, Form, FormError, Record, Submitter, Validation};
use log::*;

/// Declares the tables of one entity form.
///
pub trait EntityForm {
    /// Name shown in form titles and log lines.
    fn title(&self) -> &'static str;

    fn initial_record(&self) -> Record;

    fn validation(&self) -> Validation;

    fn conformance(&self) -> Conformance {
        Conformance::new()
    }

    /// Build a live form for this entity.
    ///
    fn build<C, S>(&self, on_cancel: C, submitter: S) -> Result<Form, FormError>
    where
        Self: Sized,
        C: FnMut() + Send + 'static,
        S: Submitter + 'static,
    {
        debug!("Building '{}' form...", self.title());
        Form::new(
            self.initial_record(),
            self.conformance(),
            self.validation(),
            on_cancel,
            submitter,
        )
    }
}

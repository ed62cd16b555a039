use super::EntityForm;
use crate::form::{id, id_to_input, not_empty, present, Conformance, Record, Validation};
use crate::session::Session;
use fake::Dummy;

/// Defines project log data structure.
///
#[derive(Clone, Debug, Dummy, PartialEq, Eq)]
pub struct ProjectLog {
    pub id: i64,
    pub sprint_id: i64,
    pub user_id: i64,
    pub log_type_id: i64,
    pub title: String,
    pub description: Option<String>,
    pub task_description: Option<String>,
}

/// Form for adding a log entry to a sprint, or editing an existing entry.
///
#[derive(Clone, Debug)]
pub struct ProjectLogForm {
    sprint_id: Option<i64>,
    user_id: Option<i64>,
    existing: Option<ProjectLog>,
}

impl ProjectLogForm {
    /// Return a form adding a log to the sprint on behalf of the session's
    /// user.
    ///
    pub fn new(sprint_id: Option<i64>, session: &Session) -> Self {
        ProjectLogForm {
            sprint_id,
            user_id: session.user().map(|u| u.id),
            existing: None,
        }
    }

    /// Return a form editing an existing log. The log keeps its author.
    ///
    pub fn edit(log: ProjectLog) -> Self {
        ProjectLogForm {
            sprint_id: Some(log.sprint_id),
            user_id: Some(log.user_id),
            existing: Some(log),
        }
    }

    pub fn is_edit(&self) -> bool {
        self.existing.is_some()
    }
}

impl EntityForm for ProjectLogForm {
    fn title(&self) -> &'static str {
        if self.is_edit() {
            "Edit project log"
        } else {
            "Add project log"
        }
    }

    fn initial_record(&self) -> Record {
        let record = Record::new()
            .with("Log_SprintID", self.sprint_id)
            .with("Log_UserID", self.user_id);
        match &self.existing {
            Some(log) => record
                .with("LogID", log.id)
                .with("LogTitle", log.title.as_str())
                .with("LogDescription", log.description.clone().unwrap_or_default())
                .with(
                    "LogTaskDescription",
                    log.task_description.clone().unwrap_or_default(),
                )
                .with("Log_LogTypeID", log.log_type_id),
            None => record
                .with("LogTitle", "")
                .with("LogDescription", "")
                .with("LogTaskDescription", "")
                .with("Log_LogTypeID", None::<i64>),
        }
    }

    fn validation(&self) -> Validation {
        Validation::new()
            .rule("LogTitle", not_empty, "Please enter a log title")
            .rule("Log_LogTypeID", present, "Please select a log type")
            .rule("Log_SprintID", present, "Select a sprint before adding a log")
            .rule("Log_UserID", present, "Sign in before adding a log")
    }

    fn conformance(&self) -> Conformance {
        Conformance::new()
            .html2js("Log_LogTypeID", id)
            .js2html("Log_LogTypeID", id_to_input)
    }
}

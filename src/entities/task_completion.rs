use super::EntityForm;
use crate::form::{
    id, id_to_input, present, valid_date, Conformance, FieldKind, FieldValue, Record, Validation,
};
use crate::session::Session;
use chrono::NaiveDate;
use fake::Dummy;

/// Defines task completion data structure.
///
#[derive(Clone, Debug, Dummy, PartialEq, Eq)]
pub struct TaskCompletion {
    pub id: i64,
    pub user_id: i64,
    pub sprint_id: i64,
    pub completed: bool,
    pub description: String,
    pub date: NaiveDate,
}

/// Form recording whether a team member finished their sprint tasks.
///
#[derive(Clone, Debug)]
pub struct TaskCompletionForm {
    sprint_id: Option<i64>,
    user_id: Option<i64>,
    date: NaiveDate,
    existing: Option<TaskCompletion>,
}

impl TaskCompletionForm {
    /// Return a form recording completion for the session's user, dated
    /// today.
    ///
    pub fn new(sprint_id: Option<i64>, session: &Session) -> Self {
        TaskCompletionForm {
            sprint_id,
            user_id: session.user().map(|u| u.id),
            date: chrono::Local::now().date_naive(),
            existing: None,
        }
    }

    pub fn edit(task: TaskCompletion) -> Self {
        TaskCompletionForm {
            sprint_id: Some(task.sprint_id),
            user_id: Some(task.user_id),
            date: task.date,
            existing: Some(task),
        }
    }
}

impl EntityForm for TaskCompletionForm {
    fn title(&self) -> &'static str {
        if self.existing.is_some() {
            "Edit task completion"
        } else {
            "Record task completion"
        }
    }

    fn initial_record(&self) -> Record {
        let record = Record::new()
            .with("TaskCompletion_UserID", self.user_id)
            .with("TaskCompletion_SprintID", self.sprint_id)
            .with("TaskCompletionDate", self.date);
        match &self.existing {
            Some(task) => record
                .with("TaskCompletionID", task.id)
                .with("TaskCompletionStatus", i64::from(task.completed))
                .with("TaskCompletionDescription", task.description.as_str()),
            None => record
                .with("TaskCompletionStatus", 0_i64)
                .with("TaskCompletionDescription", ""),
        }
    }

    fn validation(&self) -> Validation {
        Validation::new()
            .rule("TaskCompletion_UserID", present, "Choose a team member")
            .rule("TaskCompletion_SprintID", present, "Select a sprint first")
            .rule(
                "TaskCompletionStatus",
                |v: &FieldValue| matches!(v.as_integer(), Some(0) | Some(1)),
                "Status must be 0 (pending) or 1 (completed)",
            )
            .rule("TaskCompletionDate", valid_date, "Please enter a valid date")
    }

    fn conformance(&self) -> Conformance {
        Conformance::new()
            .html2js("TaskCompletion_UserID", id)
            .js2html("TaskCompletion_UserID", id_to_input)
            .html2js("TaskCompletion_SprintID", id)
            .js2html("TaskCompletion_SprintID", id_to_input)
            .html2js("TaskCompletionStatus", checkbox)
            .kind("TaskCompletionStatus", FieldKind::Integer)
            .date_field("TaskCompletionDate")
    }
}

/// Checkbox inputs report `true`/`false`; anything else is left for the
/// integer coercion.
fn checkbox(value: FieldValue) -> FieldValue {
    match value.as_text().map(str::trim) {
        Some("true") | Some("on") => FieldValue::Integer(1),
        Some("false") | Some("off") => FieldValue::Integer(0),
        _ => value,
    }
}

use super::EntityForm;
use crate::form::{
    id, id_to_input, not_empty, present, valid_date, Conformance, FieldValue, Record, Validation,
};
use chrono::NaiveDate;
use fake::Dummy;

/// Defines sprint data structure.
///
#[derive(Clone, Debug, Dummy, PartialEq, Eq)]
pub struct Sprint {
    pub id: i64,
    pub project_id: i64,
    pub name: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

/// Form for adding a sprint to a project, or editing an existing one.
///
#[derive(Clone, Debug)]
pub struct SprintForm {
    project_id: Option<i64>,
    existing: Option<Sprint>,
}

impl SprintForm {
    pub fn new(project_id: Option<i64>) -> Self {
        SprintForm {
            project_id,
            existing: None,
        }
    }

    pub fn edit(sprint: Sprint) -> Self {
        SprintForm {
            project_id: Some(sprint.project_id),
            existing: Some(sprint),
        }
    }
}

impl EntityForm for SprintForm {
    fn title(&self) -> &'static str {
        if self.existing.is_some() {
            "Edit sprint"
        } else {
            "Add sprint"
        }
    }

    fn initial_record(&self) -> Record {
        match &self.existing {
            Some(s) => Record::new()
                .with("SprintID", s.id)
                .with("Sprint_ProjectID", s.project_id)
                .with("SprintName", s.name.as_str())
                .with("SprintStartDate", s.start_date)
                .with("SprintEndDate", s.end_date),
            None => Record::new()
                .with("Sprint_ProjectID", self.project_id)
                .with("SprintName", "")
                .with("SprintStartDate", FieldValue::Date(None))
                .with("SprintEndDate", FieldValue::Date(None)),
        }
    }

    fn validation(&self) -> Validation {
        Validation::new()
            .rule("Sprint_ProjectID", present, "Choose the project for this sprint")
            .rule("SprintName", not_empty, "Please enter a sprint name")
            .rule("SprintStartDate", valid_date, "Please enter a valid start date")
            .rule("SprintEndDate", valid_date, "Please enter a valid end date")
    }

    fn conformance(&self) -> Conformance {
        Conformance::new()
            .html2js("Sprint_ProjectID", id)
            .js2html("Sprint_ProjectID", id_to_input)
            .date_field("SprintStartDate")
            .date_field("SprintEndDate")
    }
}

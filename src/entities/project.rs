use super::EntityForm;
use crate::form::{longer_than, one_of, valid_date, Conformance, FieldValue, Record, Validation};
use chrono::NaiveDate;
use fake::Dummy;

/// Project statuses offered by the status select.
pub const STATUSES: [&str; 3] = ["In Progress", "Completed", "Active"];

/// Defines project data structure.
///
#[derive(Clone, Debug, Dummy, PartialEq, Eq)]
pub struct Project {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub status: String,
}

/// Form for adding a project, or editing an existing one.
///
#[derive(Clone, Debug, Default)]
pub struct ProjectForm {
    existing: Option<Project>,
}

impl ProjectForm {
    pub fn new() -> Self {
        ProjectForm::default()
    }

    pub fn edit(project: Project) -> Self {
        ProjectForm {
            existing: Some(project),
        }
    }
}

impl EntityForm for ProjectForm {
    fn title(&self) -> &'static str {
        if self.existing.is_some() {
            "Edit project"
        } else {
            "Add project"
        }
    }

    fn initial_record(&self) -> Record {
        match &self.existing {
            Some(p) => Record::new()
                .with("ProjectID", p.id)
                .with("ProjectName", p.name.as_str())
                .with("ProjectDescription", p.description.as_str())
                .with("ProjectStartDate", p.start_date)
                .with("ProjectEndDate", p.end_date)
                .with("ProjectStatus", p.status.as_str()),
            None => Record::new()
                .with("ProjectName", "")
                .with("ProjectDescription", "")
                .with("ProjectStartDate", FieldValue::Date(None))
                .with("ProjectEndDate", FieldValue::Date(None))
                .with("ProjectStatus", ""),
        }
    }

    fn validation(&self) -> Validation {
        Validation::new()
            .rule(
                "ProjectName",
                longer_than(5),
                "Invalid name - must be at least 6 characters",
            )
            .rule(
                "ProjectDescription",
                longer_than(20),
                "Invalid description - must be at least 21 characters",
            )
            .rule(
                "ProjectStartDate",
                valid_date,
                "Invalid start date - must be a valid date",
            )
            .rule(
                "ProjectEndDate",
                valid_date,
                "Invalid end date - must be a valid date",
            )
            .rule(
                "ProjectStatus",
                one_of(&STATUSES),
                "Invalid status - must be 'In Progress', 'Completed', or 'Active'",
            )
    }

    fn conformance(&self) -> Conformance {
        Conformance::new()
            .date_field("ProjectStartDate")
            .date_field("ProjectEndDate")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::form::{submit_fn, SubmitError, SubmitOutcome};
    use fake::{Fake, Faker};
    use serde_json::json;
    use std::sync::{Arc, Mutex};

    #[test]
    fn test_blank_project_form() {
        let form = ProjectForm::new()
            .build(|| {}, submit_fn(|_| async { Ok::<(), SubmitError>(()) }))
            .unwrap();
        assert_eq!(form.record().len(), 5);
        assert!(!form.record().contains("ProjectID"));
        assert_eq!(form.value("ProjectStartDate"), Some(&FieldValue::Date(None)));
        assert_eq!(form.display("ProjectStartDate").as_deref(), Some(""));
    }

    #[test]
    fn test_edit_seeds_existing_values() {
        let project: Project = Faker.fake();
        let form = ProjectForm::edit(project.clone())
            .build(|| {}, submit_fn(|_| async { Ok::<(), SubmitError>(()) }))
            .unwrap();
        assert_eq!(ProjectForm::edit(project.clone()).title(), "Edit project");
        assert_eq!(form.value("ProjectID"), Some(&FieldValue::Integer(project.id)));
        assert_eq!(
            form.value("ProjectStartDate"),
            Some(&FieldValue::Date(Some(project.start_date)))
        );
        assert_eq!(
            form.display("ProjectEndDate"),
            Some(project.end_date.format("%Y-%m-%d").to_string())
        );
    }

    #[test]
    fn test_date_fields_are_coerced() {
        let mut form = ProjectForm::new()
            .build(|| {}, submit_fn(|_| async { Ok::<(), SubmitError>(()) }))
            .unwrap();
        assert_eq!(form.handle_change("ProjectStartDate", "2024-11-15").unwrap(), None);
        assert_eq!(
            form.value("ProjectStartDate"),
            Some(&FieldValue::Date(NaiveDate::from_ymd_opt(2024, 11, 15)))
        );
        assert_eq!(
            form.handle_change("ProjectEndDate", "someday").unwrap(),
            Some("Invalid end date - must be a valid date")
        );
    }

    #[test]
    fn test_field_rules() {
        let mut form = ProjectForm::new()
            .build(|| {}, submit_fn(|_| async { Ok::<(), SubmitError>(()) }))
            .unwrap();
        assert!(form.handle_change("ProjectName", "Short").unwrap().is_some());
        assert!(form.handle_change("ProjectName", "Apollo").unwrap().is_none());
        assert!(form.handle_change("ProjectStatus", "Paused").unwrap().is_some());
        assert!(form.handle_change("ProjectStatus", "In Progress").unwrap().is_none());
        assert!(form
            .handle_change("ProjectDescription", "Too brief")
            .unwrap()
            .is_some());
    }

    #[tokio::test]
    async fn test_submit_sends_formatted_payload() {
        let payloads = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&payloads);
        let mut form = ProjectForm::new()
            .build(
                || {},
                submit_fn(move |record: Record| {
                    let sink = Arc::clone(&sink);
                    async move {
                        sink.lock().unwrap().push(record.to_json().unwrap());
                        Ok::<(), SubmitError>(())
                    }
                }),
            )
            .unwrap();

        form.handle_change("ProjectName", "Apollo Program").unwrap();
        form.handle_change("ProjectDescription", "Land a crew on the moon and return them")
            .unwrap();
        form.handle_change("ProjectStartDate", "2024-11-15").unwrap();
        form.handle_change("ProjectEndDate", "2024-12-15").unwrap();
        form.handle_change("ProjectStatus", "Active").unwrap();

        assert_eq!(form.handle_submit().await, SubmitOutcome::Submitted);
        assert_eq!(
            payloads.lock().unwrap()[0],
            json!({
                "ProjectName": "Apollo Program",
                "ProjectDescription": "Land a crew on the moon and return them",
                "ProjectStartDate": "2024-11-15",
                "ProjectEndDate": "2024-12-15",
                "ProjectStatus": "Active",
            })
        );
    }

    #[tokio::test]
    async fn test_blank_submit_flags_every_field() {
        let mut form = ProjectForm::new()
            .build(|| {}, submit_fn(|_| async { Ok::<(), SubmitError>(()) }))
            .unwrap();
        match form.handle_submit().await {
            SubmitOutcome::InvalidFields(fields) => assert_eq!(fields.len(), 5),
            other => panic!("unexpected outcome {:?}", other),
        }
        assert_eq!(
            form.error("ProjectStatus"),
            Some("Invalid status - must be 'In Progress', 'Completed', or 'Active'")
        );
    }
}

use super::EntityForm;
use crate::form::{id, id_to_input, one_of, present, Conformance, Record, Validation};
use crate::session::Session;

/// Roles a user can take when joining a project.
pub const ROLES: [&str; 3] = ["Contributor", "Viewer", "Manager"];

/// Form for the signed-in user to join an existing project.
///
#[derive(Clone, Debug, Default)]
pub struct JoinProjectForm {
    user_id: Option<i64>,
}

impl JoinProjectForm {
    /// Return a form joining on behalf of the session's user. Without a
    /// signed-in user the user field stays empty and blocks submission.
    ///
    pub fn new(session: &Session) -> Self {
        JoinProjectForm {
            user_id: session.user().map(|u| u.id),
        }
    }
}

impl EntityForm for JoinProjectForm {
    fn title(&self) -> &'static str {
        "Join project"
    }

    fn initial_record(&self) -> Record {
        Record::new()
            .with("UserProject_ProjectID", None::<i64>)
            .with("UserProject_UserID", self.user_id)
            .with("UserProject_Role", "")
    }

    fn validation(&self) -> Validation {
        Validation::new()
            .rule(
                "UserProject_ProjectID",
                present,
                "Invalid Project ID - must not be empty",
            )
            .rule(
                "UserProject_UserID",
                present,
                "Invalid User ID - must not be empty",
            )
            .rule(
                "UserProject_Role",
                one_of(&ROLES),
                "Invalid role - must be 'Contributor', 'Viewer', or 'Manager'",
            )
    }

    fn conformance(&self) -> Conformance {
        Conformance::new()
            .html2js("UserProject_ProjectID", id)
            .js2html("UserProject_ProjectID", id_to_input)
            .html2js("UserProject_UserID", id)
            .js2html("UserProject_UserID", id_to_input)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::form::{submit_fn, FieldValue, SubmitError, SubmitOutcome};
    use crate::session::User;

    fn signed_in() -> Session {
        let mut session = Session::new();
        session.sign_in(User {
            id: 27,
            name: "User 27".to_string(),
        });
        session
    }

    #[test]
    fn test_user_comes_from_session() {
        let form = JoinProjectForm::new(&signed_in())
            .build(|| {}, submit_fn(|_| async { Ok::<(), SubmitError>(()) }))
            .unwrap();
        assert_eq!(form.value("UserProject_UserID"), Some(&FieldValue::Integer(27)));
        assert_eq!(form.display("UserProject_ProjectID").as_deref(), Some("0"));
    }

    #[test]
    fn test_placeholder_option_counts_as_empty() {
        let mut form = JoinProjectForm::new(&signed_in())
            .build(|| {}, submit_fn(|_| async { Ok::<(), SubmitError>(()) }))
            .unwrap();
        assert_eq!(
            form.handle_change("UserProject_ProjectID", "0").unwrap(),
            Some("Invalid Project ID - must not be empty")
        );
        assert_eq!(form.handle_change("UserProject_ProjectID", "4").unwrap(), None);
        assert_eq!(form.value("UserProject_ProjectID"), Some(&FieldValue::Integer(4)));
    }

    #[tokio::test]
    async fn test_signed_out_session_blocks_submit() {
        let mut form = JoinProjectForm::new(&Session::new())
            .build(|| {}, submit_fn(|_| async { Ok::<(), SubmitError>(()) }))
            .unwrap();
        form.handle_change("UserProject_ProjectID", "4").unwrap();
        form.handle_change("UserProject_Role", "Viewer").unwrap();
        assert_eq!(
            form.handle_submit().await,
            SubmitOutcome::InvalidFields(vec!["UserProject_UserID".to_string()])
        );
    }

    #[tokio::test]
    async fn test_signed_in_join_submits() {
        let mut form = JoinProjectForm::new(&signed_in())
            .build(|| {}, submit_fn(|_| async { Ok::<(), SubmitError>(()) }))
            .unwrap();
        form.handle_change("UserProject_ProjectID", "4").unwrap();
        form.handle_change("UserProject_Role", "Manager").unwrap();
        assert_eq!(form.handle_submit().await, SubmitOutcome::Submitted);
    }
}

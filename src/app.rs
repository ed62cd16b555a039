//! Command-line host for the entity forms.
//!
//! Drives a form the way a browser would: every `Field=Value` pair becomes a
//! change event, then the form is submitted. The submit collaborator captures
//! the JSON payload instead of sending it anywhere.

use crate::entities::{
    EntityForm, JoinProjectForm, ProjectForm, ProjectLogForm, SprintForm, TaskCompletionForm,
};
use crate::error::{AppError, AppResult};
use crate::form::{submit_fn, Record, SubmitError, SubmitOutcome};
use crate::session::{Session, User};
use anyhow::{Context, Result};
use log::*;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

/// Entity forms reachable from the command line.
///
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    Project,
    Join,
    Sprint,
    Log,
    Task,
}

impl EntityKind {
    pub const NAMES: [&'static str; 5] = ["project", "join", "sprint", "log", "task"];

    pub fn from_name(name: &str) -> Option<EntityKind> {
        match name {
            "project" => Some(EntityKind::Project),
            "join" => Some(EntityKind::Join),
            "sprint" => Some(EntityKind::Sprint),
            "log" => Some(EntityKind::Log),
            "task" => Some(EntityKind::Task),
            _ => None,
        }
    }
}

/// Specify the commands the host understands.
///
#[derive(Debug, Clone)]
pub enum Command {
    Login {
        id: i64,
        name: String,
    },
    Logout,
    WhoAmI,
    Fill {
        entity: EntityKind,
        values: Vec<(String, String)>,
        project_id: Option<i64>,
        sprint_id: Option<i64>,
    },
}

/// Result of filling and submitting one form.
///
#[derive(Debug, Clone, PartialEq)]
pub struct FillReport {
    pub title: &'static str,
    pub outcome: SubmitOutcome,
    pub payload: Option<serde_json::Value>,
    pub errors: Vec<(String, String)>,
    pub closed: bool,
}

/// What a command produced, for the caller to print.
///
#[derive(Debug, Clone, PartialEq)]
pub enum Report {
    User(Option<User>),
    Filled(FillReport),
}

/// Oversees the session and runs commands against it.
///
pub struct App {
    session: Session,
}

impl App {
    /// Load the session, run the command, and return its report.
    ///
    pub async fn start(command: Command, session_dir: Option<&str>) -> Result<Report> {
        let mut session = Session::new();
        session.load(session_dir).context("Failed to load session")?;
        let mut app = App { session };
        app.run(command).await
    }

    async fn run(&mut self, command: Command) -> Result<Report> {
        debug!("Running command {:?}...", command);
        match command {
            Command::Login { id, name } => {
                self.session.sign_in(User { id, name });
                self.session.save().context("Failed to save session")?;
                Ok(Report::User(self.session.user().cloned()))
            }
            Command::Logout => {
                self.session.sign_out();
                self.session.save().context("Failed to save session")?;
                Ok(Report::User(None))
            }
            Command::WhoAmI => Ok(Report::User(self.session.user().cloned())),
            Command::Fill {
                entity,
                values,
                project_id,
                sprint_id,
            } => {
                let report = match entity {
                    EntityKind::Project => fill(&ProjectForm::new(), &values).await?,
                    EntityKind::Join => {
                        fill(&JoinProjectForm::new(&self.session), &values).await?
                    }
                    EntityKind::Sprint => fill(&SprintForm::new(project_id), &values).await?,
                    EntityKind::Log => {
                        fill(&ProjectLogForm::new(sprint_id, &self.session), &values).await?
                    }
                    EntityKind::Task => {
                        let entity = TaskCompletionForm::new(sprint_id, &self.session);
                        fill(&entity, &values).await?
                    }
                };
                Ok(Report::Filled(report))
            }
        }
    }
}

/// Apply each value as a change event, then submit the form.
///
pub async fn fill<E: EntityForm>(
    entity: &E,
    values: &[(String, String)],
) -> AppResult<FillReport> {
    let payload: Arc<Mutex<Option<serde_json::Value>>> = Arc::new(Mutex::new(None));
    let closed = Arc::new(AtomicBool::new(false));

    let sink = Arc::clone(&payload);
    let close_flag = Arc::clone(&closed);
    let mut form = entity.build(
        move || close_flag.store(true, Ordering::SeqCst),
        submit_fn(move |record: Record| {
            let sink = Arc::clone(&sink);
            async move {
                let json = record
                    .to_json()
                    .map_err(|e| SubmitError::Failed(e.to_string()))?;
                let mut slot = sink
                    .lock()
                    .map_err(|_| SubmitError::Failed("payload sink poisoned".to_string()))?;
                *slot = Some(json);
                Ok::<(), SubmitError>(())
            }
        }),
    )?;

    for (field, value) in values {
        if let Some(message) = form.handle_change(field, value.as_str())? {
            debug!("'{}' = '{}' rejected: {}", field, value, message);
        }
    }

    let outcome = form.handle_submit().await;
    let errors = form
        .errors()
        .invalid_fields()
        .into_iter()
        .filter_map(|f| form.error(&f).map(|m| (f.clone(), m.to_owned())))
        .collect();
    let payload = payload
        .lock()
        .map_err(|_| AppError::Other("payload sink poisoned".to_string()))?
        .take();

    Ok(FillReport {
        title: entity.title(),
        outcome,
        payload,
        errors,
        closed: closed.load(Ordering::SeqCst),
    })
}

/// Split a `Field=Value` argument.
///
pub fn parse_assignment(arg: &str) -> AppResult<(String, String)> {
    match arg.split_once('=') {
        Some((field, value)) if !field.trim().is_empty() => {
            Ok((field.trim().to_owned(), value.to_owned()))
        }
        _ => Err(AppError::Other(format!(
            "Expected Field=Value, got '{}'",
            arg
        ))),
    }
}

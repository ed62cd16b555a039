//! Generic form state and validation engine.
//!
//! A [`Form`] owns a record of field values, the per-field error state, and
//! the submit/cancel lifecycle of one entity-editing form:
//! - `handle_change` conforms a raw input value, stores it and re-validates
//!   only that field
//! - `handle_submit` validates the whole record and, only when every rule
//!   passes, hands it to the [`Submitter`]; success closes the form
//!
//! The error map always has exactly the initial record's fields as keys.

mod conformance;
mod error;
mod submit;
mod validation;
mod value;

pub use conformance::{date, id, id_to_input, integer, Conformance, FieldKind};
pub use error::{FormError, SubmitError};
pub use submit::{submit_fn, ApiEnvelope, FnSubmitter, SubmitOutcome, Submitter};
pub use validation::{longer_than, not_empty, numeric, one_of, present, valid_date};
pub use validation::{FieldErrors, Validation};
pub use value::{FieldValue, Record, DATE_FORMAT};

use log::*;

type CancelCallback = Box<dyn FnMut() + Send>;

/// Form state for one mounted entity form.
///
pub struct Form {
    initial: Record,
    record: Record,
    errors: FieldErrors,
    conformance: Conformance,
    validation: Validation,
    on_cancel: CancelCallback,
    submitter: Box<dyn Submitter>,
}

impl Form {
    /// Return a new form for the initial record, or an error if the record is
    /// empty or a table names a field the record does not have.
    ///
    pub fn new<C, S>(
        initial_record: Record,
        conformance: Conformance,
        validation: Validation,
        on_cancel: C,
        submitter: S,
    ) -> Result<Form, FormError>
    where
        C: FnMut() + Send + 'static,
        S: Submitter + 'static,
    {
        if initial_record.is_empty() {
            return Err(FormError::EmptyRecord);
        }
        check_fields(&initial_record, validation.fields(), "validation")?;
        check_fields(&initial_record, conformance.fields(), "conformance")?;

        // Initial values go through the same coercion as typed input.
        let record: Record = initial_record
            .iter()
            .map(|(field, value)| (field, conformance.to_record(field, value.clone())))
            .collect();
        let errors = FieldErrors::clear_for(&record);
        debug!("Created form with fields {:?}", record.fields().collect::<Vec<_>>());

        Ok(Form {
            initial: record.clone(),
            record,
            errors,
            conformance,
            validation,
            on_cancel: Box::new(on_cancel),
            submitter: Box::new(submitter),
        })
    }

    /// Current field values.
    ///
    pub fn record(&self) -> &Record {
        &self.record
    }

    /// Current per-field error state.
    ///
    pub fn errors(&self) -> &FieldErrors {
        &self.errors
    }

    pub fn error(&self, field: &str) -> Option<&str> {
        self.errors.get(field)
    }

    pub fn value(&self, field: &str) -> Option<&FieldValue> {
        self.record.get(field)
    }

    /// Render a field's current value for its input control.
    ///
    pub fn display(&self, field: &str) -> Option<String> {
        self.record
            .get(field)
            .map(|value| self.conformance.to_input(field, value))
    }

    /// Store a raw input value for the field and re-validate that field only.
    /// Returns the field's new error, if any.
    ///
    pub fn handle_change(
        &mut self,
        field: &str,
        raw: impl Into<FieldValue>,
    ) -> Result<Option<&str>, FormError> {
        if !self.record.contains(field) {
            warn!("Ignoring change to unknown field '{}'", field);
            return Err(unknown_field(field, "change event"));
        }
        let value = self.conformance.to_record(field, raw.into());
        let error = self.validation.check(field, &value);
        trace!("Field '{}' changed to {:?} (error: {:?})", field, value, error);
        self.record.replace(field, value);
        self.errors.set(field, error);
        Ok(self.errors.get(field))
    }

    /// Validate the whole record and submit it if every rule passes.
    ///
    /// On success the cancel callback runs once to close the form. On
    /// rejection the record and errors are left as they were. Dropping the
    /// returned future while the submitter is pending abandons the attempt
    /// without touching the form.
    pub async fn handle_submit(&mut self) -> SubmitOutcome {
        let (valid, errors) = self.validation.validate(&self.record);
        if !valid {
            let invalid = errors.invalid_fields();
            info!("Submit blocked by invalid fields {:?}", invalid);
            self.errors = errors;
            return SubmitOutcome::InvalidFields(invalid);
        }

        debug!("Submitting record with {} fields...", self.record.len());
        match self.submitter.submit(&self.record).await {
            Ok(()) => {
                info!("Submission accepted, closing form.");
                (self.on_cancel)();
                SubmitOutcome::Submitted
            }
            Err(e) => {
                warn!("{}", e);
                SubmitOutcome::SubmitFailed(e)
            }
        }
    }

    /// Close the form without submitting.
    ///
    pub fn cancel(&mut self) {
        debug!("Form cancelled.");
        (self.on_cancel)();
    }

    /// Restore the initial record and clear every error.
    ///
    pub fn reset(&mut self) {
        self.record = self.initial.clone();
        self.errors = FieldErrors::clear_for(&self.record);
    }
}

fn unknown_field(field: &str, table: &str) -> FormError {
    FormError::UnknownField {
        field: field.to_owned(),
        source_table: table.to_owned(),
    }
}

fn check_fields<'a>(
    record: &Record,
    mut fields: impl Iterator<Item = &'a str>,
    table: &str,
) -> Result<(), FormError> {
    match fields.find(|f| !record.contains(f)) {
        Some(field) => Err(unknown_field(field, table)),
        None => Ok(()),
    }
}

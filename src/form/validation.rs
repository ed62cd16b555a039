//! Field validation tables.
//!
//! A [`Validation`] is a registered-strategy table: each field maps to one
//! predicate and the message shown when it fails. Pairing the two in a single
//! rule keeps the predicate and message key sets identical.

use super::value::{FieldValue, Record};
use std::collections::BTreeMap;
use std::fmt;

type Predicate = Box<dyn Fn(&FieldValue) -> bool + Send + Sync>;

/// Per-field error state. `None` means the field currently has no error.
///
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FieldErrors(BTreeMap<String, Option<String>>);

impl FieldErrors {
    /// Return a "no error" entry for every field of the record.
    ///
    pub fn clear_for(record: &Record) -> Self {
        FieldErrors(record.fields().map(|f| (f.to_owned(), None)).collect())
    }

    /// Return the message for the field, if it currently has one.
    ///
    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).and_then(|e| e.as_deref())
    }

    pub fn contains(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    /// Return fields currently showing an error, in field order.
    ///
    pub fn invalid_fields(&self) -> Vec<String> {
        self.0
            .iter()
            .filter(|(_, e)| e.is_some())
            .map(|(f, _)| f.clone())
            .collect()
    }

    pub fn is_clean(&self) -> bool {
        self.0.values().all(Option::is_none)
    }

    pub(crate) fn set(&mut self, field: &str, error: Option<String>) {
        if let Some(slot) = self.0.get_mut(field) {
            *slot = error;
        }
    }
}

struct Rule {
    predicate: Predicate,
    message: String,
}

/// Validation table mapping fields to predicates and error messages.
///
#[derive(Default)]
pub struct Validation {
    rules: BTreeMap<String, Rule>,
}

impl fmt::Debug for Validation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map()
            .entries(self.rules.iter().map(|(k, r)| (k, &r.message)))
            .finish()
    }
}

impl Validation {
    pub fn new() -> Self {
        Validation::default()
    }

    /// Register the predicate and error message for a field, replacing any
    /// earlier rule for the same field.
    ///
    pub fn rule<P>(
        mut self,
        field: impl Into<String>,
        predicate: P,
        message: impl Into<String>,
    ) -> Self
    where
        P: Fn(&FieldValue) -> bool + Send + Sync + 'static,
    {
        self.rules.insert(
            field.into(),
            Rule {
                predicate: Box::new(predicate),
                message: message.into(),
            },
        );
        self
    }

    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.rules.keys().map(String::as_str)
    }

    pub fn message(&self, field: &str) -> Option<&str> {
        self.rules.get(field).map(|r| r.message.as_str())
    }

    /// Check a single value. Fields without a rule are never in error.
    ///
    pub fn check(&self, field: &str, value: &FieldValue) -> Option<String> {
        match self.rules.get(field) {
            Some(rule) if !(rule.predicate)(value) => Some(rule.message.clone()),
            _ => None,
        }
    }

    /// Validate every field that has a rule against the record and return a
    /// fresh error map together with overall validity.
    ///
    /// A rule whose field is missing from the record is checked against
    /// [`FieldValue::Null`]; forms reject such tables at construction.
    pub fn validate(&self, record: &Record) -> (bool, FieldErrors) {
        let mut errors = FieldErrors::clear_for(record);
        let mut valid = true;
        for field in self.rules.keys() {
            let value = record.get(field).unwrap_or(&FieldValue::Null);
            let error = self.check(field, value);
            if error.is_some() {
                valid = false;
            }
            errors.set(field, error);
        }
        (valid, errors)
    }
}

/// Text with at least one non-whitespace character.
pub fn not_empty(value: &FieldValue) -> bool {
    value.as_text().map(|s| !s.trim().is_empty()).unwrap_or(false)
}

/// Text strictly longer than `n` characters.
pub fn longer_than(n: usize) -> impl Fn(&FieldValue) -> bool + Send + Sync + 'static {
    move |value| value.as_text().map(|s| s.chars().count() > n).unwrap_or(false)
}

/// Text equal to one of the allowed options.
pub fn one_of(options: &[&str]) -> impl Fn(&FieldValue) -> bool + Send + Sync + 'static {
    let options: Vec<String> = options.iter().map(|s| s.to_string()).collect();
    move |value| {
        value
            .as_text()
            .map(|s| options.iter().any(|o| o == s))
            .unwrap_or(false)
    }
}

/// A date that parsed successfully.
pub fn valid_date(value: &FieldValue) -> bool {
    value.as_date().is_some()
}

/// Anything other than null or an empty string.
pub fn present(value: &FieldValue) -> bool {
    match value {
        FieldValue::Null | FieldValue::Date(None) => false,
        FieldValue::Text(s) => !s.is_empty(),
        FieldValue::Integer(_) | FieldValue::Date(Some(_)) => true,
    }
}

/// Integers, or text that parses as a finite number.
pub fn numeric(value: &FieldValue) -> bool {
    match value {
        FieldValue::Integer(_) => true,
        FieldValue::Text(s) => s.trim().parse::<f64>().map(f64::is_finite).unwrap_or(false),
        _ => false,
    }
}

//! Value conformance between input controls and records.
//!
//! Input controls hand over raw text. Before a value lands in the record it
//! passes through the field's registered `html2js` transform, then through the
//! coercion of the field's declared [`FieldKind`]. Going the other way,
//! `js2html` renders a stored value back into an input control.
//!
//! Every transform here is idempotent: conforming an already conformed value
//! returns it unchanged.

use super::value::{FieldValue, DATE_FORMAT};
use chrono::{DateTime, NaiveDate};
use std::collections::BTreeMap;
use std::fmt;

type Html2Js = Box<dyn Fn(FieldValue) -> FieldValue + Send + Sync>;
type Js2Html = Box<dyn Fn(&FieldValue) -> String + Send + Sync>;

/// Declared type of a field, applied after any registered transform.
///
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    Integer,
    Date,
}

impl FieldKind {
    fn coerce(&self, value: FieldValue) -> FieldValue {
        match self {
            FieldKind::Text => value,
            FieldKind::Integer => integer(value),
            FieldKind::Date => date(value),
        }
    }
}

/// Conformance table for one form.
///
#[derive(Default)]
pub struct Conformance {
    html2js: BTreeMap<String, Html2Js>,
    js2html: BTreeMap<String, Js2Html>,
    kinds: BTreeMap<String, FieldKind>,
}

impl fmt::Debug for Conformance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Conformance")
            .field("html2js", &self.html2js.keys().collect::<Vec<_>>())
            .field("js2html", &self.js2html.keys().collect::<Vec<_>>())
            .field("kinds", &self.kinds)
            .finish()
    }
}

impl Conformance {
    pub fn new() -> Self {
        Conformance::default()
    }

    /// Register the inbound transform for a field.
    ///
    pub fn html2js<F>(mut self, field: impl Into<String>, transform: F) -> Self
    where
        F: Fn(FieldValue) -> FieldValue + Send + Sync + 'static,
    {
        self.html2js.insert(field.into(), Box::new(transform));
        self
    }

    /// Register the outbound display transform for a field.
    ///
    pub fn js2html<F>(mut self, field: impl Into<String>, transform: F) -> Self
    where
        F: Fn(&FieldValue) -> String + Send + Sync + 'static,
    {
        self.js2html.insert(field.into(), Box::new(transform));
        self
    }

    /// Declare the kind of a field.
    ///
    pub fn kind(mut self, field: impl Into<String>, kind: FieldKind) -> Self {
        self.kinds.insert(field.into(), kind);
        self
    }

    pub fn date_field(self, field: impl Into<String>) -> Self {
        self.kind(field, FieldKind::Date)
    }

    pub fn kind_of(&self, field: &str) -> FieldKind {
        self.kinds.get(field).copied().unwrap_or(FieldKind::Text)
    }

    /// Every field name the table refers to.
    ///
    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.html2js
            .keys()
            .chain(self.js2html.keys())
            .chain(self.kinds.keys())
            .map(String::as_str)
    }

    /// Conform a raw input value for storage in the record.
    ///
    pub fn to_record(&self, field: &str, raw: FieldValue) -> FieldValue {
        let value = match self.html2js.get(field) {
            Some(transform) => transform(raw),
            None => raw,
        };
        self.kind_of(field).coerce(value)
    }

    /// Render a stored value for display in an input control.
    ///
    pub fn to_input(&self, field: &str, value: &FieldValue) -> String {
        match self.js2html.get(field) {
            Some(transform) => transform(value),
            None => value.to_input_string(),
        }
    }
}

/// Coerce to a date. Accepts `YYYY-MM-DD` and RFC 3339 timestamps; anything
/// else becomes an invalid date.
pub fn date(value: FieldValue) -> FieldValue {
    match value {
        FieldValue::Date(_) => value,
        FieldValue::Text(s) => FieldValue::Date(parse_date(&s)),
        FieldValue::Null | FieldValue::Integer(_) => FieldValue::Date(None),
    }
}

/// Coerce to an integer. Text that does not parse becomes null.
pub fn integer(value: FieldValue) -> FieldValue {
    match value {
        FieldValue::Integer(_) | FieldValue::Null => value,
        FieldValue::Text(s) => s
            .trim()
            .parse::<i64>()
            .map(FieldValue::Integer)
            .unwrap_or(FieldValue::Null),
        FieldValue::Date(_) => FieldValue::Null,
    }
}

/// Coerce to an entity id. Select controls use `0` as the "nothing chosen"
/// option, so zero maps to null like unparsable text does.
pub fn id(value: FieldValue) -> FieldValue {
    match integer(value) {
        FieldValue::Integer(0) => FieldValue::Null,
        other => other,
    }
}

/// Display an id, showing null as the `0` placeholder option.
pub fn id_to_input(value: &FieldValue) -> String {
    match value {
        FieldValue::Integer(n) => n.to_string(),
        _ => "0".to_string(),
    }
}

fn parse_date(s: &str) -> Option<NaiveDate> {
    let s = s.trim();
    NaiveDate::parse_from_str(s, DATE_FORMAT)
        .ok()
        .or_else(|| DateTime::parse_from_rfc3339(s).ok().map(|dt| dt.date_naive()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_date_coercion() {
        assert_eq!(date("2024-11-15".into()), FieldValue::Date(Some(ymd(2024, 11, 15))));
        assert_eq!(
            date("2024-11-15T10:30:00Z".into()),
            FieldValue::Date(Some(ymd(2024, 11, 15)))
        );
        assert_eq!(date("15/11/2024".into()), FieldValue::Date(None));
        assert_eq!(date("".into()), FieldValue::Date(None));
        assert_eq!(date(FieldValue::Null), FieldValue::Date(None));
    }

    #[test]
    fn test_integer_coercion() {
        assert_eq!(integer("42".into()), FieldValue::Integer(42));
        assert_eq!(integer(" 7 ".into()), FieldValue::Integer(7));
        assert_eq!(integer("0".into()), FieldValue::Integer(0));
        assert_eq!(integer("abc".into()), FieldValue::Null);
    }

    #[test]
    fn test_id_coercion() {
        assert_eq!(id("12".into()), FieldValue::Integer(12));
        assert_eq!(id("0".into()), FieldValue::Null);
        assert_eq!(id(FieldValue::Integer(0)), FieldValue::Null);
        assert_eq!(id("".into()), FieldValue::Null);
    }

    #[test]
    fn test_transforms_are_idempotent() {
        let inputs: Vec<FieldValue> = vec![
            "2024-11-15".into(),
            "not a date".into(),
            "42".into(),
            "0".into(),
            "abc".into(),
            FieldValue::Null,
        ];
        let transforms: [fn(FieldValue) -> FieldValue; 3] = [date, integer, id];
        for transform in transforms {
            for input in &inputs {
                let once = transform(input.clone());
                let twice = transform(once.clone());
                assert_eq!(once, twice, "transform not idempotent for {:?}", input);
            }
        }
    }

    #[test]
    fn test_declared_kind_applies_after_transform() {
        let conformance = Conformance::new()
            .html2js("StartDate", |v| match v {
                FieldValue::Text(s) => FieldValue::Text(s.replace('/', "-")),
                other => other,
            })
            .date_field("StartDate");
        assert_eq!(
            conformance.to_record("StartDate", "2024/11/15".into()),
            FieldValue::Date(Some(ymd(2024, 11, 15)))
        );
    }

    #[test]
    fn test_unregistered_field_is_stored_verbatim() {
        let conformance = Conformance::new().date_field("StartDate");
        assert_eq!(conformance.kind_of("Title"), FieldKind::Text);
        assert_eq!(
            conformance.to_record("Title", " Sprint 1 ".into()),
            FieldValue::Text(" Sprint 1 ".to_string())
        );
    }

    #[test]
    fn test_to_input() {
        let conformance = Conformance::new()
            .html2js("ProjectID", id)
            .js2html("ProjectID", id_to_input)
            .date_field("StartDate");
        assert_eq!(conformance.to_input("ProjectID", &FieldValue::Null), "0");
        assert_eq!(conformance.to_input("ProjectID", &FieldValue::Integer(5)), "5");
        assert_eq!(
            conformance.to_input("StartDate", &FieldValue::Date(Some(ymd(2024, 12, 15)))),
            "2024-12-15"
        );
        let fields: Vec<&str> = conformance.fields().collect();
        assert_eq!(fields, vec!["ProjectID", "ProjectID", "StartDate"]);
    }
}

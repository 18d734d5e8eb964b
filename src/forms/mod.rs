//! Entry form state shared by both screens.
//!
//! A form is a [`FormSchema`] (a table of per-field rules) plus the current
//! values and which fields the user has been shown errors for.

pub mod rules;

use std::collections::{BTreeMap, BTreeSet};
use thiserror::Error;

pub use rules::{CONTACT_FORM, Field, FieldRule, FormSchema, PARTICIPANT_FORM};

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum FieldError {
    #[error("{0} is required")]
    Required(Field),

    #[error("{0} is not in the expected format")]
    Format(Field),
}

impl FieldError {
    pub fn field(&self) -> Field {
        match self {
            FieldError::Required(f) | FieldError::Format(f) => *f,
        }
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("Please fill all required fields correctly.")]
pub struct FormError {
    pub fields: Vec<FieldError>,
}

#[derive(Debug, Clone)]
pub struct FormState {
    schema: &'static FormSchema,
    values: BTreeMap<Field, String>,
    touched: BTreeSet<Field>,
}

impl FormState {
    pub fn new(schema: &'static FormSchema) -> Self {
        let mut form = Self {
            schema,
            values: BTreeMap::new(),
            touched: BTreeSet::new(),
        };
        form.reset();
        form
    }

    pub fn schema(&self) -> &'static FormSchema {
        self.schema
    }

    pub fn value(&self, field: Field) -> &str {
        self.values.get(&field).map(String::as_str).unwrap_or("")
    }

    /// Keystroke handler: strips characters the field does not allow and
    /// stores the result. Does not touch the field or validate; the caller
    /// writes the returned text back into its widget.
    pub fn input(&mut self, field: Field, raw: &str) -> String {
        let Some(rule) = self.schema.rule(field) else {
            log::warn!("ignoring input for {field:?}, not part of this form");
            return raw.to_string();
        };
        let cleaned = rule.scrub(raw);
        self.values.insert(field, cleaned.clone());
        cleaned
    }

    pub fn reset(&mut self) {
        self.values = self
            .schema
            .rules
            .iter()
            .map(|r| (r.field, r.initial.to_string()))
            .collect();
        self.touched.clear();
    }

    pub fn mark_all_touched(&mut self) {
        self.touched.extend(self.schema.fields());
    }

    pub fn is_touched(&self, field: Field) -> bool {
        self.touched.contains(&field)
    }

    pub fn errors(&self) -> Vec<FieldError> {
        self.schema
            .rules
            .iter()
            .filter_map(|rule| check_field(rule, self.value(rule.field)))
            .collect()
    }

    /// Errors for fields the user has already been told about.
    pub fn visible_errors(&self) -> Vec<FieldError> {
        self.errors()
            .into_iter()
            .filter(|e| self.is_touched(e.field()))
            .collect()
    }

    pub fn validate(&self) -> Result<(), FormError> {
        let fields = self.errors();
        if fields.is_empty() {
            Ok(())
        } else {
            Err(FormError { fields })
        }
    }
}

fn check_field(rule: &FieldRule, value: &str) -> Option<FieldError> {
    if value.is_empty() {
        return rule.required.then_some(FieldError::Required(rule.field));
    }
    match rule.check {
        Some(check) if !check(value) => Some(FieldError::Format(rule.field)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled_contact() -> FormState {
        let mut form = FormState::new(&CONTACT_FORM);
        form.input(Field::Name, "Jo Smith");
        form.input(Field::Ndis, "123456789");
        form.input(Field::State, "NSW");
        form.input(Field::Status, "active");
        form
    }

    #[test]
    fn new_form_starts_from_initial_values() {
        let form = FormState::new(&CONTACT_FORM);
        assert_eq!(form.value(Field::Name), "");
        assert_eq!(form.value(Field::ServiceType), rules::DEFAULT_SERVICE_TYPE);
    }

    #[test]
    fn input_stores_scrubbed_value_without_touching() {
        let mut form = FormState::new(&CONTACT_FORM);
        assert_eq!(form.input(Field::Ndis, "12a3"), "123");
        assert_eq!(form.value(Field::Ndis), "123");
        assert!(!form.is_touched(Field::Ndis));
        assert!(form.visible_errors().is_empty());
    }

    #[test]
    fn empty_form_reports_every_required_field() {
        let err = FormState::new(&CONTACT_FORM).validate().unwrap_err();
        let fields: Vec<_> = err.fields.iter().map(FieldError::field).collect();
        assert_eq!(fields, vec![Field::Name, Field::Ndis, Field::State, Field::Status]);
        assert!(err.fields.iter().all(|e| matches!(e, FieldError::Required(_))));
    }

    #[test]
    fn filled_contact_form_is_valid() {
        let form = filled_contact();
        assert!(form.validate().is_ok());
    }

    #[test]
    fn short_ndis_is_a_format_error() {
        let mut form = filled_contact();
        form.input(Field::Ndis, "1234");
        assert_eq!(form.errors(), vec![FieldError::Format(Field::Ndis)]);
    }

    #[test]
    fn blank_email_passes_but_bad_email_fails() {
        let mut form = filled_contact();
        form.input(Field::Email, "");
        assert!(form.errors().is_empty());
        form.input(Field::Email, "not-an-email");
        assert_eq!(form.errors(), vec![FieldError::Format(Field::Email)]);
    }

    #[test]
    fn contact_status_rejects_other_words() {
        let mut form = filled_contact();
        form.input(Field::Status, "pending");
        assert_eq!(form.errors(), vec![FieldError::Format(Field::Status)]);
    }

    #[test]
    fn mark_all_touched_exposes_errors() {
        let mut form = FormState::new(&PARTICIPANT_FORM);
        form.mark_all_touched();
        assert_eq!(form.visible_errors().len(), 4);
        form.reset();
        assert!(form.visible_errors().is_empty());
    }

    #[test]
    fn input_for_unknown_field_is_ignored() {
        let mut form = FormState::new(&PARTICIPANT_FORM);
        assert_eq!(form.input(Field::Email, "x@y.z"), "x@y.z");
        assert_eq!(form.value(Field::Email), "");
    }

    #[test]
    fn form_error_message() {
        let err = FormState::new(&PARTICIPANT_FORM).validate().unwrap_err();
        assert_eq!(err.to_string(), "Please fill all required fields correctly.");
        assert_eq!(err.fields[0].to_string(), "Name is required");
    }
}

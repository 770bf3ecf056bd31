//! Form state and client-side validation
//!
//! Validation errors stay inside the form: a form that does not validate
//! never produces a request.

pub mod consent;
pub mod health_event;
pub mod medication;

pub use consent::ConsentForm;
pub use health_event::{HealthEventForm, SupplyDraft};
pub use medication::{MedicationForm, MedicineDraft};

use std::collections::BTreeMap;
use std::fmt;

use validator::{Validate, ValidationError, ValidationErrors, ValidationErrorsKind};

/// Key for errors that belong to the whole form rather than one field
pub const FORM_LEVEL: &str = "__all__";

/// Field-level error messages, keyed by field path (`email`,
/// `medicines[1].dosage`, `__all__`)
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormErrors {
    fields: BTreeMap<String, Vec<String>>,
}

impl FormErrors {
    pub fn add(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.fields.entry(field.into()).or_default().push(message.into());
    }

    /// Append every message of `other`
    pub fn merge(&mut self, other: FormErrors) {
        for (field, messages) in other.fields {
            self.fields.entry(field).or_default().extend(messages);
        }
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Messages for one field (empty when the field is fine)
    pub fn field(&self, name: &str) -> &[String] {
        self.fields.get(name).map(Vec::as_slice).unwrap_or_default()
    }

    pub fn has(&self, name: &str) -> bool {
        self.fields.contains_key(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v.as_slice()))
    }

    /// Errors of one entry of a list field, with the `list[index].`
    /// prefix stripped
    pub fn for_row(&self, list: &str, index: usize) -> FormErrors {
        let prefix = format!("{}[{}].", list, index);
        let fields = self
            .fields
            .iter()
            .filter_map(|(k, v)| k.strip_prefix(&prefix).map(|rest| (rest.to_string(), v.clone())))
            .collect();
        FormErrors { fields }
    }

    /// One line per field, for an alert
    pub fn summary(&self) -> String {
        self.fields
            .iter()
            .map(|(field, messages)| {
                if field == FORM_LEVEL {
                    messages.join(", ")
                } else {
                    format!("{}: {}", field, messages.join(", "))
                }
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Flatten `validator` output into field paths
    pub fn from_validation(errors: &ValidationErrors) -> Self {
        let mut out = Self::default();
        collect(&mut out, "", errors);
        out
    }
}

impl fmt::Display for FormErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.summary())
    }
}

impl From<ValidationErrors> for FormErrors {
    fn from(errors: ValidationErrors) -> Self {
        Self::from_validation(&errors)
    }
}

fn collect(out: &mut FormErrors, prefix: &str, errors: &ValidationErrors) {
    for (field, kind) in errors.errors() {
        let field: &str = &**field;
        let path = match (prefix.is_empty(), field == FORM_LEVEL) {
            (true, _) => field.to_string(),
            (false, true) => prefix.to_string(),
            (false, false) => format!("{}.{}", prefix, field),
        };
        match kind {
            ValidationErrorsKind::Field(list) => {
                for err in list {
                    out.add(path.clone(), message_for(err));
                }
            }
            ValidationErrorsKind::Struct(inner) => collect(out, &path, inner),
            ValidationErrorsKind::List(items) => {
                for (index, inner) in items {
                    collect(out, &format!("{}[{}]", path, index), inner);
                }
            }
        }
    }
}

fn message_for(err: &ValidationError) -> String {
    if let Some(message) = &err.message {
        return message.to_string();
    }
    match &*err.code {
        "email" => "is not a valid email address".to_string(),
        "length" => "has an invalid length".to_string(),
        "range" => "is out of range".to_string(),
        "required" => "is required".to_string(),
        other => other.replace('_', " "),
    }
}

/// Run `validator` on a payload and convert the outcome
pub fn validate_form<T: Validate>(payload: &T) -> Result<(), FormErrors> {
    payload.validate().map_err(FormErrors::from)
}

/// Optional text input: blank means absent
pub(crate) fn optional_text(text: &str) -> Option<String> {
    let text = text.trim();
    (!text.is_empty()).then(|| text.to_string())
}

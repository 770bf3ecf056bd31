//! Vaccination consent Model

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use crate::validation::{MAX_NOTE_LEN, validate_not_blank};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ConsentDecision {
    #[default]
    Pending,
    Approved,
    Declined,
}

impl ConsentDecision {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::Approved => "Approved",
            Self::Declined => "Declined",
        }
    }
}

/// Vaccination session scheduled by the school
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VaccinationSession {
    pub id: String,
    pub vaccine_name: String,
    pub scheduled_date: NaiveDate,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

/// A parent's decision for one student and one session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConsentRecord {
    pub session_id: String,
    pub student_id: String,
    pub student_name: String,
    pub vaccine_name: String,
    pub scheduled_date: NaiveDate,
    #[serde(default)]
    pub decision: ConsentDecision,
    #[serde(default)]
    pub reason: Option<String>,
    #[serde(default)]
    pub responded_at: Option<DateTime<Utc>>,
}

impl ConsentRecord {
    pub fn is_answered(&self) -> bool {
        self.decision != ConsentDecision::Pending
    }
}

/// Submit consent payload
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
#[validate(schema(function = "validate_consent_decision", skip_on_field_errors = false))]
pub struct ConsentSubmit {
    #[validate(custom(function = "validate_not_blank"))]
    pub session_id: String,
    #[validate(custom(function = "validate_not_blank"))]
    pub student_id: String,
    pub decision: ConsentDecision,
    #[validate(length(max = MAX_NOTE_LEN))]
    pub reason: Option<String>,
}

fn validate_consent_decision(submit: &ConsentSubmit) -> Result<(), ValidationError> {
    match submit.decision {
        ConsentDecision::Pending => Err(ValidationError::new("decision")
            .with_message("please approve or decline".into())),
        ConsentDecision::Declined
            if submit.reason.as_deref().is_none_or(|r| r.trim().is_empty()) =>
        {
            Err(ValidationError::new("reason")
                .with_message("a reason is required when declining".into()))
        }
        _ => Ok(()),
    }
}

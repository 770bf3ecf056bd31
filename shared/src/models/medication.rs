//! Medication supplementation Model
//!
//! Parents send medicine for their child together with dosage
//! instructions; the school nurse reviews the request.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use crate::validation::{MAX_NOTE_LEN, MAX_SHORT_TEXT_LEN, validate_not_blank};

/// Filter key for the request status column
pub const MEDICATION_STATUS_FILTER: &str = "status";

/// Most doses a request may schedule per day
pub const MAX_DOSES_PER_DAY: u8 = 6;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum MedicationRequestStatus {
    #[default]
    Pending,
    Approved,
    Rejected,
    Completed,
}

impl MedicationRequestStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::Approved => "Approved",
            Self::Rejected => "Rejected",
            Self::Completed => "Completed",
        }
    }

    /// Only pending requests can be reviewed
    pub fn is_reviewable(&self) -> bool {
        matches!(self, Self::Pending)
    }
}

/// One medicine line of a request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct MedicineItem {
    #[validate(
        custom(function = "validate_not_blank"),
        length(max = MAX_SHORT_TEXT_LEN)
    )]
    pub medicine_name: String,
    #[validate(
        custom(function = "validate_not_blank"),
        length(max = MAX_SHORT_TEXT_LEN)
    )]
    pub dosage: String,
    #[validate(range(min = 1, max = MAX_DOSES_PER_DAY))]
    pub times_per_day: u8,
    #[validate(range(min = 1))]
    pub quantity: u32,
    #[serde(default)]
    #[validate(length(max = MAX_NOTE_LEN))]
    pub instructions: Option<String>,
}

/// Create medication request payload
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
#[validate(schema(function = "validate_medication_dates", skip_on_field_errors = false))]
pub struct MedicationRequestCreate {
    #[validate(custom(function = "validate_not_blank"))]
    pub student_id: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    #[validate(length(max = MAX_NOTE_LEN))]
    pub note: Option<String>,
    #[validate(length(min = 1), nested)]
    pub medicines: Vec<MedicineItem>,
}

fn validate_medication_dates(request: &MedicationRequestCreate) -> Result<(), ValidationError> {
    if request.end_date < request.start_date {
        return Err(ValidationError::new("date_range")
            .with_message("end date must not be before start date".into()));
    }
    Ok(())
}

/// Medication request row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MedicationRequest {
    pub id: String,
    pub student_id: String,
    pub student_name: String,
    #[serde(default)]
    pub parent_name: Option<String>,
    #[serde(default)]
    pub status: MedicationRequestStatus,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    #[serde(default)]
    pub note: Option<String>,
    #[serde(default)]
    pub medicines: Vec<MedicineItem>,
    #[serde(default)]
    pub review_note: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

/// Nurse decision on a pending request
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct MedicationReview {
    pub approved: bool,
    #[validate(length(max = MAX_NOTE_LEN))]
    pub note: Option<String>,
}

//! Health event Model
//!
//! Incidents recorded by the school nurse, with the medical supplies used.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::validation::{MAX_NOTE_LEN, MAX_SHORT_TEXT_LEN, validate_not_blank};

/// Filter key for the event type column
pub const EVENT_TYPE_FILTER: &str = "eventType";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HealthEventType {
    Accident,
    Fever,
    Fall,
    Epidemic,
    Other,
}

impl HealthEventType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Accident => "Accident",
            Self::Fever => "Fever",
            Self::Fall => "Fall",
            Self::Epidemic => "Epidemic",
            Self::Other => "Other",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Severity {
    #[default]
    Low,
    Medium,
    High,
}

/// Medical supply consumed while handling an event
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SupplyUsage {
    #[validate(custom(function = "validate_not_blank"))]
    pub supply_id: String,
    #[validate(range(min = 1))]
    pub quantity: u32,
}

/// Create health event payload
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct HealthEventCreate {
    #[validate(custom(function = "validate_not_blank"))]
    pub student_id: String,
    pub event_type: HealthEventType,
    pub severity: Severity,
    #[validate(
        custom(function = "validate_not_blank"),
        length(max = MAX_NOTE_LEN)
    )]
    pub description: String,
    pub occurred_at: DateTime<Utc>,
    #[validate(length(max = MAX_SHORT_TEXT_LEN))]
    pub location: Option<String>,
    #[validate(length(max = MAX_NOTE_LEN))]
    pub actions_taken: Option<String>,
    #[validate(nested)]
    pub supplies: Vec<SupplyUsage>,
}

/// Health event row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthEvent {
    pub id: String,
    pub student_id: String,
    pub student_name: String,
    pub event_type: HealthEventType,
    #[serde(default)]
    pub severity: Severity,
    pub description: String,
    pub occurred_at: DateTime<Utc>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub actions_taken: Option<String>,
    #[serde(default)]
    pub nurse_name: Option<String>,
}

/// Supply the nurse can pick from when recording an event
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SupplyOption {
    pub id: String,
    pub name: String,
    pub available: u32,
}

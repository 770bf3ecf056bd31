//! Staff Model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use validator::Validate;

use super::UnknownVariant;
use crate::validation::{MAX_EMAIL_LEN, MAX_NAME_LEN, validate_not_blank, validate_phone};

/// Staff position; staff accounts are never parents
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StaffRole {
    Admin,
    Manager,
    Nurse,
}

impl StaffRole {
    pub const ALL: [StaffRole; 3] = [Self::Admin, Self::Manager, Self::Nurse];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Admin => "Admin",
            Self::Manager => "Manager",
            Self::Nurse => "Nurse",
        }
    }
}

impl fmt::Display for StaffRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StaffRole {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|role| role.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| UnknownVariant::new("staff role", s))
    }
}

/// Staff member row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Staff {
    pub id: String,
    pub full_name: String,
    pub email: String,
    #[serde(default)]
    pub phone_number: Option<String>,
    pub role: StaffRole,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

/// Create staff payload
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct StaffCreate {
    #[validate(
        custom(function = "validate_not_blank"),
        length(max = MAX_NAME_LEN)
    )]
    pub full_name: String,
    #[validate(email, length(max = MAX_EMAIL_LEN))]
    pub email: String,
    #[validate(custom(function = "validate_phone"))]
    pub phone_number: String,
    pub role: StaffRole,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft() -> StaffCreate {
        StaffCreate {
            full_name: "Nguyen Van An".to_string(),
            email: "an@school.edu".to_string(),
            phone_number: "0912345678".to_string(),
            role: StaffRole::Nurse,
        }
    }

    #[test]
    fn test_valid_staff_passes() {
        assert!(draft().validate().is_ok());
    }

    #[test]
    fn test_invalid_staff_reports_fields() {
        let mut payload = draft();
        payload.full_name = "  ".to_string();
        payload.email = "not-an-email".to_string();
        payload.phone_number = "12".to_string();

        let errors = payload.validate().unwrap_err();
        let fields = errors.field_errors();
        assert!(fields.contains_key("full_name"));
        assert!(fields.contains_key("email"));
        assert!(fields.contains_key("phone_number"));
    }

    #[test]
    fn test_staff_create_serializes_camel_case() {
        let json = serde_json::to_value(draft()).unwrap();
        assert_eq!(json["fullName"], "Nguyen Van An");
        assert_eq!(json["phoneNumber"], "0912345678");
        assert_eq!(json["role"], "Nurse");
    }
}

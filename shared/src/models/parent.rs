//! Parent Model

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use validator::Validate;

use super::UnknownVariant;
use crate::validation::{
    MAX_ADDRESS_LEN, MAX_EMAIL_LEN, MAX_NAME_LEN, validate_not_blank, validate_phone,
};

/// Filter key for the relationship column
pub const RELATIONSHIP_FILTER: &str = "relationship";

/// Relationship of the parent account to its students
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Relationship {
    Father,
    Mother,
    Guardian,
    Other,
}

impl Relationship {
    pub const ALL: [Relationship; 4] = [Self::Father, Self::Mother, Self::Guardian, Self::Other];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Father => "Father",
            Self::Mother => "Mother",
            Self::Guardian => "Guardian",
            Self::Other => "Other",
        }
    }
}

impl fmt::Display for Relationship {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Relationship {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|r| r.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| UnknownVariant::new("relationship", s))
    }
}

/// Student linked to a parent account
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentSummary {
    pub id: String,
    pub full_name: String,
    #[serde(default)]
    pub class_name: Option<String>,
}

/// Parent row of the parent management screen
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Parent {
    pub id: String,
    pub full_name: String,
    pub email: String,
    #[serde(default)]
    pub phone_number: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    pub relationship: Relationship,
    #[serde(default)]
    pub students: Vec<StudentSummary>,
}

/// Create parent payload
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ParentCreate {
    #[validate(
        custom(function = "validate_not_blank"),
        length(max = MAX_NAME_LEN)
    )]
    pub full_name: String,
    #[validate(email, length(max = MAX_EMAIL_LEN))]
    pub email: String,
    #[validate(custom(function = "validate_phone"))]
    pub phone_number: String,
    #[validate(length(max = MAX_ADDRESS_LEN))]
    pub address: Option<String>,
    pub relationship: Relationship,
}

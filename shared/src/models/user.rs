//! User account Model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::UnknownVariant;

/// Filter key for the role column
pub const ROLE_FILTER: &str = "role";
/// Filter key for the status column
pub const STATUS_FILTER: &str = "status";

/// Account role as the backend names it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UserRole {
    Admin,
    Manager,
    Nurse,
    Parent,
}

impl UserRole {
    pub const ALL: [UserRole; 4] = [Self::Admin, Self::Manager, Self::Nurse, Self::Parent];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Admin => "Admin",
            Self::Manager => "Manager",
            Self::Nurse => "Nurse",
            Self::Parent => "Parent",
        }
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for UserRole {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|role| role.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| UnknownVariant::new("role", s))
    }
}

/// Whether the account may sign in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum UserStatus {
    #[default]
    Active,
    Inactive,
}

impl UserStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "Active",
            Self::Inactive => "Inactive",
        }
    }
}

/// User account row of the user list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserAccount {
    pub id: String,
    pub full_name: String,
    pub email: String,
    #[serde(default)]
    pub phone_number: Option<String>,
    pub role: UserRole,
    #[serde(default)]
    pub status: UserStatus,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_parse_is_case_insensitive() {
        assert_eq!("nurse".parse::<UserRole>().unwrap(), UserRole::Nurse);
        assert_eq!("ADMIN".parse::<UserRole>().unwrap(), UserRole::Admin);
        let err = "janitor".parse::<UserRole>().unwrap_err();
        assert_eq!(err.to_string(), "unknown role: janitor");
    }

    #[test]
    fn test_user_account_decodes_camel_case() {
        let json = r#"{
            "id": "u-1",
            "fullName": "Tran Thi Lan",
            "email": "lan@school.edu",
            "role": "Nurse",
            "createdAt": "2024-09-01T08:00:00Z"
        }"#;
        let user: UserAccount = serde_json::from_str(json).unwrap();
        assert_eq!(user.full_name, "Tran Thi Lan");
        assert_eq!(user.role, UserRole::Nurse);
        assert_eq!(user.status, UserStatus::Active);
        assert!(user.phone_number.is_none());
        assert!(user.created_at.is_some());
    }
}

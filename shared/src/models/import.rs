//! Spreadsheet import Model

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Per-row result of a spreadsheet import
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportSummary {
    #[serde(default)]
    pub total_rows: u32,
    #[serde(default)]
    pub success_rows: u32,
    #[serde(default)]
    pub error_rows: u32,
    /// Rows the backend accepted, as the backend echoes them
    #[serde(default)]
    pub valid_data: Vec<Value>,
    /// Rows the backend rejected
    #[serde(default)]
    pub invalid_data: Vec<Value>,
    #[serde(default)]
    pub errors: Vec<String>,
}

impl ImportSummary {
    /// At least one row was stored, so the list is out of date
    pub fn has_successes(&self) -> bool {
        self.success_rows > 0
    }

    /// Counts add up
    pub fn is_consistent(&self) -> bool {
        self.success_rows + self.error_rows == self.total_rows
    }
}

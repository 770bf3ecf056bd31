//! Health event entry form.

use chrono::{DateTime, Utc};
use shared::models::{HealthEventCreate, HealthEventType, Severity, SupplyOption, SupplyUsage};

use super::{FormErrors, optional_text, validate_form};
use crate::rows::{RowArena, RowId};

const SUPPLIES_FIELD: &str = "supplies";

/// A supply line; `supply_id` is set once a supply is picked from the list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SupplyDraft {
    pub supply_id: String,
    pub quantity: u32,
}

impl Default for SupplyDraft {
    fn default() -> Self {
        Self {
            supply_id: String::new(),
            quantity: 1,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct HealthEventForm {
    pub student_id: String,
    pub event_type: Option<HealthEventType>,
    pub severity: Severity,
    pub description: String,
    pub occurred_at: Option<DateTime<Utc>>,
    pub location: String,
    pub actions_taken: String,
    supplies: RowArena<SupplyDraft>,
    errors: FormErrors,
}

impl HealthEventForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn supplies(&self) -> &RowArena<SupplyDraft> {
        &self.supplies
    }

    pub fn add_supply(&mut self) -> RowId {
        self.supplies.add(SupplyDraft::default())
    }

    pub fn remove_supply(&mut self, id: RowId) -> bool {
        self.supplies.remove(id).is_some()
    }

    pub fn set_quantity(&mut self, id: RowId, quantity: u32) {
        if let Some(row) = self.supplies.get_mut(id) {
            row.data.quantity = quantity;
        }
    }

    /// Typing into a row's supply box. Editing the text un-picks the
    /// previously chosen supply.
    pub fn search_supply(&mut self, id: RowId, text: &str, options: &[SupplyOption]) {
        if let Some(row) = self.supplies.get_mut(id) {
            row.data.supply_id.clear();
            row.ui.search(text, options.iter().map(|o| o.name.as_str()));
        }
    }

    /// Pick suggestion `index` of a row and resolve it to a supply id
    pub fn select_supply<'a>(
        &mut self,
        id: RowId,
        index: usize,
        options: &'a [SupplyOption],
    ) -> Option<&'a SupplyOption> {
        let row = self.supplies.get_mut(id)?;
        let name = row.ui.select(index)?;
        let option = options.iter().find(|o| o.name == name)?;
        row.data.supply_id = option.id.clone();
        Some(option)
    }

    fn missing_fields(&self) -> FormErrors {
        let mut missing = FormErrors::default();
        if self.event_type.is_none() {
            missing.add("event_type", "is required");
        }
        if self.occurred_at.is_none() {
            missing.add("occurred_at", "is required");
        }
        missing
    }

    /// Payload with placeholders for unset selections, so the remaining
    /// fields can be checked before they are picked
    fn draft_payload(&self) -> HealthEventCreate {
        HealthEventCreate {
            student_id: self.student_id.trim().to_string(),
            event_type: self.event_type.unwrap_or(HealthEventType::Other),
            severity: self.severity,
            description: self.description.trim().to_string(),
            occurred_at: self.occurred_at.unwrap_or_default(),
            location: optional_text(&self.location),
            actions_taken: optional_text(&self.actions_taken),
            supplies: self
                .supplies
                .data()
                .map(|d| SupplyUsage {
                    supply_id: d.supply_id.clone(),
                    quantity: d.quantity,
                })
                .collect(),
        }
    }

    pub fn to_payload(&self) -> Result<HealthEventCreate, FormErrors> {
        let missing = self.missing_fields();
        if missing.is_empty() {
            Ok(self.draft_payload())
        } else {
            Err(missing)
        }
    }

    /// Validate against the current stock and produce the payload
    pub fn validate(&mut self, options: &[SupplyOption]) -> Result<HealthEventCreate, FormErrors> {
        let payload = self.draft_payload();
        let mut errors = self.missing_fields();
        if let Err(invalid) = validate_form(&payload) {
            errors.merge(invalid);
        }
        for (index, usage) in payload.supplies.iter().enumerate() {
            let stock = options.iter().find(|o| o.id == usage.supply_id);
            if let Some(stock) = stock
                && usage.quantity > stock.available
            {
                errors.add(
                    format!("{}[{}].quantity", SUPPLIES_FIELD, index),
                    format!("only {} left in stock", stock.available),
                );
            }
        }
        let result = if errors.is_empty() {
            Ok(payload)
        } else {
            Err(errors)
        };
        self.errors = match &result {
            Ok(_) => FormErrors::default(),
            Err(errors) => errors.clone(),
        };
        result
    }

    pub fn errors(&self) -> &FormErrors {
        &self.errors
    }

    pub fn row_errors(&self, id: RowId) -> FormErrors {
        self.supplies
            .position(id)
            .map(|index| self.errors.for_row(SUPPLIES_FIELD, index))
            .unwrap_or_default()
    }
}

//! Medication supplementation form.

use chrono::NaiveDate;
use shared::models::{MedicationRequestCreate, MedicineItem};

use super::{FormErrors, optional_text, validate_form};
use crate::rows::{RowArena, RowId};

const MEDICINES_FIELD: &str = "medicines";

/// One medicine line as typed by the parent
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MedicineDraft {
    pub medicine_name: String,
    pub dosage: String,
    pub times_per_day: u8,
    pub quantity: u32,
    pub instructions: String,
}

impl Default for MedicineDraft {
    fn default() -> Self {
        Self {
            medicine_name: String::new(),
            dosage: String::new(),
            times_per_day: 1,
            quantity: 1,
            instructions: String::new(),
        }
    }
}

impl MedicineDraft {
    fn to_item(&self) -> MedicineItem {
        MedicineItem {
            medicine_name: self.medicine_name.trim().to_string(),
            dosage: self.dosage.trim().to_string(),
            times_per_day: self.times_per_day,
            quantity: self.quantity,
            instructions: optional_text(&self.instructions),
        }
    }
}

/// State of the "send medicine" form. Always holds at least one medicine
/// row.
#[derive(Debug, Clone)]
pub struct MedicationForm {
    pub student_id: String,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub note: String,
    medicines: RowArena<MedicineDraft>,
    errors: FormErrors,
}

impl Default for MedicationForm {
    fn default() -> Self {
        Self::new()
    }
}

impl MedicationForm {
    pub fn new() -> Self {
        let mut medicines = RowArena::new();
        medicines.add(MedicineDraft::default());
        Self {
            student_id: String::new(),
            start_date: None,
            end_date: None,
            note: String::new(),
            medicines,
            errors: FormErrors::default(),
        }
    }

    pub fn medicines(&self) -> &RowArena<MedicineDraft> {
        &self.medicines
    }

    pub fn add_medicine(&mut self) -> RowId {
        self.medicines.add(MedicineDraft::default())
    }

    /// Remove a medicine row. The last remaining row cannot be removed.
    pub fn remove_medicine(&mut self, id: RowId) -> bool {
        if self.medicines.len() <= 1 {
            return false;
        }
        self.medicines.remove(id).is_some()
    }

    pub fn medicine_mut(&mut self, id: RowId) -> Option<&mut MedicineDraft> {
        self.medicines.get_mut(id).map(|row| &mut row.data)
    }

    /// Typing into a row's medicine box: the text is kept as the name and
    /// matching catalog entries are offered in that row only.
    pub fn search_medicine<'a, I>(&mut self, id: RowId, text: &str, catalog: I)
    where
        I: IntoIterator<Item = &'a str>,
    {
        if let Some(row) = self.medicines.get_mut(id) {
            row.data.medicine_name = text.to_string();
            row.ui.search(text, catalog);
        }
    }

    /// Pick suggestion `index` of a row
    pub fn select_suggestion(&mut self, id: RowId, index: usize) -> Option<String> {
        let row = self.medicines.get_mut(id)?;
        let picked = row.ui.select(index)?;
        row.data.medicine_name = picked.clone();
        Some(picked)
    }

    fn missing_dates(&self) -> FormErrors {
        let mut missing = FormErrors::default();
        if self.start_date.is_none() {
            missing.add("start_date", "is required");
        }
        if self.end_date.is_none() {
            missing.add("end_date", "is required");
        }
        missing
    }

    /// Payload with an unset date standing in for the other one, so the
    /// remaining fields can be checked before both dates are picked
    fn draft_payload(&self) -> MedicationRequestCreate {
        let fallback = self.start_date.or(self.end_date).unwrap_or_default();
        MedicationRequestCreate {
            student_id: self.student_id.trim().to_string(),
            start_date: self.start_date.unwrap_or(fallback),
            end_date: self.end_date.unwrap_or(fallback),
            note: optional_text(&self.note),
            medicines: self.medicines.data().map(MedicineDraft::to_item).collect(),
        }
    }

    /// Build the request payload without validating it
    pub fn to_payload(&self) -> Result<MedicationRequestCreate, FormErrors> {
        let missing = self.missing_dates();
        if missing.is_empty() {
            Ok(self.draft_payload())
        } else {
            Err(missing)
        }
    }

    /// Validate and produce the payload. Every field and row is checked
    /// even when a date is missing. Errors are kept for
    /// [`errors`](Self::errors) and [`row_errors`](Self::row_errors).
    pub fn validate(&mut self) -> Result<MedicationRequestCreate, FormErrors> {
        let payload = self.draft_payload();
        let mut errors = self.missing_dates();
        if let Err(invalid) = validate_form(&payload) {
            errors.merge(invalid);
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

    /// Errors of one medicine row, keyed by field name
    pub fn row_errors(&self, id: RowId) -> FormErrors {
        self.medicines
            .position(id)
            .map(|index| self.errors.for_row(MEDICINES_FIELD, index))
            .unwrap_or_default()
    }

    pub fn reset(&mut self) {
        *self = Self::new();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CATALOG: [&str; 3] = ["Paracetamol 250mg", "Paracetamol 500mg", "Vitamin C"];

    fn filled() -> (MedicationForm, RowId) {
        let mut form = MedicationForm::new();
        form.student_id = "s-1".to_string();
        form.start_date = NaiveDate::from_ymd_opt(2024, 10, 1);
        form.end_date = NaiveDate::from_ymd_opt(2024, 10, 3);
        let first = form.medicines().ids()[0];
        let draft = form.medicine_mut(first).unwrap();
        draft.medicine_name = "Vitamin C".to_string();
        draft.dosage = "1 tablet".to_string();
        (form, first)
    }

    #[test]
    fn test_valid_form_produces_payload() {
        let (mut form, _) = filled();
        form.note = "  ".to_string();
        let payload = form.validate().unwrap();
        assert_eq!(payload.medicines.len(), 1);
        assert_eq!(payload.note, None);
        assert!(form.errors().is_empty());
    }

    #[test]
    fn test_last_row_cannot_be_removed() {
        let (mut form, first) = filled();
        assert!(!form.remove_medicine(first));
        let second = form.add_medicine();
        assert!(form.remove_medicine(first));
        assert_eq!(form.medicines().ids(), vec![second]);
    }

    #[test]
    fn test_row_errors_follow_row_after_removal() {
        let (mut form, first) = filled();
        let second = form.add_medicine();
        let third = form.add_medicine();
        form.medicine_mut(third).unwrap().medicine_name = "Oresol".to_string();

        let errors = form.validate().unwrap_err();
        assert!(errors.has("medicines[1].medicine_name"));
        assert!(errors.has("medicines[2].dosage"));
        assert!(form.row_errors(first).is_empty());
        assert!(form.row_errors(second).has("medicine_name"));
        assert!(!form.row_errors(third).has("medicine_name"));
        assert!(form.row_errors(third).has("dosage"));

        form.remove_medicine(second);
        let errors = form.validate().unwrap_err();
        assert!(errors.has("medicines[1].dosage"));
        assert!(form.row_errors(third).has("dosage"));
    }

    #[test]
    fn test_missing_dates_are_reported() {
        let mut form = MedicationForm::new();
        let errors = form.validate().unwrap_err();
        assert!(errors.has("start_date"));
        assert!(errors.has("end_date"));
        assert!(form.to_payload().is_err());
    }

    #[test]
    fn test_empty_form_reports_every_field() {
        let mut form = MedicationForm::new();
        let first = form.medicines().ids()[0];
        let errors = form.validate().unwrap_err();
        assert!(errors.has("student_id"));
        assert!(errors.has("medicines[0].medicine_name"));
        assert!(errors.has("medicines[0].dosage"));
        assert!(form.row_errors(first).has("medicine_name"));
    }

    #[test]
    fn test_date_range_checked_with_field_errors() {
        let (mut form, first) = filled();
        form.end_date = NaiveDate::from_ymd_opt(2024, 9, 30);
        form.medicine_mut(first).unwrap().dosage.clear();
        let errors = form.validate().unwrap_err();
        assert!(errors.has("medicines[0].dosage"));
        assert_eq!(
            errors.field(crate::forms::FORM_LEVEL),
            ["end date must not be before start date".to_string()]
        );
    }

    #[test]
    fn test_one_missing_date_keeps_other_checks() {
        let (mut form, _) = filled();
        form.start_date = None;
        form.student_id.clear();
        let errors = form.validate().unwrap_err();
        assert!(errors.has("start_date"));
        assert!(errors.has("student_id"));
        assert!(!errors.has(crate::forms::FORM_LEVEL));
    }

    #[test]
    fn test_search_and_select_in_one_row() {
        let (mut form, first) = filled();
        let second = form.add_medicine();

        form.search_medicine(second, "para", CATALOG);
        assert_eq!(form.medicines().get(second).unwrap().ui.suggestions.len(), 2);
        assert!(!form.medicines().get(first).unwrap().ui.dropdown_open);

        assert_eq!(
            form.select_suggestion(second, 1).as_deref(),
            Some("Paracetamol 500mg")
        );
        let row = form.medicines().get(second).unwrap();
        assert_eq!(row.data.medicine_name, "Paracetamol 500mg");
        assert!(!row.ui.dropdown_open);
        assert_eq!(form.medicines().get(first).unwrap().data.medicine_name, "Vitamin C");
    }
}

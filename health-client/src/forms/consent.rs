//! Vaccination consent form.

use shared::models::{ConsentDecision, ConsentRecord, ConsentSubmit};

use super::{FormErrors, optional_text, validate_form};

#[derive(Debug, Clone, PartialEq)]
pub struct ConsentForm {
    session_id: String,
    student_id: String,
    pub decision: ConsentDecision,
    pub reason: String,
}

impl ConsentForm {
    /// Prefill from the consent record as last saved
    pub fn from_record(record: &ConsentRecord) -> Self {
        Self {
            session_id: record.session_id.clone(),
            student_id: record.student_id.clone(),
            decision: record.decision,
            reason: record.reason.clone().unwrap_or_default(),
        }
    }

    pub fn session_id(&self) -> &str {
        &self.session_id
    }

    pub fn student_id(&self) -> &str {
        &self.student_id
    }

    pub fn approve(&mut self) {
        self.decision = ConsentDecision::Approved;
    }

    pub fn decline(&mut self, reason: impl Into<String>) {
        self.decision = ConsentDecision::Declined;
        self.reason = reason.into();
    }

    /// The reason is only sent with a decline
    pub fn validate(&self) -> Result<ConsentSubmit, FormErrors> {
        let payload = ConsentSubmit {
            session_id: self.session_id.clone(),
            student_id: self.student_id.clone(),
            decision: self.decision,
            reason: match self.decision {
                ConsentDecision::Declined => optional_text(&self.reason),
                _ => None,
            },
        };
        validate_form(&payload)?;
        Ok(payload)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn record() -> ConsentRecord {
        ConsentRecord {
            session_id: "vs-4".to_string(),
            student_id: "s-9".to_string(),
            student_name: "Tran Gia Han".to_string(),
            vaccine_name: "Measles".to_string(),
            scheduled_date: NaiveDate::from_ymd_opt(2024, 11, 5).unwrap(),
            decision: ConsentDecision::Pending,
            reason: None,
            responded_at: None,
        }
    }

    #[test]
    fn test_pending_form_does_not_submit() {
        let form = ConsentForm::from_record(&record());
        assert!(form.validate().is_err());
    }

    #[test]
    fn test_decline_requires_reason() {
        let mut form = ConsentForm::from_record(&record());
        form.decline("   ");
        let errors = form.validate().unwrap_err();
        assert_eq!(
            errors.summary(),
            "a reason is required when declining"
        );

        form.decline("Fever this week");
        let payload = form.validate().unwrap();
        assert_eq!(payload.reason.as_deref(), Some("Fever this week"));
        assert_eq!(payload.session_id, "vs-4");
    }

    #[test]
    fn test_approve_drops_reason() {
        let mut form = ConsentForm::from_record(&record());
        form.decline("Not sure");
        form.approve();
        let payload = form.validate().unwrap();
        assert_eq!(payload.decision, ConsentDecision::Approved);
        assert_eq!(payload.reason, None);
    }
}

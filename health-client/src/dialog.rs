//! Dialog state.
//!
//! A screen shows at most one dialog at a time; [`ActiveDialog`] names
//! which one, so combinations such as "confirm delete" over "add staff"
//! cannot be represented.

use shared::models::ImportSummary;

use crate::ClientError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlertKind {
    Success,
    Error,
    Info,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alert {
    pub kind: AlertKind,
    pub message: String,
}

/// The dialog currently on screen
#[derive(Debug, Clone, PartialEq, Default)]
pub enum ActiveDialog {
    #[default]
    None,
    ConfirmDelete {
        id: String,
        label: String,
    },
    AddStaff,
    AddParent,
    ImportResult(ImportSummary),
    ConsentForm {
        session_id: String,
        student_id: String,
    },
    MedicationReview {
        request_id: String,
    },
    HealthEventForm,
    Alert(Alert),
}

/// Owner of the single active dialog
#[derive(Debug, Clone, Default)]
pub struct DialogState {
    active: ActiveDialog,
}

impl DialogState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn active(&self) -> &ActiveDialog {
        &self.active
    }

    pub fn is_open(&self) -> bool {
        !matches!(self.active, ActiveDialog::None)
    }

    /// Show `dialog`, replacing whatever was open
    pub fn open(&mut self, dialog: ActiveDialog) {
        self.active = dialog;
    }

    pub fn close(&mut self) {
        self.active = ActiveDialog::None;
    }

    /// Close and hand back the dialog that was open
    pub fn take(&mut self) -> ActiveDialog {
        std::mem::take(&mut self.active)
    }

    pub fn alert(&mut self, kind: AlertKind, message: impl Into<String>) {
        self.open(ActiveDialog::Alert(Alert {
            kind,
            message: message.into(),
        }));
    }

    pub fn success(&mut self, message: impl Into<String>) {
        self.alert(AlertKind::Success, message);
    }

    /// Route a failed operation into an error alert. Cancellations are
    /// dropped silently.
    pub fn error(&mut self, err: &ClientError) {
        if err.is_cancelled() {
            return;
        }
        self.alert(AlertKind::Error, err.user_message());
    }

    /// Delete target, when the confirm-delete dialog is open
    pub fn pending_delete(&self) -> Option<&str> {
        match &self.active {
            ActiveDialog::ConfirmDelete { id, .. } => Some(id.as_str()),
            _ => None,
        }
    }

    pub fn current_alert(&self) -> Option<&Alert> {
        match &self.active {
            ActiveDialog::Alert(alert) => Some(alert),
            _ => None,
        }
    }
}

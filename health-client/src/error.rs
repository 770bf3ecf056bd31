//! Client error types

use thiserror::Error;

use crate::forms::FormErrors;

/// Shown for transport failures instead of the raw error
pub const RETRY_MESSAGE: &str = "Could not reach the server. Please try again.";

/// Client error type
#[derive(Debug, Error)]
pub enum ClientError {
    /// HTTP request failed
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Invalid response format
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Authentication required
    #[error("Authentication required")]
    Unauthorized,

    /// Permission denied
    #[error("Permission denied: {0}")]
    Forbidden(String),

    /// Resource not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Server answered `success: false`
    #[error("{0}")]
    Business(String),

    /// Client-side form validation failed; nothing was sent
    #[error("Validation failed: {0}")]
    Validation(FormErrors),

    /// Request was aborted before it completed
    #[error("Request cancelled")]
    Cancelled,

    /// Unexpected server error
    #[error("Server error: {0}")]
    Internal(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl ClientError {
    /// Text for the alert dialog.
    ///
    /// Business failures are shown verbatim, transport failures get a
    /// generic retry hint.
    pub fn user_message(&self) -> String {
        match self {
            Self::Business(message) => message.clone(),
            Self::Validation(errors) => errors.summary(),
            Self::Unauthorized => "Your session has expired. Please sign in again.".to_string(),
            Self::Forbidden(_) => "You do not have permission to do this.".to_string(),
            Self::NotFound(_) => "The record no longer exists.".to_string(),
            Self::Cancelled => "Request cancelled".to_string(),
            Self::Http(_)
            | Self::InvalidResponse(_)
            | Self::Internal(_)
            | Self::Serialization(_) => RETRY_MESSAGE.to_string(),
        }
    }

    pub fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled)
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}

impl From<FormErrors> for ClientError {
    fn from(errors: FormErrors) -> Self {
        Self::Validation(errors)
    }
}

/// Result type for client operations
pub type ClientResult<T> = Result<T, ClientError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_business_message_is_verbatim() {
        let err = ClientError::Business("Email already registered".to_string());
        assert_eq!(err.user_message(), "Email already registered");
        assert_eq!(err.to_string(), "Email already registered");
    }

    #[test]
    fn test_transport_failures_use_retry_message() {
        let err = ClientError::Internal("502 Bad Gateway".to_string());
        assert_eq!(err.user_message(), RETRY_MESSAGE);
        let err = ClientError::InvalidResponse("missing data".to_string());
        assert_eq!(err.user_message(), RETRY_MESSAGE);
    }

    #[test]
    fn test_validation_message_lists_fields() {
        let mut errors = FormErrors::default();
        errors.add("email", "is not a valid email address");
        let err = ClientError::from(errors);
        assert!(err.is_validation());
        assert_eq!(err.user_message(), "email: is not a valid email address");
    }

    #[test]
    fn test_cancelled() {
        assert!(ClientError::Cancelled.is_cancelled());
        assert!(!ClientError::Unauthorized.is_cancelled());
    }
}

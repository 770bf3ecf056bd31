//! Input validation helpers
//!
//! Text length limits and custom validators shared by the form payloads.

use validator::ValidationError;

// ── Text length limits ──────────────────────────────────────────────

/// Person names: staff, parents, students
pub const MAX_NAME_LEN: u64 = 100;

/// Notes, descriptions, reasons (decline reason, review note, etc.)
pub const MAX_NOTE_LEN: u64 = 500;

/// Short text: dosage, frequency, location, medicine names
pub const MAX_SHORT_TEXT_LEN: u64 = 100;

/// Email addresses (RFC 5321)
pub const MAX_EMAIL_LEN: u64 = 254;

/// Addresses
pub const MAX_ADDRESS_LEN: u64 = 300;

const MIN_PHONE_DIGITS: usize = 9;
const MAX_PHONE_DIGITS: usize = 15;

// ── Custom validators ───────────────────────────────────────────────

/// Phone numbers: 9 to 15 digits, optionally prefixed with `+`.
pub fn validate_phone(value: &str) -> Result<(), ValidationError> {
    let digits = value.strip_prefix('+').unwrap_or(value);
    let well_formed = digits.chars().all(|c| c.is_ascii_digit())
        && (MIN_PHONE_DIGITS..=MAX_PHONE_DIGITS).contains(&digits.len());
    if well_formed {
        Ok(())
    } else {
        Err(ValidationError::new("phone").with_message("is not a valid phone number".into()))
    }
}

/// Rejects strings that are empty after trimming.
pub fn validate_not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("required").with_message("is required".into()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_phone() {
        assert!(validate_phone("0912345678").is_ok());
        assert!(validate_phone("+84912345678").is_ok());
        assert!(validate_phone("12345").is_err());
        assert!(validate_phone("09123-45678").is_err());
        assert!(validate_phone("").is_err());
        assert!(validate_phone("+").is_err());
    }

    #[test]
    fn test_validate_not_blank() {
        assert!(validate_not_blank("x").is_ok());
        assert!(validate_not_blank("   ").is_err());
        assert_eq!(validate_not_blank("").unwrap_err().code, "required");
    }
}

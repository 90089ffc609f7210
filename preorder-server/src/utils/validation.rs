//! Input validation helpers
//!
//! Centralized text length constants and validation functions.
//! SQLite TEXT has no built-in length enforcement, so limits live here.

use validator::ValidateEmail;

// ── Text length limits ──────────────────────────────────────────────

/// Customer names, WhatsApp handles
pub const MAX_NAME_LEN: usize = 200;

/// Notes fields (customer notes, staff notes)
pub const MAX_NOTE_LEN: usize = 500;

/// Email addresses (RFC 5321)
pub const MAX_EMAIL_LEN: usize = 254;

// ── Validation helpers ──────────────────────────────────────────────

/// Validate that a required string is non-empty and within the length limit.
pub fn validate_required_text(value: &str, field: &str, max_len: usize) -> Result<(), String> {
    if value.trim().is_empty() {
        return Err(format!("{field} must not be empty"));
    }
    if value.len() > max_len {
        return Err(format!(
            "{field} is too long ({} chars, max {max_len})",
            value.len()
        ));
    }
    Ok(())
}

/// Validate that an optional string, if present, is within the length limit.
pub fn validate_optional_text(
    value: &Option<String>,
    field: &str,
    max_len: usize,
) -> Result<(), String> {
    if let Some(v) = value
        && v.len() > max_len
    {
        return Err(format!(
            "{field} is too long ({} chars, max {max_len})",
            v.len()
        ));
    }
    Ok(())
}

/// Validate an email address shape. Empty strings are treated as absent by
/// the caller, so this only sees non-empty values.
pub fn validate_email(value: &str) -> Result<(), String> {
    if value.len() > MAX_EMAIL_LEN {
        return Err(format!(
            "customer_email is too long ({} chars, max {MAX_EMAIL_LEN})",
            value.len()
        ));
    }
    if !value.validate_email() {
        return Err("customer_email is not a valid email address".to_string());
    }
    Ok(())
}

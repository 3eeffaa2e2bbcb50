//! Input validation helpers
//!
//! Drafts are checked before any remote call so the endpoint never sees an
//! incomplete row.
//! Limits:
//! - names, roles and departments share one generous text limit
//! - email follows RFC 5321's 254 char path limit

use crate::models::RecordDraft;

// ── Text length limits ──────────────────────────────────────────────

/// Name, role and department
pub const MAX_NAME_LEN: usize = 200;

/// Email addresses (RFC 5321)
pub const MAX_EMAIL_LEN: usize = 254;

/// A draft field failed validation
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct ValidationError {
    pub field: &'static str,
    pub message: String,
}

impl ValidationError {
    fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

/// Validate that a required string is non-empty and within the length limit.
pub fn validate_required_text(
    value: &str,
    field: &'static str,
    max_len: usize,
) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new(field, format!("{field} must not be empty")));
    }
    let len = value.chars().count();
    if len > max_len {
        return Err(ValidationError::new(
            field,
            format!("{field} is too long ({len} chars, max {max_len})"),
        ));
    }
    Ok(())
}

/// Validate an email address: required, bounded, one `@` with text on both
/// sides and no whitespace.
pub fn validate_email(value: &str) -> Result<(), ValidationError> {
    validate_required_text(value, "email", MAX_EMAIL_LEN)?;
    let value = value.trim();
    let well_formed = match value.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && !domain.is_empty()
                && !domain.contains('@')
                && !value.chars().any(char::is_whitespace)
        }
        None => false,
    };
    if !well_formed {
        return Err(ValidationError::new(
            "email",
            format!("email '{value}' is not a valid address"),
        ));
    }
    Ok(())
}

/// Validate every field of a draft, stopping at the first failure.
pub fn validate_draft(draft: &RecordDraft) -> Result<(), ValidationError> {
    validate_required_text(&draft.name, "name", MAX_NAME_LEN)?;
    validate_required_text(&draft.role, "role", MAX_NAME_LEN)?;
    validate_required_text(&draft.department, "department", MAX_NAME_LEN)?;
    validate_email(&draft.email)
}

impl RecordDraft {
    /// See [`validate_draft`]
    pub fn validate(&self) -> Result<(), ValidationError> {
        validate_draft(self)
    }
}

//! Value Object Module

pub mod email;
pub mod full_name;
pub mod user_id;
pub mod user_name;
pub mod user_password;

use thiserror::Error;

/// A required text field was missing or blank after trimming
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("{field} is required")]
pub struct RequiredFieldError {
    pub field: &'static str,
}

/// Trim and reject blank input
pub(crate) fn require_text(
    field: &'static str,
    input: impl AsRef<str>,
) -> Result<String, RequiredFieldError> {
    let trimmed = input.as_ref().trim();
    if trimmed.is_empty() {
        return Err(RequiredFieldError { field });
    }
    Ok(trimmed.to_string())
}

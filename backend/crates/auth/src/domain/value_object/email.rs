//! Email Value Object
//!
//! Trimmed, lower-cased email address. Format is not checked beyond
//! being non-blank; ownership is never verified by this service.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::RequiredFieldError;

/// Email address value object
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Email(String);

impl Email {
    pub fn new(email: impl AsRef<str>) -> Result<Self, RequiredFieldError> {
        let email = super::require_text("email", email)?;
        Ok(Self(email.to_lowercase()))
    }

    /// `None` for missing or blank input
    pub fn parse_optional(input: Option<&str>) -> Option<Self> {
        input.and_then(|s| Self::new(s).ok())
    }

    /// Create from database value (assumed already normalized)
    pub fn from_db(email: impl Into<String>) -> Self {
        Self(email.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for Email {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Email {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for Email {
    type Error = RequiredFieldError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Email> for String {
    fn from(email: Email) -> Self {
        email.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_email_case_normalization() {
        let email = Email::new("  Bob@X.COM ").unwrap();
        assert_eq!(email.as_str(), "bob@x.com");
    }

    #[test]
    fn test_email_blank() {
        assert_eq!(Email::new("").unwrap_err().field, "email");
        assert!(Email::new("   ").is_err());
    }

    #[test]
    fn test_parse_optional() {
        assert!(Email::parse_optional(None).is_none());
        assert!(Email::parse_optional(Some("")).is_none());
        assert_eq!(
            Email::parse_optional(Some("A@b.c")).unwrap().as_str(),
            "a@b.c"
        );
    }
}

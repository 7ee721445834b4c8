use serde::{Deserialize, Serialize};

use super::RequiredFieldError;

/// Display name; case is preserved, surrounding whitespace is not
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, derive_more::Display)]
#[serde(try_from = "String", into = "String")]
pub struct FullName(String);

impl FullName {
    pub fn new(input: impl AsRef<str>) -> Result<Self, RequiredFieldError> {
        super::require_text("fullName", input).map(Self)
    }

    pub fn from_db(stored: impl Into<String>) -> Self {
        Self(stored.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for FullName {
    type Error = RequiredFieldError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<FullName> for String {
    fn from(name: FullName) -> Self {
        name.0
    }
}

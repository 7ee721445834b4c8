//! User Name Value Object
//!
//! ユーザー名はログインと重複チェックに使う公開識別子 (ハンドル)。
//!
//! ## 設計方針
//! - NFKC 正規化 → trim → 小文字化 の順で処理
//! - 保存・比較は常に小文字の canonical 形
//! - 形式チェックは「空でないこと」のみ
//!
//! ## 不変条件
//! - trim 後に空文字列ではない
//! - 小文字化済み (`Bob` と `bob` は同一ユーザー)

use serde::{Deserialize, Serialize};
use std::fmt;
use unicode_normalization::UnicodeNormalization;

use super::RequiredFieldError;

/// Normalized, lower-cased user name
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct UserName(String);

impl UserName {
    pub fn new(input: impl AsRef<str>) -> Result<Self, RequiredFieldError> {
        let normalized: String = input.as_ref().nfkc().collect();
        let canonical = super::require_text("username", normalized)?.to_lowercase();
        Ok(Self(canonical))
    }

    /// `None` for missing or blank input, for optional login identifiers
    pub fn parse_optional(input: Option<&str>) -> Option<Self> {
        input.and_then(|s| Self::new(s).ok())
    }

    /// Create from database values (stored already normalized)
    pub fn from_db(stored: impl Into<String>) -> Self {
        Self(stored.into())
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    #[inline]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Debug for UserName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("UserName").field(&self.0).finish()
    }
}

impl fmt::Display for UserName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for UserName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for UserName {
    type Error = RequiredFieldError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<UserName> for String {
    fn from(name: UserName) -> Self {
        name.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trim_and_lowercase() {
        let name = UserName::new("  BoB  ").unwrap();
        assert_eq!(name.as_str(), "bob");
    }

    #[test]
    fn test_nfkc_normalization() {
        // Full-width 'Ｂ' (U+FF22) becomes ASCII before lowercasing
        let name = UserName::new("Ｂob").unwrap();
        assert_eq!(name.as_str(), "bob");
    }

    #[test]
    fn test_blank_fails() {
        for input in ["", "   ", "\t"] {
            let err = UserName::new(input).unwrap_err();
            assert_eq!(err.field, "username");
        }
    }

    #[test]
    fn test_idempotent() {
        let first = UserName::new("  AlIcE_123  ").unwrap();
        let second = UserName::new(first.as_str()).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_parse_optional() {
        assert_eq!(UserName::parse_optional(None), None);
        assert_eq!(UserName::parse_optional(Some("  ")), None);
        assert_eq!(
            UserName::parse_optional(Some("Bob")).map(UserName::into_inner),
            Some("bob".to_string())
        );
    }

    #[test]
    fn test_serde_uses_canonical_string() {
        let name: UserName = serde_json::from_str(r#""ALICE""#).unwrap();
        assert_eq!(serde_json::to_string(&name).unwrap(), r#""alice""#);
        assert!(serde_json::from_str::<UserName>(r#""  ""#).is_err());
    }
}

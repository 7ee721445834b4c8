//! Application Configuration
//!
//! Configuration for the Auth application layer.

use std::time::Duration;
use thiserror::Error;

use platform::cookie::CookieConfig;
/// Re-export SameSite from platform
pub use platform::cookie::SameSite;

/// Minimum accepted length for token signing secrets (bytes)
pub const MIN_SECRET_LENGTH: usize = 32;

/// Longest accepted token lifetime (10 years)
pub const MAX_TOKEN_TTL: Duration = Duration::from_secs(10 * 365 * 24 * 3600);

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{0} must be set")]
    MissingSecret(&'static str),

    #[error("{name} must be at least {min} bytes")]
    WeakSecret { name: &'static str, min: usize },

    #[error("ACCESS_TOKEN_SECRET and REFRESH_TOKEN_SECRET must differ")]
    SecretsMustDiffer,

    #[error("{name} must be greater than zero")]
    ZeroTtl { name: &'static str },

    #[error("{name} must be at most {max_secs} seconds")]
    TtlTooLarge { name: &'static str, max_secs: u64 },
}

/// Auth application configuration
#[derive(Clone)]
pub struct AuthConfig {
    /// HS256 key for access tokens
    pub access_token_secret: String,
    /// HS256 key for refresh tokens, distinct from the access key
    pub refresh_token_secret: String,
    /// Access token lifetime (1 day)
    pub access_token_ttl: Duration,
    /// Refresh token lifetime (10 days)
    pub refresh_token_ttl: Duration,
    pub access_cookie_name: String,
    pub refresh_cookie_name: String,
    /// Whether to require Secure cookie
    pub cookie_secure: bool,
    pub cookie_same_site: SameSite,
    /// Password pepper (optional, application-wide secret)
    pub password_pepper: Option<Vec<u8>>,
    /// Request body limit for multipart registration
    pub max_upload_bytes: usize,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            access_token_secret: String::new(),
            refresh_token_secret: String::new(),
            access_token_ttl: Duration::from_secs(24 * 3600), // 1 day
            refresh_token_ttl: Duration::from_secs(10 * 24 * 3600), // 10 days
            access_cookie_name: "accessToken".to_string(),
            refresh_cookie_name: "refreshToken".to_string(),
            cookie_secure: true,
            cookie_same_site: SameSite::Lax,
            password_pepper: None,
            max_upload_bytes: 10 * 1024 * 1024,
        }
    }
}

impl std::fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthConfig")
            .field("access_token_secret", &"[REDACTED]")
            .field("refresh_token_secret", &"[REDACTED]")
            .field("access_token_ttl", &self.access_token_ttl)
            .field("refresh_token_ttl", &self.refresh_token_ttl)
            .field("access_cookie_name", &self.access_cookie_name)
            .field("refresh_cookie_name", &self.refresh_cookie_name)
            .field("cookie_secure", &self.cookie_secure)
            .field("cookie_same_site", &self.cookie_same_site)
            .field("password_pepper", &self.password_pepper.as_ref().map(|_| "[REDACTED]"))
            .field("max_upload_bytes", &self.max_upload_bytes)
            .finish()
    }
}

impl AuthConfig {
    /// Create config with random token secrets (for development)
    pub fn with_random_secrets() -> Self {
        use platform::crypto::random_token;
        Self {
            access_token_secret: random_token(32),
            refresh_token_secret: random_token(32),
            ..Default::default()
        }
    }

    /// Create config for development (insecure cookie)
    pub fn development() -> Self {
        Self {
            cookie_secure: false,
            ..Self::with_random_secrets()
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        for (name, secret) in [
            ("ACCESS_TOKEN_SECRET", &self.access_token_secret),
            ("REFRESH_TOKEN_SECRET", &self.refresh_token_secret),
        ] {
            if secret.is_empty() {
                return Err(ConfigError::MissingSecret(name));
            }
            if secret.len() < MIN_SECRET_LENGTH {
                return Err(ConfigError::WeakSecret {
                    name,
                    min: MIN_SECRET_LENGTH,
                });
            }
        }

        if self.access_token_secret == self.refresh_token_secret {
            return Err(ConfigError::SecretsMustDiffer);
        }

        for (name, ttl) in [
            ("ACCESS_TOKEN_EXPIRY_SECS", self.access_token_ttl),
            ("REFRESH_TOKEN_EXPIRY_SECS", self.refresh_token_ttl),
        ] {
            if ttl.is_zero() {
                return Err(ConfigError::ZeroTtl { name });
            }
            if ttl > MAX_TOKEN_TTL {
                return Err(ConfigError::TtlTooLarge {
                    name,
                    max_secs: MAX_TOKEN_TTL.as_secs(),
                });
            }
        }

        Ok(())
    }

    /// Get password pepper as slice
    pub fn pepper(&self) -> Option<&[u8]> {
        self.password_pepper.as_deref()
    }

    /// Cookie carrying the access token; lives as long as the token
    pub fn access_cookie(&self) -> CookieConfig {
        self.cookie(&self.access_cookie_name, self.access_token_ttl)
    }

    /// Cookie carrying the refresh token; lives as long as the token
    pub fn refresh_cookie(&self) -> CookieConfig {
        self.cookie(&self.refresh_cookie_name, self.refresh_token_ttl)
    }

    fn cookie(&self, name: &str, ttl: Duration) -> CookieConfig {
        CookieConfig::named(name)
            .with_secure(self.cookie_secure)
            .with_same_site(self.cookie_same_site)
            .with_max_age(i64::try_from(ttl.as_secs()).unwrap_or(i64::MAX))
    }
}

//! Token Service
//!
//! Issues and verifies the HS256 JWT pair handed to clients:
//! a short-lived access token carrying the public identity, and a
//! longer-lived refresh token carrying only the subject. The two are
//! signed with different secrets so neither can stand in for the other.

use chrono::Utc;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::application::config::AuthConfig;
use crate::domain::entity::user::User;
use crate::domain::value_object::user_id::UserId;
use crate::error::{AuthError, AuthResult};

/// Access token claims
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccessClaims {
    pub sub: String,
    pub email: String,
    pub username: String,
    pub full_name: String,
    pub iat: i64,
    pub exp: i64,
    pub jti: String,
}

/// Refresh token claims
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RefreshClaims {
    pub sub: String,
    pub iat: i64,
    pub exp: i64,
    /// Unique per token so that two pairs minted in the same second still differ
    pub jti: String,
}

impl AccessClaims {
    pub fn user_id(&self) -> AuthResult<UserId> {
        self.sub.parse().map_err(|_| AuthError::InvalidAccessToken)
    }
}

impl RefreshClaims {
    pub fn user_id(&self) -> AuthResult<UserId> {
        self.sub.parse().map_err(|_| AuthError::InvalidRefreshToken)
    }
}

/// Freshly minted access + refresh token
#[derive(Clone, PartialEq, Eq)]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
}

impl std::fmt::Debug for TokenPair {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenPair")
            .field("access_token", &"[REDACTED]")
            .field("refresh_token", &"[REDACTED]")
            .finish()
    }
}

pub struct TokenService {
    access_encoding: EncodingKey,
    access_decoding: DecodingKey,
    refresh_encoding: EncodingKey,
    refresh_decoding: DecodingKey,
    access_ttl_secs: i64,
    refresh_ttl_secs: i64,
    validation: Validation,
}

impl TokenService {
    pub fn new(config: &AuthConfig) -> Self {
        let access = config.access_token_secret.as_bytes();
        let refresh = config.refresh_token_secret.as_bytes();

        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp", "sub"]);

        Self {
            access_encoding: EncodingKey::from_secret(access),
            access_decoding: DecodingKey::from_secret(access),
            refresh_encoding: EncodingKey::from_secret(refresh),
            refresh_decoding: DecodingKey::from_secret(refresh),
            access_ttl_secs: ttl_secs(config.access_token_ttl),
            refresh_ttl_secs: ttl_secs(config.refresh_token_ttl),
            validation,
        }
    }

    pub fn issue_pair(&self, user: &User) -> AuthResult<TokenPair> {
        Ok(TokenPair {
            access_token: self.issue_access_token(user)?,
            refresh_token: self.issue_refresh_token(&user.user_id)?,
        })
    }

    pub fn issue_access_token(&self, user: &User) -> AuthResult<String> {
        let iat = Utc::now().timestamp();
        let exp = expiry(iat, self.access_ttl_secs, "access token")?;
        let claims = AccessClaims {
            sub: user.user_id.to_string(),
            email: user.email.to_string(),
            username: user.user_name.to_string(),
            full_name: user.full_name.to_string(),
            iat,
            exp,
            jti: Uuid::new_v4().to_string(),
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.access_encoding)
            .map_err(|e| AuthError::TokenIssue(format!("access token: {e}")))
    }

    pub fn issue_refresh_token(&self, user_id: &UserId) -> AuthResult<String> {
        let iat = Utc::now().timestamp();
        let exp = expiry(iat, self.refresh_ttl_secs, "refresh token")?;
        let claims = RefreshClaims {
            sub: user_id.to_string(),
            iat,
            exp,
            jti: Uuid::new_v4().to_string(),
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.refresh_encoding)
            .map_err(|e| AuthError::TokenIssue(format!("refresh token: {e}")))
    }

    /// Verify signature and expiry of an access token
    pub fn verify_access_token(&self, token: &str) -> AuthResult<AccessClaims> {
        decode::<AccessClaims>(token, &self.access_decoding, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| {
                tracing::debug!(error = %e, "Access token rejected");
                AuthError::InvalidAccessToken
            })
    }

    /// Verify signature and expiry of a refresh token
    pub fn verify_refresh_token(&self, token: &str) -> AuthResult<RefreshClaims> {
        decode::<RefreshClaims>(token, &self.refresh_decoding, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| {
                tracing::debug!(error = %e, "Refresh token rejected");
                AuthError::InvalidRefreshToken
            })
    }
}

/// Lifetimes beyond `i64::MAX` seconds saturate; `expiry` then refuses them
fn ttl_secs(ttl: std::time::Duration) -> i64 {
    i64::try_from(ttl.as_secs()).unwrap_or(i64::MAX)
}

fn expiry(iat: i64, ttl_secs: i64, what: &str) -> AuthResult<i64> {
    iat.checked_add(ttl_secs)
        .ok_or_else(|| AuthError::TokenIssue(format!("{what}: lifetime out of range")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entity::user::NewUser;
    use crate::domain::value_object::{
        email::Email, full_name::FullName, user_name::UserName,
        user_password::{RawPassword, UserPassword},
    };

    fn user() -> User {
        let raw = RawPassword::new("pw".to_string()).unwrap();
        User::new(NewUser {
            user_name: UserName::new("bob").unwrap(),
            email: Email::new("bob@x.com").unwrap(),
            full_name: FullName::new("Bob").unwrap(),
            avatar: "https://cdn.example/a.png".into(),
            cover_image: None,
            password: UserPassword::from_raw(&raw, None).unwrap(),
        })
    }

    fn service() -> (TokenService, AuthConfig) {
        let config = AuthConfig::with_random_secrets();
        (TokenService::new(&config), config)
    }

    #[test]
    fn test_access_token_carries_identity() {
        let (tokens, config) = service();
        let user = user();
        let pair = tokens.issue_pair(&user).unwrap();

        let claims = tokens.verify_access_token(&pair.access_token).unwrap();
        assert_eq!(claims.user_id().unwrap(), user.user_id);
        assert_eq!(claims.username, "bob");
        assert_eq!(claims.email, "bob@x.com");
        assert_eq!(claims.full_name, "Bob");
        assert_eq!(
            claims.exp - claims.iat,
            config.access_token_ttl.as_secs() as i64
        );
    }

    #[test]
    fn test_refresh_token_carries_subject_only() {
        let (tokens, _) = service();
        let user = user();
        let token = tokens.issue_refresh_token(&user.user_id).unwrap();

        let claims = tokens.verify_refresh_token(&token).unwrap();
        assert_eq!(claims.user_id().unwrap(), user.user_id);
    }

    #[test]
    fn test_tokens_are_not_interchangeable() {
        let (tokens, _) = service();
        let pair = tokens.issue_pair(&user()).unwrap();

        assert!(matches!(
            tokens.verify_refresh_token(&pair.access_token),
            Err(AuthError::InvalidRefreshToken)
        ));
        assert!(matches!(
            tokens.verify_access_token(&pair.refresh_token),
            Err(AuthError::InvalidAccessToken)
        ));
    }

    #[test]
    fn test_pairs_issued_back_to_back_differ() {
        let (tokens, _) = service();
        let user = user();
        let first = tokens.issue_pair(&user).unwrap();
        let second = tokens.issue_pair(&user).unwrap();
        assert_ne!(first.refresh_token, second.refresh_token);
        assert_ne!(first.access_token, second.access_token);
    }

    #[test]
    fn test_token_from_other_secret_is_rejected() {
        let (tokens, _) = service();
        let (other, _) = service();
        let token = other.issue_refresh_token(&UserId::new()).unwrap();
        assert!(tokens.verify_refresh_token(&token).is_err());
    }

    #[test]
    fn test_expired_refresh_token_is_rejected() {
        let config = AuthConfig::with_random_secrets();
        let tokens = TokenService::new(&config);

        let claims = RefreshClaims {
            sub: UserId::new().to_string(),
            iat: Utc::now().timestamp() - 7200,
            exp: Utc::now().timestamp() - 3600,
            jti: Uuid::new_v4().to_string(),
        };
        let expired = encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(config.refresh_token_secret.as_bytes()),
        )
        .unwrap();

        assert!(matches!(
            tokens.verify_refresh_token(&expired),
            Err(AuthError::InvalidRefreshToken)
        ));
    }

    #[test]
    fn test_oversized_lifetime_saturates_instead_of_wrapping() {
        let mut config = AuthConfig::with_random_secrets();
        config.access_token_ttl = std::time::Duration::from_secs(u64::MAX);
        let tokens = TokenService::new(&config);

        assert_eq!(tokens.access_ttl_secs, i64::MAX);
        assert!(matches!(
            tokens.issue_access_token(&user()),
            Err(AuthError::TokenIssue(_))
        ));
    }

    #[test]
    fn test_overflowing_refresh_lifetime_is_an_error() {
        let mut config = AuthConfig::with_random_secrets();
        config.refresh_token_ttl = std::time::Duration::from_secs(i64::MAX as u64);
        let tokens = TokenService::new(&config);

        assert!(matches!(
            tokens.issue_refresh_token(&UserId::new()),
            Err(AuthError::TokenIssue(_))
        ));
        assert!(tokens.issue_pair(&user()).is_err());
    }

    #[test]
    fn test_longest_allowed_lifetime_verifies() {
        let mut config = AuthConfig::with_random_secrets();
        config.access_token_ttl = crate::application::config::MAX_TOKEN_TTL;
        let tokens = TokenService::new(&config);

        let token = tokens.issue_access_token(&user()).unwrap();
        assert!(tokens.verify_access_token(&token).is_ok());
    }

    #[test]
    fn test_garbage_is_rejected() {
        let (tokens, _) = service();
        assert!(tokens.verify_access_token("not.a.jwt").is_err());
        assert!(tokens.verify_refresh_token("").is_err());
    }
}

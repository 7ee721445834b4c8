//! Login Use Case
//!
//! Verifies credentials, issues a token pair and stores the refresh token
//! on the user record, replacing whatever session was there before.

use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::application::token::{TokenPair, TokenService};
use crate::domain::entity::user::User;
use crate::domain::repository::UserRepository;
use crate::domain::value_object::{
    email::Email, user_name::UserName, user_password::RawPassword,
};
use crate::error::{AuthError, AuthResult};

/// Login input
#[derive(Debug, Default)]
pub struct LoginInput {
    pub user_name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
}

/// Login output
#[derive(Debug)]
pub struct LoginOutput {
    pub user: User,
    pub tokens: TokenPair,
}

/// Login use case
pub struct LoginUseCase<U>
where
    U: UserRepository,
{
    user_repo: Arc<U>,
    tokens: Arc<TokenService>,
    config: Arc<AuthConfig>,
}

impl<U> LoginUseCase<U>
where
    U: UserRepository,
{
    pub fn new(user_repo: Arc<U>, tokens: Arc<TokenService>, config: Arc<AuthConfig>) -> Self {
        Self {
            user_repo,
            tokens,
            config,
        }
    }

    pub async fn execute(&self, input: LoginInput) -> AuthResult<LoginOutput> {
        let user_name = UserName::parse_optional(input.user_name.as_deref());
        let email = Email::parse_optional(input.email.as_deref());

        if user_name.is_none() && email.is_none() {
            return Err(AuthError::IdentifierRequired);
        }

        let user = self
            .user_repo
            .find_by_user_name_or_email(user_name.as_ref(), email.as_ref())
            .await?
            .ok_or(AuthError::UserNotFound)?;

        // A blank or over-long password can never match a stored hash
        let raw_password = RawPassword::new(input.password.unwrap_or_default())
            .map_err(|_| AuthError::InvalidCredentials)?;

        if !user.password.verify(&raw_password, self.config.pepper()) {
            return Err(AuthError::InvalidCredentials);
        }

        let tokens = issue_and_store(&*self.user_repo, &self.tokens, &user).await?;

        let user = self
            .user_repo
            .find_by_id(&user.user_id)
            .await?
            .ok_or(AuthError::UserNotFound)?;

        tracing::info!(user_id = %user.user_id, user_name = %user.user_name, "User logged in");

        Ok(LoginOutput { user, tokens })
    }
}

/// Mint a token pair for `user` and make its refresh token the only live one.
///
/// Shared by login and refresh.
pub(crate) async fn issue_and_store<U>(
    user_repo: &U,
    tokens: &TokenService,
    user: &User,
) -> AuthResult<TokenPair>
where
    U: UserRepository,
{
    let pair = tokens.issue_pair(user)?;

    let updated = user_repo
        .update_refresh_token(&user.user_id, Some(&pair.refresh_token))
        .await
        .map_err(|e| AuthError::TokenIssue(e.to_string()))?;

    if !updated {
        return Err(AuthError::TokenIssue(format!(
            "user {} vanished while storing refresh token",
            user.user_id
        )));
    }

    Ok(pair)
}

//! Authenticate Use Case
//!
//! Resolves a presented access token to the user it was issued for.

use std::sync::Arc;

use crate::application::token::TokenService;
use crate::domain::entity::user::User;
use crate::domain::repository::UserRepository;
use crate::error::{AuthError, AuthResult};

pub struct AuthenticateUseCase<U>
where
    U: UserRepository,
{
    user_repo: Arc<U>,
    tokens: Arc<TokenService>,
}

impl<U> AuthenticateUseCase<U>
where
    U: UserRepository,
{
    pub fn new(user_repo: Arc<U>, tokens: Arc<TokenService>) -> Self {
        Self { user_repo, tokens }
    }

    /// Missing token is `MissingToken`; bad, expired or orphaned token is `InvalidAccessToken`.
    pub async fn execute(&self, access_token: Option<&str>) -> AuthResult<User> {
        let token = access_token
            .filter(|token| !token.is_empty())
            .ok_or(AuthError::MissingToken)?;

        let claims = self.tokens.verify_access_token(token)?;

        self.user_repo
            .find_by_id(&claims.user_id()?)
            .await?
            .ok_or(AuthError::InvalidAccessToken)
    }
}

//! Refresh Use Case
//!
//! Exchanges the live refresh token for a new pair (rotation).
//!
//! State per user: `no-session -> active(T)` on login, `active(T) -> active(T')`
//! on refresh, `active(T) -> no-session` on logout. Any token other than the
//! current `T` is refused, however valid its signature.
//!
//! TODO: rotation is a plain read-then-write; two concurrent refreshes with the
//! same token can both succeed. Make `update_refresh_token` compare-and-swap on
//! the previous value if that ever matters.

use std::sync::Arc;

use crate::application::login::issue_and_store;
use crate::application::token::{TokenPair, TokenService};
use crate::domain::entity::user::User;
use crate::domain::repository::UserRepository;
use crate::error::{AuthError, AuthResult};

#[derive(Debug)]
pub struct RefreshOutput {
    pub user: User,
    pub tokens: TokenPair,
}

pub struct RefreshUseCase<U>
where
    U: UserRepository,
{
    user_repo: Arc<U>,
    tokens: Arc<TokenService>,
}

impl<U> RefreshUseCase<U>
where
    U: UserRepository,
{
    pub fn new(user_repo: Arc<U>, tokens: Arc<TokenService>) -> Self {
        Self { user_repo, tokens }
    }

    pub async fn execute(&self, presented: Option<&str>) -> AuthResult<RefreshOutput> {
        let presented = presented
            .map(str::trim)
            .filter(|token| !token.is_empty())
            .ok_or(AuthError::MissingToken)?;

        let claims = self.tokens.verify_refresh_token(presented)?;
        let user_id = claims.user_id()?;

        let mut user = self
            .user_repo
            .find_by_id(&user_id)
            .await?
            .ok_or(AuthError::RefreshTokenOwnerNotFound)?;

        if !user.holds_refresh_token(presented) {
            return Err(AuthError::RefreshTokenReused);
        }

        let tokens = issue_and_store(&*self.user_repo, &self.tokens, &user).await?;
        user.set_refresh_token(tokens.refresh_token.clone());

        tracing::info!(user_id = %user.user_id, "Access token refreshed");

        Ok(RefreshOutput { user, tokens })
    }
}

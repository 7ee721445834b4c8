//! Logout Use Case
//!
//! Clears the stored refresh token so that no outstanding refresh token
//! for this user is accepted any more.

use std::sync::Arc;

use crate::domain::repository::UserRepository;
use crate::domain::value_object::user_id::UserId;
use crate::error::AuthResult;

pub struct LogoutUseCase<U>
where
    U: UserRepository,
{
    user_repo: Arc<U>,
}

impl<U> LogoutUseCase<U>
where
    U: UserRepository,
{
    pub fn new(user_repo: Arc<U>) -> Self {
        Self { user_repo }
    }

    pub async fn execute(&self, user_id: &UserId) -> AuthResult<()> {
        let updated = self.user_repo.update_refresh_token(user_id, None).await?;

        if updated {
            tracing::info!(user_id = %user_id, "User logged out");
        } else {
            tracing::debug!(user_id = %user_id, "Logout for unknown user");
        }

        Ok(())
    }
}

//! Repository Traits
//!
//! Interfaces for data persistence. Implementation is in infrastructure layer.

use crate::domain::entity::user::User;
use crate::domain::value_object::{email::Email, user_id::UserId, user_name::UserName};
use crate::error::AuthResult;

/// Credential store
#[trait_variant::make(UserRepository: Send)]
pub trait LocalUserRepository {
    /// Insert a new user.
    ///
    /// Fails with `UserNameTaken` / `EmailTaken` if a concurrent registration won.
    async fn create(&self, user: &User) -> AuthResult<()>;

    async fn find_by_id(&self, user_id: &UserId) -> AuthResult<Option<User>>;

    /// First user whose user name OR email matches; `None` filters are ignored
    async fn find_by_user_name_or_email(
        &self,
        user_name: Option<&UserName>,
        email: Option<&Email>,
    ) -> AuthResult<Option<User>>;

    async fn exists_by_user_name(&self, user_name: &UserName) -> AuthResult<bool>;

    async fn exists_by_email(&self, email: &Email) -> AuthResult<bool>;

    /// Overwrite (or clear with `None`) the stored refresh token without touching
    /// any other column. Returns `false` if no such user exists.
    async fn update_refresh_token(
        &self,
        user_id: &UserId,
        refresh_token: Option<&str>,
    ) -> AuthResult<bool>;
}

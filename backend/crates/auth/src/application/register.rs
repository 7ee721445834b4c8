//! Register Use Case
//!
//! Creates a new user account with an uploaded avatar (and optional cover image).
//!
//! Check order matters: the user name is validated and checked for
//! duplicates before anything else, so a taken user name is always a 409.

use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::domain::entity::user::{NewUser, User};
use crate::domain::media::{MediaFile, MediaStore};
use crate::domain::repository::UserRepository;
use crate::domain::value_object::{
    email::Email,
    full_name::FullName,
    user_name::UserName,
    user_password::{RawPassword, UserPassword},
};
use crate::error::{AuthError, AuthResult};

/// Register input; text fields are as received, possibly missing
#[derive(Debug, Default)]
pub struct RegisterInput {
    pub full_name: Option<String>,
    pub email: Option<String>,
    pub user_name: Option<String>,
    pub password: Option<String>,
    pub avatar: Option<MediaFile>,
    pub cover_image: Option<MediaFile>,
}

/// Register use case
pub struct RegisterUseCase<U, M>
where
    U: UserRepository,
    M: MediaStore,
{
    user_repo: Arc<U>,
    media: Arc<M>,
    config: Arc<AuthConfig>,
}

impl<U, M> RegisterUseCase<U, M>
where
    U: UserRepository,
    M: MediaStore,
{
    pub fn new(user_repo: Arc<U>, media: Arc<M>, config: Arc<AuthConfig>) -> Self {
        Self {
            user_repo,
            media,
            config,
        }
    }

    pub async fn execute(&self, input: RegisterInput) -> AuthResult<User> {
        let user_name = UserName::new(input.user_name.as_deref().unwrap_or_default())?;

        if self.user_repo.exists_by_user_name(&user_name).await? {
            return Err(AuthError::UserNameTaken);
        }

        let full_name = FullName::new(input.full_name.as_deref().unwrap_or_default())?;
        let email = Email::new(input.email.as_deref().unwrap_or_default())?;
        let raw_password = RawPassword::new(input.password.unwrap_or_default())?;

        if self.user_repo.exists_by_email(&email).await? {
            return Err(AuthError::EmailTaken);
        }

        let avatar = input
            .avatar
            .filter(|file| !file.is_empty())
            .ok_or(AuthError::AvatarRequired)?;

        let avatar_url = self
            .media
            .upload(avatar)
            .await
            .map_err(AuthError::AvatarUploadFailed)?
            .url;

        let cover_image_url = match input.cover_image.filter(|file| !file.is_empty()) {
            Some(cover) => match self.media.upload(cover).await {
                Ok(uploaded) => Some(uploaded.url),
                Err(e) => {
                    tracing::warn!(error = %e, user_name = %user_name, "Cover image upload failed, continuing without it");
                    None
                }
            },
            None => None,
        };

        let password = UserPassword::from_raw(&raw_password, self.config.pepper())?;

        let user = User::new(NewUser {
            user_name,
            email,
            full_name,
            avatar: avatar_url,
            cover_image: cover_image_url,
            password,
        });

        self.user_repo.create(&user).await?;

        let created = self
            .user_repo
            .find_by_id(&user.user_id)
            .await?
            .ok_or(AuthError::RegistrationFailed)?;

        tracing::info!(
            user_id = %created.user_id,
            user_name = %created.user_name,
            "User registered"
        );

        Ok(created)
    }
}

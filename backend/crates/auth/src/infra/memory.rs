//! In-memory implementations
//!
//! Used by tests and by debug builds that run without a media service.

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::entity::user::User;
use crate::domain::media::{MediaError, MediaFile, MediaStore, UploadedMedia};
use crate::domain::repository::UserRepository;
use crate::domain::value_object::{email::Email, user_id::UserId, user_name::UserName};
use crate::error::{AuthError, AuthResult};

/// Credential store kept in a map; clones share the same data
#[derive(Debug, Clone, Default)]
pub struct MemoryUserRepository {
    users: Arc<RwLock<HashMap<Uuid, User>>>,
}

impl MemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.users.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.users.read().await.is_empty()
    }
}

impl UserRepository for MemoryUserRepository {
    async fn create(&self, user: &User) -> AuthResult<()> {
        let mut users = self.users.write().await;

        if users.values().any(|u| u.user_name == user.user_name) {
            return Err(AuthError::UserNameTaken);
        }
        if users.values().any(|u| u.email == user.email) {
            return Err(AuthError::EmailTaken);
        }

        users.insert(*user.user_id.as_uuid(), user.clone());
        Ok(())
    }

    async fn find_by_id(&self, user_id: &UserId) -> AuthResult<Option<User>> {
        Ok(self.users.read().await.get(user_id.as_uuid()).cloned())
    }

    async fn find_by_user_name_or_email(
        &self,
        user_name: Option<&UserName>,
        email: Option<&Email>,
    ) -> AuthResult<Option<User>> {
        let users = self.users.read().await;

        Ok(users
            .values()
            .filter(|u| user_name == Some(&u.user_name) || email == Some(&u.email))
            .min_by_key(|u| u.created_at)
            .cloned())
    }

    async fn exists_by_user_name(&self, user_name: &UserName) -> AuthResult<bool> {
        Ok(self
            .users
            .read()
            .await
            .values()
            .any(|u| &u.user_name == user_name))
    }

    async fn exists_by_email(&self, email: &Email) -> AuthResult<bool> {
        Ok(self.users.read().await.values().any(|u| &u.email == email))
    }

    async fn update_refresh_token(
        &self,
        user_id: &UserId,
        refresh_token: Option<&str>,
    ) -> AuthResult<bool> {
        let mut users = self.users.write().await;

        match users.get_mut(user_id.as_uuid()) {
            Some(user) => {
                match refresh_token {
                    Some(token) => user.set_refresh_token(token),
                    None => user.clear_refresh_token(),
                }
                Ok(true)
            }
            None => Ok(false),
        }
    }
}

/// Media store that accepts every non-empty file and hands back a `memory://` URL
#[derive(Debug, Default)]
pub struct MemoryMediaStore {
    uploads: AtomicU64,
}

impl MemoryMediaStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// アップロード済みファイル数
    pub fn upload_count(&self) -> u64 {
        self.uploads.load(Ordering::Relaxed)
    }
}

impl MediaStore for MemoryMediaStore {
    async fn upload(&self, file: MediaFile) -> Result<UploadedMedia, MediaError> {
        if file.is_empty() {
            return Err(MediaError::EmptyFile);
        }

        let n = self.uploads.fetch_add(1, Ordering::Relaxed) + 1;
        let public_id = format!("{n}-{}", file.file_name);

        Ok(UploadedMedia {
            url: format!("memory://media/{public_id}"),
            public_id: Some(public_id),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entity::user::NewUser;
    use crate::domain::value_object::{
        full_name::FullName,
        user_password::{RawPassword, UserPassword},
    };

    fn user(name: &str, email: &str) -> User {
        let raw = RawPassword::new("pw".to_string()).unwrap();
        User::new(NewUser {
            user_name: UserName::new(name).unwrap(),
            email: Email::new(email).unwrap(),
            full_name: FullName::new("Test User").unwrap(),
            avatar: "memory://a".to_string(),
            cover_image: None,
            password: UserPassword::from_raw(&raw, None).unwrap(),
        })
    }

    #[tokio::test]
    async fn test_create_enforces_uniqueness() {
        let repo = MemoryUserRepository::new();
        repo.create(&user("bob", "bob@x.io")).await.unwrap();

        let err = repo.create(&user("BOB", "other@x.io")).await.unwrap_err();
        assert!(matches!(err, AuthError::UserNameTaken));

        let err = repo.create(&user("other", "Bob@X.io")).await.unwrap_err();
        assert!(matches!(err, AuthError::EmailTaken));

        assert_eq!(repo.len().await, 1);
    }

    #[tokio::test]
    async fn test_find_by_user_name_or_email() {
        let repo = MemoryUserRepository::new();
        let bob = user("bob", "bob@x.io");
        repo.create(&bob).await.unwrap();

        let by_name = repo
            .find_by_user_name_or_email(Some(&UserName::new("bob").unwrap()), None)
            .await
            .unwrap();
        assert_eq!(by_name.map(|u| u.user_id), Some(bob.user_id));

        let by_email = repo
            .find_by_user_name_or_email(None, Some(&Email::new("bob@x.io").unwrap()))
            .await
            .unwrap();
        assert_eq!(by_email.map(|u| u.user_id), Some(bob.user_id));

        let none = repo.find_by_user_name_or_email(None, None).await.unwrap();
        assert!(none.is_none());
    }

    #[tokio::test]
    async fn test_update_refresh_token() {
        let repo = MemoryUserRepository::new();
        let bob = user("bob", "bob@x.io");
        repo.create(&bob).await.unwrap();

        assert!(repo.update_refresh_token(&bob.user_id, Some("t1")).await.unwrap());
        let stored = repo.find_by_id(&bob.user_id).await.unwrap().unwrap();
        assert_eq!(stored.refresh_token.as_deref(), Some("t1"));

        assert!(repo.update_refresh_token(&bob.user_id, None).await.unwrap());
        let stored = repo.find_by_id(&bob.user_id).await.unwrap().unwrap();
        assert!(stored.refresh_token.is_none());

        assert!(!repo.update_refresh_token(&UserId::new(), Some("t")).await.unwrap());
    }

    #[tokio::test]
    async fn test_media_store() {
        let store = MemoryMediaStore::new();
        let uploaded = store
            .upload(MediaFile::new("a.png", None, vec![1, 2, 3]))
            .await
            .unwrap();
        assert!(uploaded.url.starts_with("memory://"));
        assert_eq!(store.upload_count(), 1);

        let err = store
            .upload(MediaFile::new("b.png", None, Vec::new()))
            .await
            .unwrap_err();
        assert!(matches!(err, MediaError::EmptyFile));
    }
}

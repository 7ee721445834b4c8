//! User Entity
//!
//! A registered account together with its credentials and the single
//! refresh token that is currently allowed to mint new access tokens.

use chrono::{DateTime, Utc};

use crate::domain::value_object::{
    email::Email, full_name::FullName, user_id::UserId, user_name::UserName,
    user_password::UserPassword,
};

/// User entity
///
/// `password` and `refresh_token` must never leave the service;
/// HTTP responses are built from `UserResponse`, which omits both.
#[derive(Debug, Clone)]
pub struct User {
    pub user_id: UserId,
    /// Unique, stored lower-cased
    pub user_name: UserName,
    /// Unique, stored lower-cased
    pub email: Email,
    pub full_name: FullName,
    /// Media URL, required at registration
    pub avatar: String,
    pub cover_image: Option<String>,
    pub password: UserPassword,
    /// The one live refresh token, `None` when signed out
    pub refresh_token: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Fields required to register a user
pub struct NewUser {
    pub user_name: UserName,
    pub email: Email,
    pub full_name: FullName,
    pub avatar: String,
    pub cover_image: Option<String>,
    pub password: UserPassword,
}

impl User {
    pub fn new(new_user: NewUser) -> Self {
        let now = Utc::now();

        Self {
            user_id: UserId::new(),
            user_name: new_user.user_name,
            email: new_user.email,
            full_name: new_user.full_name,
            avatar: new_user.avatar,
            cover_image: new_user.cover_image,
            password: new_user.password,
            refresh_token: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Replace the live refresh token; the previous one stops being accepted.
    pub fn set_refresh_token(&mut self, token: impl Into<String>) {
        self.refresh_token = Some(token.into());
        self.updated_at = Utc::now();
    }

    pub fn clear_refresh_token(&mut self) {
        self.refresh_token = None;
        self.updated_at = Utc::now();
    }

    /// Whether `presented` is the live refresh token (constant-time compare)
    pub fn holds_refresh_token(&self, presented: &str) -> bool {
        self.refresh_token.as_deref().is_some_and(|stored| {
            platform::crypto::constant_time_eq(stored.as_bytes(), presented.as_bytes())
        })
    }
}

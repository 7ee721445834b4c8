//! Auth Error Types
//!
//! This module provides auth-specific error variants that integrate
//! with the unified `kernel::error::AppError` system.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use thiserror::Error;

use crate::domain::media::MediaError;
use crate::domain::value_object::RequiredFieldError;

/// Auth-specific result type alias
pub type AuthResult<T> = Result<T, AuthError>;

/// Auth-specific error variants
#[derive(Debug, Error)]
pub enum AuthError {
    // ---- 400 ----
    #[error("All fields are required")]
    MissingFields,

    #[error("{0}")]
    Validation(String),

    #[error("Avatar file is required")]
    AvatarRequired,

    #[error("Avatar upload failed")]
    AvatarUploadFailed(#[source] MediaError),

    #[error("Invalid request body: {0}")]
    InvalidBody(String),

    // ---- 401 ----
    #[error("Unauthorized request")]
    MissingToken,

    #[error("Invalid user credentials")]
    InvalidCredentials,

    #[error("Invalid access token")]
    InvalidAccessToken,

    #[error("Invalid refresh token")]
    InvalidRefreshToken,

    #[error("Refresh token is expired or used")]
    RefreshTokenReused,

    // ---- 404 ----
    #[error("User does not exist")]
    UserNotFound,

    /// Refresh token verified but its subject no longer exists
    #[error("Invalid refresh token")]
    RefreshTokenOwnerNotFound,

    // ---- 409 ----
    #[error("User with username already exists")]
    UserNameTaken,

    #[error("User with email already exists")]
    EmailTaken,

    #[error("Username or email is required")]
    IdentifierRequired,

    // ---- 500 ----
    #[error("Something went wrong while generating refresh and access token")]
    TokenIssue(String),

    #[error("Something went wrong while registering the user")]
    RegistrationFailed,

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AuthError {
    pub fn status_code(&self) -> StatusCode {
        StatusCode::from_u16(self.kind().status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            AuthError::MissingFields
            | AuthError::Validation(_)
            | AuthError::AvatarRequired
            | AuthError::AvatarUploadFailed(_)
            | AuthError::InvalidBody(_) => ErrorKind::BadRequest,
            AuthError::MissingToken
            | AuthError::InvalidCredentials
            | AuthError::InvalidAccessToken
            | AuthError::InvalidRefreshToken
            | AuthError::RefreshTokenReused => ErrorKind::Unauthorized,
            AuthError::UserNotFound | AuthError::RefreshTokenOwnerNotFound => ErrorKind::NotFound,
            AuthError::UserNameTaken | AuthError::EmailTaken | AuthError::IdentifierRequired => {
                ErrorKind::Conflict
            }
            AuthError::Database(e) => sqlx_error_kind(e),
            AuthError::TokenIssue(_) | AuthError::RegistrationFailed | AuthError::Internal(_) => {
                ErrorKind::InternalServerError
            }
        }
    }

    /// Message safe to show to clients
    fn public_message(&self) -> String {
        match self {
            AuthError::Database(_) => "Database error".to_string(),
            AuthError::Internal(_) => "Internal server error".to_string(),
            other => other.to_string(),
        }
    }

    pub fn to_app_error(&self) -> AppError {
        AppError::new(self.kind(), self.public_message())
    }

    /// Log the error with appropriate level
    fn log(&self) {
        match self {
            AuthError::Database(e) => {
                tracing::error!(error = %e, "Auth database error");
            }
            AuthError::Internal(msg) | AuthError::TokenIssue(msg) => {
                tracing::error!(message = %msg, "Auth internal error");
            }
            AuthError::RegistrationFailed => {
                tracing::error!("Registered user could not be read back");
            }
            AuthError::AvatarUploadFailed(e) => {
                tracing::warn!(error = %e, "Avatar upload failed");
            }
            AuthError::InvalidCredentials => {
                tracing::warn!("Invalid login attempt");
            }
            AuthError::RefreshTokenReused => {
                tracing::warn!("Refresh token does not match the stored token");
            }
            _ => {
                tracing::debug!(error = %self, "Auth error");
            }
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        self.log();
        self.to_app_error().into_response()
    }
}

impl From<RequiredFieldError> for AuthError {
    fn from(_: RequiredFieldError) -> Self {
        AuthError::MissingFields
    }
}

impl From<AppError> for AuthError {
    fn from(err: AppError) -> Self {
        AuthError::Internal(err.to_string())
    }
}

/// Pool exhaustion and lost connections are 503, everything else 500
fn sqlx_error_kind(err: &sqlx::Error) -> ErrorKind {
    match err {
        sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed | sqlx::Error::Io(_) => {
            ErrorKind::ServiceUnavailable
        }
        _ => ErrorKind::InternalServerError,
    }
}

//! HTTP Handlers

use axum::Json;
use axum::body::Bytes;
use axum::extract::multipart::{Field, MultipartRejection};
use axum::extract::rejection::JsonRejection;
use axum::extract::{Multipart, State};
use axum::http::{HeaderMap, HeaderName, HeaderValue, header};
use axum::response::{AppendHeaders, IntoResponse};
use kernel::response::{ApiResponse, Empty};
use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::application::token::{TokenPair, TokenService};
use crate::application::{
    LoginInput, LoginUseCase, LogoutUseCase, RefreshUseCase, RegisterInput, RegisterUseCase,
};
use crate::domain::entity::user::User;
use crate::domain::media::{MediaFile, MediaStore};
use crate::domain::repository::UserRepository;
use crate::error::{AuthError, AuthResult};
use crate::presentation::dto::{AuthTokensResponse, LoginRequest, RefreshRequest, UserResponse};
use crate::presentation::middleware::AuthenticatedUser;

/// Shared state for auth handlers
pub struct AuthAppState<R, M> {
    pub repo: Arc<R>,
    pub media: Arc<M>,
    pub tokens: Arc<TokenService>,
    pub config: Arc<AuthConfig>,
}

impl<R, M> AuthAppState<R, M> {
    pub fn new(repo: R, media: M, config: AuthConfig) -> Self {
        Self {
            repo: Arc::new(repo),
            media: Arc::new(media),
            tokens: Arc::new(TokenService::new(&config)),
            config: Arc::new(config),
        }
    }
}

// Derive would require `R: Clone` and `M: Clone`
impl<R, M> Clone for AuthAppState<R, M> {
    fn clone(&self) -> Self {
        Self {
            repo: self.repo.clone(),
            media: self.media.clone(),
            tokens: self.tokens.clone(),
            config: self.config.clone(),
        }
    }
}

type SessionCookies = AppendHeaders<[(HeaderName, HeaderValue); 2]>;

// ============================================================================
// Register
// ============================================================================

/// POST /api/v1/users/register
pub async fn register<R, M>(
    State(state): State<AuthAppState<R, M>>,
    multipart: Result<Multipart, MultipartRejection>,
) -> AuthResult<impl IntoResponse>
where
    R: UserRepository + Send + Sync + 'static,
    M: MediaStore + Send + Sync + 'static,
{
    let mut multipart = multipart.map_err(|e| AuthError::InvalidBody(e.body_text()))?;
    let mut input = RegisterInput::default();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AuthError::InvalidBody(e.body_text()))?
    {
        let name = field.name().unwrap_or_default().to_string();

        match name.as_str() {
            "fullName" => input.full_name = Some(read_text(field).await?),
            "email" => input.email = Some(read_text(field).await?),
            "username" => input.user_name = Some(read_text(field).await?),
            "password" => input.password = Some(read_text(field).await?),
            "avatar" => input.avatar = Some(read_file(field).await?),
            "coverImage" => input.cover_image = Some(read_file(field).await?),
            _ => tracing::debug!(field = %name, "Ignoring unknown multipart field"),
        }
    }

    let use_case = RegisterUseCase::new(state.repo.clone(), state.media.clone(), state.config.clone());
    let user = use_case.execute(input).await?;

    Ok(ApiResponse::created(
        UserResponse::from(&user),
        "User registered successfully",
    ))
}

// ============================================================================
// Login
// ============================================================================

/// POST /api/v1/users/login
pub async fn login<R, M>(
    State(state): State<AuthAppState<R, M>>,
    body: Result<Json<LoginRequest>, JsonRejection>,
) -> AuthResult<impl IntoResponse>
where
    R: UserRepository + Send + Sync + 'static,
    M: MediaStore + Send + Sync + 'static,
{
    let Json(req) = body.map_err(|e| AuthError::InvalidBody(e.body_text()))?;

    let use_case = LoginUseCase::new(state.repo.clone(), state.tokens.clone(), state.config.clone());

    let output = use_case
        .execute(LoginInput {
            user_name: req.username,
            email: req.email,
            password: req.password,
        })
        .await?;

    let cookies = session_cookies(&state.config, &output.tokens)?;

    Ok((
        cookies,
        ApiResponse::ok(
            tokens_response(&output.user, output.tokens),
            "User logged in successfully",
        ),
    ))
}

// ============================================================================
// Logout
// ============================================================================

/// POST /api/v1/users/logout
pub async fn logout<R, M>(
    State(state): State<AuthAppState<R, M>>,
    AuthenticatedUser(user): AuthenticatedUser,
) -> AuthResult<impl IntoResponse>
where
    R: UserRepository + Send + Sync + 'static,
    M: MediaStore + Send + Sync + 'static,
{
    let use_case = LogoutUseCase::new(state.repo.clone());
    use_case.execute(&user.user_id).await?;

    let cookies = cleared_cookies(&state.config)?;

    Ok((cookies, ApiResponse::ok(Empty {}, "User logged out")))
}

// ============================================================================
// Refresh
// ============================================================================

/// POST /api/v1/users/refresh-token
///
/// The cookie wins over the body when both are present. A missing or
/// unreadable body is the same as no token (401).
pub async fn refresh_token<R, M>(
    State(state): State<AuthAppState<R, M>>,
    headers: HeaderMap,
    body: Bytes,
) -> AuthResult<impl IntoResponse>
where
    R: UserRepository + Send + Sync + 'static,
    M: MediaStore + Send + Sync + 'static,
{
    // A body that is not a JSON object carries no token
    let presented = match platform::cookie::extract_cookie(&headers, &state.config.refresh_cookie_name) {
        Some(token) => Some(token),
        None => serde_json::from_slice::<RefreshRequest>(&body)
            .ok()
            .and_then(|req| req.refresh_token),
    };

    let use_case = RefreshUseCase::new(state.repo.clone(), state.tokens.clone());
    let output = use_case.execute(presented.as_deref()).await?;

    let cookies = session_cookies(&state.config, &output.tokens)?;

    Ok((
        cookies,
        ApiResponse::ok(
            tokens_response(&output.user, output.tokens),
            "Access token refreshed",
        ),
    ))
}

// ============================================================================
// Current User
// ============================================================================

/// GET /api/v1/users/current-user
pub async fn current_user(AuthenticatedUser(user): AuthenticatedUser) -> impl IntoResponse {
    ApiResponse::ok(UserResponse::from(&user), "User fetched successfully")
}

// ============================================================================
// Helper Functions
// ============================================================================

async fn read_text(field: Field<'_>) -> AuthResult<String> {
    field
        .text()
        .await
        .map_err(|e| AuthError::InvalidBody(e.body_text()))
}

async fn read_file(field: Field<'_>) -> AuthResult<MediaFile> {
    let file_name = field
        .file_name()
        .or(field.name())
        .unwrap_or("upload")
        .to_string();
    let content_type = field.content_type().map(str::to_string);

    let bytes = field
        .bytes()
        .await
        .map_err(|e| AuthError::InvalidBody(e.body_text()))?;

    Ok(MediaFile::new(file_name, content_type, bytes.to_vec()))
}

fn tokens_response(user: &User, tokens: TokenPair) -> AuthTokensResponse {
    AuthTokensResponse {
        user: UserResponse::from(user),
        access_token: tokens.access_token,
        refresh_token: tokens.refresh_token,
    }
}

fn session_cookies(config: &AuthConfig, tokens: &TokenPair) -> AuthResult<SessionCookies> {
    let access = platform::cookie::set_cookie_header(&config.access_cookie(), &tokens.access_token)
        .ok_or_else(|| AuthError::Internal("access token is not a valid cookie value".to_string()))?;
    let refresh = platform::cookie::set_cookie_header(&config.refresh_cookie(), &tokens.refresh_token)
        .ok_or_else(|| AuthError::Internal("refresh token is not a valid cookie value".to_string()))?;

    Ok(AppendHeaders([
        (header::SET_COOKIE, access),
        (header::SET_COOKIE, refresh),
    ]))
}

fn cleared_cookies(config: &AuthConfig) -> AuthResult<SessionCookies> {
    let access = platform::cookie::delete_cookie_header(&config.access_cookie())
        .ok_or_else(|| AuthError::Internal("invalid access cookie attributes".to_string()))?;
    let refresh = platform::cookie::delete_cookie_header(&config.refresh_cookie())
        .ok_or_else(|| AuthError::Internal("invalid refresh cookie attributes".to_string()))?;

    Ok(AppendHeaders([
        (header::SET_COOKIE, access),
        (header::SET_COOKIE, refresh),
    ]))
}

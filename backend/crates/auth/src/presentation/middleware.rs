//! Auth Middleware
//!
//! Middleware for requiring a valid access token on protected routes.

use axum::extract::{ConnectInfo, FromRequestParts, Request, State};
use axum::http::request::Parts;
use axum::middleware::Next;
use axum::response::Response;
use platform::client::{extract_bearer_token, extract_client_ip};
use std::net::SocketAddr;

use crate::application::AuthenticateUseCase;
use crate::domain::entity::user::User;
use crate::domain::media::MediaStore;
use crate::domain::repository::UserRepository;
use crate::error::AuthError;
use crate::presentation::handlers::AuthAppState;

/// The user behind the request's access token
///
/// Inserted by [`require_access_token`]; handlers take it as an extractor.
#[derive(Debug, Clone)]
pub struct AuthenticatedUser(pub User);

impl<S> FromRequestParts<S> for AuthenticatedUser
where
    S: Send + Sync,
{
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthenticatedUser>()
            .cloned()
            .ok_or(AuthError::MissingToken)
    }
}

/// Middleware that requires a valid access token
///
/// Token source: `accessToken` cookie, else `Authorization: Bearer`.
pub async fn require_access_token<R, M>(
    State(state): State<AuthAppState<R, M>>,
    mut req: Request,
    next: Next,
) -> Result<Response, AuthError>
where
    R: UserRepository + Send + Sync + 'static,
    M: MediaStore + Send + Sync + 'static,
{
    let headers = req.headers();

    let token = platform::cookie::extract_cookie(headers, &state.config.access_cookie_name)
        .or_else(|| extract_bearer_token(headers));

    let connect_ip = req
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|info| info.0.ip());
    let client_ip = extract_client_ip(headers, connect_ip);

    let use_case = AuthenticateUseCase::new(state.repo.clone(), state.tokens.clone());

    let user = match use_case.execute(token.as_deref()).await {
        Ok(user) => user,
        Err(e) => {
            tracing::debug!(client_ip = ?client_ip, path = %req.uri().path(), "Access token rejected");
            return Err(e);
        }
    };

    req.extensions_mut().insert(AuthenticatedUser(user));

    Ok(next.run(req).await)
}

//! Auth Router

use axum::{
    Router,
    extract::DefaultBodyLimit,
    middleware,
    routing::{get, post},
};

use crate::application::config::AuthConfig;
use crate::domain::media::MediaStore;
use crate::domain::repository::UserRepository;
use crate::infra::{cloudinary::CloudinaryMediaStore, postgres::PgUserRepository};
use crate::presentation::handlers::{self, AuthAppState};
use crate::presentation::middleware::require_access_token;

/// Create the users router with PostgreSQL and Cloudinary
pub fn auth_router(
    repo: PgUserRepository,
    media: CloudinaryMediaStore,
    config: AuthConfig,
) -> Router {
    auth_router_generic(repo, media, config)
}

/// Create a users router for any repository / media store implementation
///
/// Mount under `/api/v1/users`.
pub fn auth_router_generic<R, M>(repo: R, media: M, config: AuthConfig) -> Router
where
    R: UserRepository + Send + Sync + 'static,
    M: MediaStore + Send + Sync + 'static,
{
    let upload_limit = config.max_upload_bytes;
    let state = AuthAppState::new(repo, media, config);

    let protected = Router::new()
        .route("/logout", post(handlers::logout::<R, M>))
        .route("/current-user", get(handlers::current_user))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            require_access_token::<R, M>,
        ));

    Router::new()
        .route(
            "/register",
            post(handlers::register::<R, M>).layer(DefaultBodyLimit::max(upload_limit)),
        )
        .route("/login", post(handlers::login::<R, M>))
        .route("/refresh-token", post(handlers::refresh_token::<R, M>))
        .merge(protected)
        .with_state(state)
}

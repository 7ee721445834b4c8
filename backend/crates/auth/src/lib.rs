//! Auth (Authentication) Backend Module
//!
//! Clean Architecture structure:
//! - `domain/` - Entities, value objects, repository and media traits
//! - `application/` - Use cases, token service and configuration
//! - `infra/` - PostgreSQL, Cloudinary and in-memory implementations
//! - `presentation/` - HTTP handlers, DTOs, middleware, router
//!
//! ## Features
//! - Registration with avatar / cover image upload (multipart)
//! - Login by user name or email
//! - Stateless access tokens plus a single server-side refresh token per user
//! - Refresh token rotation and logout revocation
//!
//! ## Security Model
//! - Passwords hashed with Argon2id, optional server-side pepper
//! - Access and refresh tokens are HS256 JWTs signed with separate secrets
//! - Only the refresh token stored on the user record is accepted
//! - Tokens are delivered as HttpOnly cookies and in the response body

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

// Re-exports for convenience
pub use application::config::AuthConfig;
pub use application::token::TokenService;
pub use error::{AuthError, AuthResult};
pub use infra::cloudinary::{CloudinaryConfig, CloudinaryMediaStore};
pub use infra::memory::{MemoryMediaStore, MemoryUserRepository};
pub use infra::postgres::PgUserRepository;
pub use presentation::router::{auth_router, auth_router_generic};

// Re-export kernel error types for unified error handling
pub use kernel::error::{
    app_error::{AppError, AppResult},
    kind::ErrorKind,
};

// Convenience re-exports
pub mod config {
    pub use crate::application::config::*;
}

pub mod models {
    pub use crate::domain::entity::*;
    pub use crate::domain::value_object::*;
    pub use crate::presentation::dto::*;
}

pub mod store {
    pub use crate::infra::postgres::PgUserRepository as UserStore;
}

pub mod middleware {
    pub use crate::presentation::middleware::*;
}

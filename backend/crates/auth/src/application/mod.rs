//! Application Layer
//!
//! Use cases and application services.

pub mod authenticate;
pub mod config;
pub mod login;
pub mod logout;
pub mod refresh;
pub mod register;
pub mod token;

// Re-exports
pub use authenticate::AuthenticateUseCase;
pub use config::{AuthConfig, ConfigError};
pub use login::{LoginInput, LoginOutput, LoginUseCase};
pub use logout::LogoutUseCase;
pub use refresh::{RefreshOutput, RefreshUseCase};
pub use register::{RegisterInput, RegisterUseCase};
pub use token::{AccessClaims, RefreshClaims, TokenPair, TokenService};

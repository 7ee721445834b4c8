//! Shared Kernel - Domain-crossing minimal core
//!
//! Vocabulary shared by every backend crate:
//! - [`error`]: the unified [`AppError`](error::app_error::AppError) and its HTTP mapping
//! - [`id`]: type-safe UUID wrappers
//! - [`response`]: the JSON success envelope returned by every endpoint
//!
//! Only things whose meaning is identical across crates belong here.

pub mod error {
    pub mod app_error;
    pub mod conversions;
    pub mod kind;
}
pub mod id;
pub mod response;

//! Infrastructure Layer
//!
//! Database implementations and external service integrations.

pub mod cloudinary;
pub mod memory;
pub mod postgres;

pub use cloudinary::{CloudinaryConfig, CloudinaryMediaStore};
pub use memory::{MemoryMediaStore, MemoryUserRepository};
pub use postgres::PgUserRepository;

//! Domain Layer
//!
//! Contains entities, value objects, and the persistence and media traits.

pub mod entity;
pub mod media;
pub mod repository;
pub mod value_object;

// Re-exports
pub use entity::user::User;
pub use media::{MediaError, MediaFile, MediaStore, UploadedMedia};
pub use repository::UserRepository;

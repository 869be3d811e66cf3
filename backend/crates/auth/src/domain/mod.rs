//! Domain Layer
//!
//! Contains entities, value objects, and repository traits.

pub mod entity;
pub mod hook;
pub mod repository;
pub mod value_object;

// Re-exports
pub use entity::user::{NewUser, User, UserChanges};
pub use hook::UserDeletionHook;
pub use repository::UserRepository;

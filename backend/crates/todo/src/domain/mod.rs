//! Domain Layer
//!
//! Contains entities, value objects, repository and storage traits.

pub mod entity;
pub mod repository;
pub mod storage;
pub mod value_object;

// Re-exports
pub use entity::todo::{NewTodo, Todo, TodoChanges, UpdatedTodo};
pub use repository::TodoRepository;
pub use storage::{PhotoStorage, PhotoUpload, StorageError};

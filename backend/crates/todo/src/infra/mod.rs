//! Infrastructure Layer
//!
//! PostgreSQL repository, filesystem photo storage, and in-memory
//! implementations of both for tests and local runs.

pub mod fs_storage;
pub mod memory;
pub mod postgres;

pub use fs_storage::FsPhotoStorage;
pub use memory::{InMemoryPhotoStorage, InMemoryTodoRepository};
pub use postgres::PgTodoRepository;

//! Todo Backend Module
//!
//! Clean Architecture structure:
//! - `domain/` - Todo entity, repository and photo storage traits
//! - `application/` - Use cases
//! - `infra/` - PostgreSQL, filesystem, and in-memory implementations
//! - `presentation/` - HTTP handlers, DTOs, form extractor, router
//!
//! Every route sits behind the bearer middleware from the `auth` crate.
//! Todos are private to their owner: another user's todo is reported as
//! not found. [`TodoCleanup`] removes a user's todos and photos before the
//! user row goes away.

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;


// Re-exports for convenience
pub use application::{config::TodoConfig, user_cleanup::TodoCleanup};
pub use error::{TodoError, TodoResult};
pub use infra::{
    fs_storage::FsPhotoStorage,
    memory::{InMemoryPhotoStorage, InMemoryTodoRepository},
    postgres::PgTodoRepository,
};
pub use presentation::router::{todo_router, todo_router_generic};

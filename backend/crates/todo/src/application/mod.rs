//! Application Layer
//!
//! Use cases and application services.

pub mod config;
pub mod create_todo;
pub mod delete_todo;
pub mod query_todos;
pub mod update_todo;
pub mod user_cleanup;

// Re-exports
pub use config::TodoConfig;
pub use create_todo::CreateTodoUseCase;
pub use delete_todo::DeleteTodoUseCase;
pub use query_todos::QueryTodosUseCase;
pub use update_todo::UpdateTodoUseCase;
pub use user_cleanup::TodoCleanup;

use crate::domain::storage::{PhotoStorage, PhotoUpload};

/// Create/update input shared by both use cases
#[derive(Debug, Default)]
pub struct TodoInput {
    pub title: String,
    pub done: bool,
    pub photo: Option<PhotoUpload>,
}

/// Remove a photo without failing the caller; the orphan is only logged
async fn discard_photo<S>(storage: &S, url: &str)
where
    S: PhotoStorage,
{
    if let Err(e) = storage.remove(url).await {
        tracing::warn!(error = %e, photo_url = %url, "Failed to remove photo");
    }
}

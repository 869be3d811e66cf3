//! Owner Cleanup
//!
//! Runs before a user row is deleted: every photo the user's todos reference
//! is removed, then the rows themselves. A photo that cannot be removed
//! aborts the user deletion.

use std::collections::HashSet;
use std::sync::Arc;

use auth::domain::hook::UserDeletionHook;
use auth::error::{AuthError, AuthResult};

use crate::application::discard_photo;
use crate::domain::repository::TodoRepository;
use crate::domain::storage::PhotoStorage;
use crate::domain::value_object::UserId;
use crate::error::TodoResult;

pub struct TodoCleanup<T, S>
where
    T: TodoRepository,
    S: PhotoStorage,
{
    todo_repo: Arc<T>,
    storage: Arc<S>,
}

impl<T, S> TodoCleanup<T, S>
where
    T: TodoRepository,
    S: PhotoStorage,
{
    pub fn new(todo_repo: Arc<T>, storage: Arc<S>) -> Self {
        Self { todo_repo, storage }
    }

    /// Remove the owner's photos and todos; returns the number of rows deleted
    pub async fn execute(&self, user_id: UserId) -> TodoResult<usize> {
        let mut removed = HashSet::new();
        for todo in self.todo_repo.list_by_owner(user_id).await? {
            if let Some(url) = todo.photo_url {
                self.storage.remove(&url).await?;
                removed.insert(url);
            }
        }

        let deleted = self.todo_repo.delete_by_owner(user_id).await?;

        // Photos attached between the listing and the delete
        for url in deleted.iter().filter_map(|t| t.photo_url.as_deref()) {
            if !removed.contains(url) {
                discard_photo(self.storage.as_ref(), url).await;
            }
        }

        tracing::info!(
            user_id = %user_id,
            todos = deleted.len(),
            photos = removed.len(),
            "Todos of deleted user purged"
        );

        Ok(deleted.len())
    }
}

impl<T, S> UserDeletionHook for TodoCleanup<T, S>
where
    T: TodoRepository + Send + Sync,
    S: PhotoStorage + Send + Sync,
{
    async fn before_user_deleted(&self, user_id: UserId) -> AuthResult<()> {
        self.execute(user_id)
            .await
            .map(|_| ())
            .map_err(|e| AuthError::Internal(format!("todo cleanup failed: {e}")))
    }
}

//! Delete Todo Use Case

use std::sync::Arc;

use crate::application::discard_photo;
use crate::domain::repository::TodoRepository;
use crate::domain::storage::PhotoStorage;
use crate::domain::value_object::{TodoId, UserId};
use crate::error::{TodoError, TodoResult};

pub struct DeleteTodoUseCase<T, S>
where
    T: TodoRepository,
    S: PhotoStorage,
{
    todo_repo: Arc<T>,
    storage: Arc<S>,
}

impl<T, S> DeleteTodoUseCase<T, S>
where
    T: TodoRepository,
    S: PhotoStorage,
{
    pub fn new(todo_repo: Arc<T>, storage: Arc<S>) -> Self {
        Self { todo_repo, storage }
    }

    /// Delete the row, then its photo (best-effort)
    pub async fn execute(&self, caller: UserId, todo_id: TodoId) -> TodoResult<()> {
        let existing = self.todo_repo.find_by_id(todo_id).await?;
        if !existing.is_owned_by(caller) {
            return Err(TodoError::NotFound);
        }

        let deleted = self.todo_repo.delete(todo_id).await?;

        if let Some(url) = &deleted.photo_url {
            discard_photo(self.storage.as_ref(), url).await;
        }

        tracing::info!(todo_id = %todo_id, user_id = %caller, "Todo deleted");

        Ok(())
    }
}

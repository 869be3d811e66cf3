//! Update Todo Use Case
//!
//! Photo replacement order: store the new file, update the row, then remove
//! the file the row held at the moment of the write. A failed row update
//! removes the new file, leaving the todo exactly as it was.

use std::sync::Arc;

use crate::application::{TodoInput, discard_photo};
use crate::domain::entity::todo::{Todo, TodoChanges};
use crate::domain::repository::TodoRepository;
use crate::domain::storage::PhotoStorage;
use crate::domain::value_object::{TodoId, UserId, todo_title::TodoTitle};
use crate::error::{TodoError, TodoResult};

pub struct UpdateTodoUseCase<T, S>
where
    T: TodoRepository,
    S: PhotoStorage,
{
    todo_repo: Arc<T>,
    storage: Arc<S>,
}

impl<T, S> UpdateTodoUseCase<T, S>
where
    T: TodoRepository,
    S: PhotoStorage,
{
    pub fn new(todo_repo: Arc<T>, storage: Arc<S>) -> Self {
        Self { todo_repo, storage }
    }

    pub async fn execute(
        &self,
        caller: UserId,
        todo_id: TodoId,
        input: TodoInput,
    ) -> TodoResult<Todo> {
        let existing = self.todo_repo.find_by_id(todo_id).await?;
        if !existing.is_owned_by(caller) {
            return Err(TodoError::NotFound);
        }

        let title = TodoTitle::new(input.title)?;

        let new_photo_url = match input.photo {
            Some(upload) => Some(self.storage.store(upload).await?),
            None => None,
        };

        let changes = TodoChanges {
            title,
            done: input.done,
            photo_url: new_photo_url.clone(),
        };

        let updated = match self.todo_repo.update(todo_id, changes).await {
            Ok(updated) => updated,
            Err(e) => {
                if let Some(url) = &new_photo_url {
                    discard_photo(self.storage.as_ref(), url).await;
                }
                return Err(e);
            }
        };

        let todo = updated.todo;
        if new_photo_url.is_some() {
            if let Some(old_url) = &updated.previous_photo_url {
                discard_photo(self.storage.as_ref(), old_url).await;
            }
        }

        tracing::info!(
            todo_id = %todo.todo_id,
            user_id = %caller,
            photo_replaced = new_photo_url.is_some(),
            "Todo updated"
        );

        Ok(todo)
    }
}

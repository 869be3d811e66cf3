//! Create Todo Use Case

use std::sync::Arc;

use crate::application::{TodoInput, discard_photo};
use crate::domain::entity::todo::{NewTodo, Todo};
use crate::domain::repository::TodoRepository;
use crate::domain::storage::PhotoStorage;
use crate::domain::value_object::{UserId, todo_title::TodoTitle};
use crate::error::TodoResult;

pub struct CreateTodoUseCase<T, S>
where
    T: TodoRepository,
    S: PhotoStorage,
{
    todo_repo: Arc<T>,
    storage: Arc<S>,
}

impl<T, S> CreateTodoUseCase<T, S>
where
    T: TodoRepository,
    S: PhotoStorage,
{
    pub fn new(todo_repo: Arc<T>, storage: Arc<S>) -> Self {
        Self { todo_repo, storage }
    }

    /// Create a todo owned by `owner`
    ///
    /// The photo, if any, is written before the row; a failed insert removes
    /// it again.
    pub async fn execute(&self, owner: UserId, input: TodoInput) -> TodoResult<Todo> {
        let title = TodoTitle::new(input.title)?;

        let photo_url = match input.photo {
            Some(upload) => Some(self.storage.store(upload).await?),
            None => None,
        };

        let new_todo = NewTodo {
            title,
            done: input.done,
            user_id: owner,
            photo_url: photo_url.clone(),
        };

        let todo = match self.todo_repo.create(new_todo).await {
            Ok(todo) => todo,
            Err(e) => {
                if let Some(url) = &photo_url {
                    discard_photo(self.storage.as_ref(), url).await;
                }
                return Err(e);
            }
        };

        tracing::info!(
            todo_id = %todo.todo_id,
            user_id = %owner,
            has_photo = todo.photo_url.is_some(),
            "Todo created"
        );

        Ok(todo)
    }
}

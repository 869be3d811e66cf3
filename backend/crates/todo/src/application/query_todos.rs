//! Todo Queries
//!
//! A todo owned by someone else is reported as `NotFound`, never as
//! forbidden, so ids of other users' todos are not confirmed.

use std::sync::Arc;

use crate::domain::entity::todo::Todo;
use crate::domain::repository::TodoRepository;
use crate::domain::value_object::{TodoId, UserId};
use crate::error::{TodoError, TodoResult};

pub struct QueryTodosUseCase<T>
where
    T: TodoRepository,
{
    todo_repo: Arc<T>,
}

impl<T> QueryTodosUseCase<T>
where
    T: TodoRepository,
{
    pub fn new(todo_repo: Arc<T>) -> Self {
        Self { todo_repo }
    }

    pub async fn list(&self, caller: UserId) -> TodoResult<Vec<Todo>> {
        self.todo_repo.list_by_owner(caller).await
    }

    pub async fn get(&self, caller: UserId, todo_id: TodoId) -> TodoResult<Todo> {
        let todo = self.todo_repo.find_by_id(todo_id).await?;
        if !todo.is_owned_by(caller) {
            return Err(TodoError::NotFound);
        }
        Ok(todo)
    }
}

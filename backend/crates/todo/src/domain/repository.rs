//! Repository Traits
//!
//! Missing rows are reported as [`TodoError::NotFound`](crate::error::TodoError),
//! including update/delete calls that affect zero rows.

use crate::domain::entity::todo::{NewTodo, Todo, TodoChanges, UpdatedTodo};
use crate::domain::value_object::{TodoId, UserId};
use crate::error::TodoResult;

/// Todo repository trait
#[trait_variant::make(TodoRepository: Send)]
pub trait LocalTodoRepository {
    async fn create(&self, new_todo: NewTodo) -> TodoResult<Todo>;

    async fn find_by_id(&self, todo_id: TodoId) -> TodoResult<Todo>;

    /// Replace title/done (and photo when given) and bump `updated_at`
    ///
    /// The previous photo URL is read in the same atomic step as the write.
    async fn update(&self, todo_id: TodoId, changes: TodoChanges) -> TodoResult<UpdatedTodo>;

    /// Remove the row and return it as it was at deletion
    async fn delete(&self, todo_id: TodoId) -> TodoResult<Todo>;

    /// Remove every todo owned by `user_id`; returns the removed rows
    async fn delete_by_owner(&self, user_id: UserId) -> TodoResult<Vec<Todo>>;

    /// Todos owned by `user_id`, ordered by id; empty when none
    async fn list_by_owner(&self, user_id: UserId) -> TodoResult<Vec<Todo>>;
}

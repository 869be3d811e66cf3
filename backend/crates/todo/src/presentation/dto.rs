//! API DTOs (Data Transfer Objects)

use chrono::{DateTime, Utc};
use kernel::id::{TodoId, UserId};
use serde::Serialize;

use crate::domain::entity::todo::Todo;

#[derive(Debug, Clone, Serialize)]
pub struct TodoResponse {
    pub id: TodoId,
    pub title: String,
    pub done: bool,
    pub user_id: UserId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub photo_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Todo> for TodoResponse {
    fn from(todo: Todo) -> Self {
        Self {
            id: todo.todo_id,
            title: todo.title.into_inner(),
            done: todo.done,
            user_id: todo.user_id,
            photo_url: todo.photo_url,
            created_at: todo.created_at,
            updated_at: todo.updated_at,
        }
    }
}

/// `data` payload of every todo response
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum TodoPayload {
    Todo(TodoResponse),
    Todos(Vec<TodoResponse>),
}

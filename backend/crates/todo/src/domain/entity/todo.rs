//! Todo Entity

use chrono::{DateTime, Utc};

use crate::domain::value_object::{TodoId, UserId, todo_title::TodoTitle};

/// Persisted todo
#[derive(Debug, Clone, PartialEq)]
pub struct Todo {
    /// Store-assigned, immutable
    pub todo_id: TodoId,
    pub title: TodoTitle,
    pub done: bool,
    /// Owner; never changes after creation
    pub user_id: UserId,
    pub photo_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Todo {
    pub fn is_owned_by(&self, user_id: UserId) -> bool {
        self.user_id == user_id
    }
}

/// Todo to be inserted; the store assigns the id and timestamps
#[derive(Debug, Clone)]
pub struct NewTodo {
    pub title: TodoTitle,
    pub done: bool,
    pub user_id: UserId,
    pub photo_url: Option<String>,
}

/// Full replacement of the mutable fields
///
/// `photo_url: None` keeps the stored photo.
#[derive(Debug, Clone)]
pub struct TodoChanges {
    pub title: TodoTitle,
    pub done: bool,
    pub photo_url: Option<String>,
}

/// Row after an update, with the photo URL it held just before
#[derive(Debug, Clone)]
pub struct UpdatedTodo {
    pub todo: Todo,
    pub previous_photo_url: Option<String>,
}

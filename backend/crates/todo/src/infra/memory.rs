//! In-Memory Implementations
//!
//! Same contracts as [`PgTodoRepository`](super::postgres::PgTodoRepository)
//! and [`FsPhotoStorage`](super::fs_storage::FsPhotoStorage).

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use chrono::Utc;
use parking_lot::Mutex;
use uuid::Uuid;

use crate::domain::entity::todo::{NewTodo, Todo, TodoChanges, UpdatedTodo};
use crate::domain::repository::TodoRepository;
use crate::domain::storage::{PhotoStorage, PhotoUpload, StorageError, file_name_from_url};
use crate::domain::value_object::{TodoId, UserId};
use crate::error::{TodoError, TodoResult};

// ============================================================================
// Todo repository
// ============================================================================

#[derive(Default)]
struct TodoTable {
    last_id: i64,
    rows: BTreeMap<TodoId, Todo>,
}

/// Mutex-guarded todo table; clones share the same data
#[derive(Clone, Default)]
pub struct InMemoryTodoRepository {
    table: Arc<Mutex<TodoTable>>,
}

impl InMemoryTodoRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

impl TodoRepository for InMemoryTodoRepository {
    async fn create(&self, new_todo: NewTodo) -> TodoResult<Todo> {
        let mut table = self.table.lock();
        table.last_id += 1;

        let now = Utc::now();
        let todo = Todo {
            todo_id: TodoId::new(table.last_id),
            title: new_todo.title,
            done: new_todo.done,
            user_id: new_todo.user_id,
            photo_url: new_todo.photo_url,
            created_at: now,
            updated_at: now,
        };
        table.rows.insert(todo.todo_id, todo.clone());

        Ok(todo)
    }

    async fn find_by_id(&self, todo_id: TodoId) -> TodoResult<Todo> {
        self.table
            .lock()
            .rows
            .get(&todo_id)
            .cloned()
            .ok_or(TodoError::NotFound)
    }

    async fn update(&self, todo_id: TodoId, changes: TodoChanges) -> TodoResult<UpdatedTodo> {
        let mut table = self.table.lock();
        let todo = table.rows.get_mut(&todo_id).ok_or(TodoError::NotFound)?;

        let previous_photo_url = todo.photo_url.clone();
        todo.title = changes.title;
        todo.done = changes.done;
        if let Some(url) = changes.photo_url {
            todo.photo_url = Some(url);
        }
        todo.updated_at = Utc::now();

        Ok(UpdatedTodo {
            todo: todo.clone(),
            previous_photo_url,
        })
    }

    async fn delete(&self, todo_id: TodoId) -> TodoResult<Todo> {
        self.table
            .lock()
            .rows
            .remove(&todo_id)
            .ok_or(TodoError::NotFound)
    }

    async fn delete_by_owner(&self, user_id: UserId) -> TodoResult<Vec<Todo>> {
        let mut table = self.table.lock();
        let ids: Vec<TodoId> = table
            .rows
            .values()
            .filter(|t| t.is_owned_by(user_id))
            .map(|t| t.todo_id)
            .collect();

        Ok(ids
            .into_iter()
            .filter_map(|id| table.rows.remove(&id))
            .collect())
    }

    async fn list_by_owner(&self, user_id: UserId) -> TodoResult<Vec<Todo>> {
        Ok(self
            .table
            .lock()
            .rows
            .values()
            .filter(|t| t.is_owned_by(user_id))
            .cloned()
            .collect())
    }
}

// ============================================================================
// Photo storage
// ============================================================================

/// Photo blobs kept in a map keyed by file name
#[derive(Clone)]
pub struct InMemoryPhotoStorage {
    public_base_url: String,
    files: Arc<Mutex<HashMap<String, Vec<u8>>>>,
}

impl InMemoryPhotoStorage {
    pub fn new(public_base_url: impl Into<String>) -> Self {
        Self {
            public_base_url: public_base_url.into().trim_end_matches('/').to_string(),
            files: Arc::default(),
        }
    }

    /// Whether a file is currently stored behind `url`
    pub fn contains(&self, url: &str) -> bool {
        file_name_from_url(&self.public_base_url, url)
            .map(|name| self.files.lock().contains_key(name))
            .unwrap_or(false)
    }

    pub fn len(&self) -> usize {
        self.files.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.lock().is_empty()
    }
}

impl Default for InMemoryPhotoStorage {
    fn default() -> Self {
        Self::new("http://localhost:8080/uploads")
    }
}

impl PhotoStorage for InMemoryPhotoStorage {
    async fn store(&self, upload: PhotoUpload) -> Result<String, StorageError> {
        let file_name = format!("{}{}", Uuid::new_v4(), upload.extension());
        let url = format!("{}/{}", self.public_base_url, file_name);
        self.files.lock().insert(file_name, upload.bytes);
        Ok(url)
    }

    async fn remove(&self, url: &str) -> Result<(), StorageError> {
        let name = file_name_from_url(&self.public_base_url, url)?;
        self.files.lock().remove(name);
        Ok(())
    }
}

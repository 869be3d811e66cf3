//! PostgreSQL Repository Implementation

use chrono::{DateTime, Utc};
use sqlx::PgPool;

use crate::domain::entity::todo::{NewTodo, Todo, TodoChanges, UpdatedTodo};
use crate::domain::repository::TodoRepository;
use crate::domain::value_object::{TodoId, UserId, todo_title::TodoTitle};
use crate::error::{TodoError, TodoResult};

/// PostgreSQL-backed todo repository
#[derive(Clone)]
pub struct PgTodoRepository {
    pool: PgPool,
}

impl PgTodoRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

impl TodoRepository for PgTodoRepository {
    async fn create(&self, new_todo: NewTodo) -> TodoResult<Todo> {
        let row = sqlx::query_as::<_, TodoRow>(
            r#"
            INSERT INTO todos (title, done, user_id, photo_url)
            VALUES ($1, $2, $3, $4)
            RETURNING id, title, done, user_id, photo_url, created_at, updated_at
            "#,
        )
        .bind(new_todo.title.as_str())
        .bind(new_todo.done)
        .bind(new_todo.user_id.value())
        .bind(new_todo.photo_url.as_deref())
        .fetch_one(&self.pool)
        .await?;

        Ok(row.into_todo())
    }

    async fn find_by_id(&self, todo_id: TodoId) -> TodoResult<Todo> {
        let row = sqlx::query_as::<_, TodoRow>(
            r#"
            SELECT id, title, done, user_id, photo_url, created_at, updated_at
            FROM todos
            WHERE id = $1
            "#,
        )
        .bind(todo_id.value())
        .fetch_optional(&self.pool)
        .await?;

        row.map(TodoRow::into_todo).ok_or(TodoError::NotFound)
    }

    async fn update(&self, todo_id: TodoId, changes: TodoChanges) -> TodoResult<UpdatedTodo> {
        let row = sqlx::query_as::<_, UpdatedTodoRow>(
            r#"
            WITH previous AS (
                SELECT id, photo_url FROM todos WHERE id = $1 FOR UPDATE
            )
            UPDATE todos t
            SET title = $2,
                done = $3,
                photo_url = COALESCE($4, t.photo_url),
                updated_at = NOW()
            FROM previous
            WHERE t.id = previous.id
            RETURNING t.id, t.title, t.done, t.user_id, t.photo_url, t.created_at,
                      t.updated_at, previous.photo_url AS previous_photo_url
            "#,
        )
        .bind(todo_id.value())
        .bind(changes.title.as_str())
        .bind(changes.done)
        .bind(changes.photo_url.as_deref())
        .fetch_optional(&self.pool)
        .await?;

        row.map(|row| UpdatedTodo {
            todo: row.todo.into_todo(),
            previous_photo_url: row.previous_photo_url,
        })
        .ok_or(TodoError::NotFound)
    }

    async fn delete(&self, todo_id: TodoId) -> TodoResult<Todo> {
        let row = sqlx::query_as::<_, TodoRow>(
            r#"
            DELETE FROM todos
            WHERE id = $1
            RETURNING id, title, done, user_id, photo_url, created_at, updated_at
            "#,
        )
        .bind(todo_id.value())
        .fetch_optional(&self.pool)
        .await?;

        row.map(TodoRow::into_todo).ok_or(TodoError::NotFound)
    }

    async fn delete_by_owner(&self, user_id: UserId) -> TodoResult<Vec<Todo>> {
        let rows = sqlx::query_as::<_, TodoRow>(
            r#"
            DELETE FROM todos
            WHERE user_id = $1
            RETURNING id, title, done, user_id, photo_url, created_at, updated_at
            "#,
        )
        .bind(user_id.value())
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(TodoRow::into_todo).collect())
    }

    async fn list_by_owner(&self, user_id: UserId) -> TodoResult<Vec<Todo>> {
        let rows = sqlx::query_as::<_, TodoRow>(
            r#"
            SELECT id, title, done, user_id, photo_url, created_at, updated_at
            FROM todos
            WHERE user_id = $1
            ORDER BY id
            "#,
        )
        .bind(user_id.value())
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(TodoRow::into_todo).collect())
    }
}

// ============================================================================
// Row types
// ============================================================================

#[derive(sqlx::FromRow)]
struct TodoRow {
    id: i64,
    title: String,
    done: bool,
    user_id: i64,
    photo_url: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

#[derive(sqlx::FromRow)]
struct UpdatedTodoRow {
    #[sqlx(flatten)]
    todo: TodoRow,
    previous_photo_url: Option<String>,
}

impl TodoRow {
    fn into_todo(self) -> Todo {
        Todo {
            todo_id: TodoId::new(self.id),
            title: TodoTitle::from_db(self.title),
            done: self.done,
            user_id: UserId::new(self.user_id),
            photo_url: self.photo_url,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

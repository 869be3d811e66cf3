//! PostgreSQL Repository Implementations

use chrono::{DateTime, Utc};
use kernel::error::conversions::is_unique_violation;
use sqlx::PgPool;

use crate::domain::entity::user::{NewUser, User, UserChanges};
use crate::domain::repository::UserRepository;
use crate::domain::value_object::{UserId, user_name::UserName, user_password::UserPassword};
use crate::error::{AuthError, AuthResult};

/// PostgreSQL-backed auth repository
#[derive(Clone)]
pub struct PgAuthRepository {
    pool: PgPool,
}

impl PgAuthRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Unique violation on `users.username` becomes `UserNameTaken`
fn map_write_error(err: sqlx::Error) -> AuthError {
    if is_unique_violation(&err) {
        AuthError::UserNameTaken
    } else {
        AuthError::Database(err)
    }
}

// ============================================================================
// User Repository Implementation
// ============================================================================

impl UserRepository for PgAuthRepository {
    async fn create(&self, new_user: NewUser) -> AuthResult<User> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            INSERT INTO users (username, password_hash)
            VALUES ($1, $2)
            RETURNING id, username, password_hash, created_at, updated_at
            "#,
        )
        .bind(new_user.user_name.as_str())
        .bind(new_user.password_hash.as_phc_string())
        .fetch_one(&self.pool)
        .await
        .map_err(map_write_error)?;

        row.into_user()
    }

    async fn find_by_id(&self, user_id: UserId) -> AuthResult<User> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT id, username, password_hash, created_at, updated_at
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(user_id.value())
        .fetch_optional(&self.pool)
        .await?;

        row.ok_or(AuthError::UserNotFound)?.into_user()
    }

    async fn find_by_user_name(&self, user_name: &UserName) -> AuthResult<User> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT id, username, password_hash, created_at, updated_at
            FROM users
            WHERE username = $1
            "#,
        )
        .bind(user_name.as_str())
        .fetch_optional(&self.pool)
        .await?;

        row.ok_or(AuthError::UserNotFound)?.into_user()
    }

    async fn update(&self, user_id: UserId, changes: UserChanges) -> AuthResult<User> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            UPDATE users
            SET username = COALESCE($2, username),
                password_hash = COALESCE($3, password_hash),
                updated_at = NOW()
            WHERE id = $1
            RETURNING id, username, password_hash, created_at, updated_at
            "#,
        )
        .bind(user_id.value())
        .bind(changes.user_name.as_ref().map(UserName::as_str))
        .bind(changes.password_hash.as_ref().map(UserPassword::as_phc_string))
        .fetch_optional(&self.pool)
        .await
        .map_err(map_write_error)?;

        row.ok_or(AuthError::UserNotFound)?.into_user()
    }

    async fn delete(&self, user_id: UserId) -> AuthResult<()> {
        let affected = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(user_id.value())
            .execute(&self.pool)
            .await?
            .rows_affected();

        if affected == 0 {
            return Err(AuthError::UserNotFound);
        }

        Ok(())
    }

    async fn list_all(&self) -> AuthResult<Vec<User>> {
        let rows = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT id, username, password_hash, created_at, updated_at
            FROM users
            ORDER BY id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(UserRow::into_user).collect()
    }
}

// ============================================================================
// Row types
// ============================================================================

#[derive(sqlx::FromRow)]
struct UserRow {
    id: i64,
    username: String,
    password_hash: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl UserRow {
    fn into_user(self) -> AuthResult<User> {
        let password_hash = UserPassword::from_db(self.password_hash).map_err(|e| {
            AuthError::Internal(format!("Invalid password_hash for user {}: {}", self.id, e))
        })?;

        Ok(User {
            user_id: UserId::new(self.id),
            user_name: UserName::from_db(self.username),
            password_hash,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

//! In-Memory Repository Implementation
//!
//! Same contract as [`PgAuthRepository`](super::postgres::PgAuthRepository),
//! including username uniqueness and `UserNotFound` on missing ids.

use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::Utc;
use parking_lot::Mutex;

use crate::domain::entity::user::{NewUser, User, UserChanges};
use crate::domain::repository::UserRepository;
use crate::domain::value_object::{UserId, user_name::UserName};
use crate::error::{AuthError, AuthResult};

#[derive(Default)]
struct UserTable {
    last_id: i64,
    rows: BTreeMap<UserId, User>,
}

impl UserTable {
    fn name_taken(&self, user_name: &UserName, except: Option<UserId>) -> bool {
        self.rows
            .values()
            .any(|u| &u.user_name == user_name && Some(u.user_id) != except)
    }
}

/// Mutex-guarded user table; clones share the same data
#[derive(Clone, Default)]
pub struct InMemoryUserRepository {
    table: Arc<Mutex<UserTable>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

impl UserRepository for InMemoryUserRepository {
    async fn create(&self, new_user: NewUser) -> AuthResult<User> {
        let mut table = self.table.lock();
        if table.name_taken(&new_user.user_name, None) {
            return Err(AuthError::UserNameTaken);
        }

        table.last_id += 1;
        let now = Utc::now();
        let user = User {
            user_id: UserId::new(table.last_id),
            user_name: new_user.user_name,
            password_hash: new_user.password_hash,
            created_at: now,
            updated_at: now,
        };
        table.rows.insert(user.user_id, user.clone());

        Ok(user)
    }

    async fn find_by_id(&self, user_id: UserId) -> AuthResult<User> {
        self.table
            .lock()
            .rows
            .get(&user_id)
            .cloned()
            .ok_or(AuthError::UserNotFound)
    }

    async fn find_by_user_name(&self, user_name: &UserName) -> AuthResult<User> {
        self.table
            .lock()
            .rows
            .values()
            .find(|u| &u.user_name == user_name)
            .cloned()
            .ok_or(AuthError::UserNotFound)
    }

    async fn update(&self, user_id: UserId, changes: UserChanges) -> AuthResult<User> {
        let mut table = self.table.lock();
        if let Some(name) = &changes.user_name {
            if table.name_taken(name, Some(user_id)) {
                return Err(AuthError::UserNameTaken);
            }
        }

        let user = table
            .rows
            .get_mut(&user_id)
            .ok_or(AuthError::UserNotFound)?;
        if let Some(name) = changes.user_name {
            user.user_name = name;
        }
        if let Some(hash) = changes.password_hash {
            user.password_hash = hash;
        }
        user.updated_at = Utc::now();

        Ok(user.clone())
    }

    async fn delete(&self, user_id: UserId) -> AuthResult<()> {
        self.table
            .lock()
            .rows
            .remove(&user_id)
            .map(|_| ())
            .ok_or(AuthError::UserNotFound)
    }

    async fn list_all(&self) -> AuthResult<Vec<User>> {
        Ok(self.table.lock().rows.values().cloned().collect())
    }
}

//! User Entity

use chrono::{DateTime, Utc};

use crate::domain::value_object::{UserId, user_name::UserName, user_password::UserPassword};

/// Persisted user
///
/// `password_hash` never leaves the crate in a response.
#[derive(Debug, Clone)]
pub struct User {
    /// Store-assigned, immutable
    pub user_id: UserId,
    /// Unique
    pub user_name: UserName,
    pub password_hash: UserPassword,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// User to be inserted; the store assigns the id and timestamps
#[derive(Debug, Clone)]
pub struct NewUser {
    pub user_name: UserName,
    pub password_hash: UserPassword,
}

/// Partial update; `None` keeps the stored value
#[derive(Debug, Clone, Default)]
pub struct UserChanges {
    pub user_name: Option<UserName>,
    pub password_hash: Option<UserPassword>,
}

impl UserChanges {
    pub fn is_empty(&self) -> bool {
        self.user_name.is_none() && self.password_hash.is_none()
    }
}

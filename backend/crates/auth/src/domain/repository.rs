//! Repository Traits
//!
//! Interfaces for data persistence. Implementations live in the infrastructure
//! layer (PostgreSQL and in-memory).
//!
//! Missing rows are reported as [`AuthError::UserNotFound`](crate::error::AuthError),
//! including update/delete calls that affect zero rows.

use crate::domain::entity::user::{NewUser, User, UserChanges};
use crate::domain::value_object::{UserId, user_name::UserName};
use crate::error::AuthResult;

/// User repository trait
#[trait_variant::make(UserRepository: Send)]
pub trait LocalUserRepository {
    /// Insert a user; `UserNameTaken` on unique violation
    async fn create(&self, new_user: NewUser) -> AuthResult<User>;

    async fn find_by_id(&self, user_id: UserId) -> AuthResult<User>;

    async fn find_by_user_name(&self, user_name: &UserName) -> AuthResult<User>;

    /// Apply `changes` and bump `updated_at`
    async fn update(&self, user_id: UserId, changes: UserChanges) -> AuthResult<User>;

    async fn delete(&self, user_id: UserId) -> AuthResult<()>;

    /// All users ordered by id
    async fn list_all(&self) -> AuthResult<Vec<User>>;
}

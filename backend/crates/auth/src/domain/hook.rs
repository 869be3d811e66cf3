//! User Deletion Hook
//!
//! Lets other modules release data owned by a user before the user row is
//! removed. An error aborts the deletion and leaves the user in place.

use crate::domain::value_object::UserId;
use crate::error::AuthResult;

#[trait_variant::make(UserDeletionHook: Send)]
pub trait LocalUserDeletionHook {
    async fn before_user_deleted(&self, user_id: UserId) -> AuthResult<()>;
}

/// No dependent data
impl UserDeletionHook for () {
    async fn before_user_deleted(&self, _user_id: UserId) -> AuthResult<()> {
        Ok(())
    }
}

//! User Administration Use Case
//!
//! Listing and lookup are open to any authenticated caller; update and
//! delete only to the owner of the record.

use std::sync::Arc;

use crate::application::passwords::PasswordService;
use crate::domain::entity::user::{User, UserChanges};
use crate::domain::hook::UserDeletionHook;
use crate::domain::repository::UserRepository;
use crate::domain::value_object::{UserId, user_name::UserName, user_password::RawPassword};
use crate::error::{AuthError, AuthResult};

/// Update input; blank fields keep the stored value
#[derive(Default)]
pub struct UpdateUserInput {
    pub user_name: Option<String>,
    pub password: Option<String>,
}

/// User administration use case
pub struct ManageUsersUseCase<U, H>
where
    U: UserRepository,
    H: UserDeletionHook,
{
    user_repo: Arc<U>,
    passwords: PasswordService,
    hook: Arc<H>,
}

impl<U, H> ManageUsersUseCase<U, H>
where
    U: UserRepository,
    H: UserDeletionHook,
{
    pub fn new(user_repo: Arc<U>, passwords: PasswordService, hook: Arc<H>) -> Self {
        Self {
            user_repo,
            passwords,
            hook,
        }
    }

    pub async fn list(&self) -> AuthResult<Vec<User>> {
        self.user_repo.list_all().await
    }

    pub async fn get(&self, user_id: UserId) -> AuthResult<User> {
        self.user_repo.find_by_id(user_id).await
    }

    pub async fn update(
        &self,
        actor: UserId,
        user_id: UserId,
        input: UpdateUserInput,
    ) -> AuthResult<User> {
        ensure_self(actor, user_id)?;

        let mut changes = UserChanges::default();

        if let Some(name) = input.user_name.filter(|n| !n.trim().is_empty()) {
            changes.user_name = Some(UserName::new(name)?);
        }

        // Empty password keeps the existing hash
        if let Some(password) = input.password.filter(|p| !p.is_empty()) {
            let raw_password = RawPassword::new(password)?;
            changes.password_hash = Some(self.passwords.hash(raw_password).await?);
        }

        let password_changed = changes.password_hash.is_some();
        let user = self.user_repo.update(user_id, changes).await?;

        tracing::info!(
            user_id = %user.user_id,
            user_name = %user.user_name,
            password_changed,
            "User updated"
        );

        Ok(user)
    }

    pub async fn delete(&self, actor: UserId, user_id: UserId) -> AuthResult<()> {
        ensure_self(actor, user_id)?;

        // Unknown ids fail here before the hook touches dependent data
        self.user_repo.find_by_id(user_id).await?;
        self.hook.before_user_deleted(user_id).await?;
        self.user_repo.delete(user_id).await?;

        tracing::info!(user_id = %user_id, "User deleted");

        Ok(())
    }
}

fn ensure_self(actor: UserId, user_id: UserId) -> AuthResult<()> {
    if actor == user_id {
        Ok(())
    } else {
        Err(AuthError::Forbidden)
    }
}

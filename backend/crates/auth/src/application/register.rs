//! Register Use Case
//!
//! Creates a new user account.

use std::sync::Arc;

use crate::application::passwords::PasswordService;
use crate::domain::entity::user::{NewUser, User};
use crate::domain::repository::UserRepository;
use crate::domain::value_object::{user_name::UserName, user_password::RawPassword};
use crate::error::AuthResult;

/// Register input
pub struct RegisterInput {
    pub user_name: String,
    pub password: String,
}

/// Register use case
pub struct RegisterUseCase<U>
where
    U: UserRepository,
{
    user_repo: Arc<U>,
    passwords: PasswordService,
}

impl<U> RegisterUseCase<U>
where
    U: UserRepository,
{
    pub fn new(user_repo: Arc<U>, passwords: PasswordService) -> Self {
        Self {
            user_repo,
            passwords,
        }
    }

    pub async fn execute(&self, input: RegisterInput) -> AuthResult<User> {
        let user_name = UserName::new(&input.user_name)?;

        let raw_password = RawPassword::new(input.password)?;
        let password_hash = self.passwords.hash(raw_password).await?;

        // Uniqueness is enforced by the store (UNIQUE index)
        let user = self
            .user_repo
            .create(NewUser {
                user_name,
                password_hash,
            })
            .await?;

        tracing::info!(
            user_id = %user.user_id,
            user_name = %user.user_name,
            "User registered"
        );

        Ok(user)
    }
}

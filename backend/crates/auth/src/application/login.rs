//! Login Use Case
//!
//! Verifies credentials and issues an access/refresh token pair.

use std::sync::Arc;

use platform::token::{TokenPair, TokenService};

use crate::application::passwords::PasswordService;
use crate::domain::repository::UserRepository;
use crate::domain::value_object::{user_name::UserName, user_password::RawPassword};
use crate::error::{AuthError, AuthResult};

/// Login input
pub struct LoginInput {
    pub user_name: String,
    pub password: String,
}

/// Login use case
pub struct LoginUseCase<U>
where
    U: UserRepository,
{
    user_repo: Arc<U>,
    passwords: PasswordService,
    tokens: Arc<TokenService>,
}

impl<U> LoginUseCase<U>
where
    U: UserRepository,
{
    pub fn new(user_repo: Arc<U>, passwords: PasswordService, tokens: Arc<TokenService>) -> Self {
        Self {
            user_repo,
            passwords,
            tokens,
        }
    }

    /// Unknown user and wrong password both fail with `InvalidCredentials`
    /// after one Argon2 verification
    pub async fn execute(&self, input: LoginInput) -> AuthResult<TokenPair> {
        let raw_password =
            RawPassword::new(input.password).map_err(|_| AuthError::InvalidCredentials)?;

        let Ok(user_name) = UserName::new(&input.user_name) else {
            self.passwords.verify_unknown_user(raw_password).await;
            return Err(AuthError::InvalidCredentials);
        };

        let user = match self.user_repo.find_by_user_name(&user_name).await {
            Ok(user) => user,
            Err(AuthError::UserNotFound) => {
                self.passwords.verify_unknown_user(raw_password).await;
                return Err(AuthError::InvalidCredentials);
            }
            Err(e) => return Err(e),
        };

        if !self
            .passwords
            .verify(user.password_hash.clone(), raw_password)
            .await?
        {
            return Err(AuthError::InvalidCredentials);
        }

        let pair = self.tokens.issue_pair(user.user_id.value())?;

        tracing::info!(user_id = %user.user_id, "User signed in");

        Ok(pair)
    }
}

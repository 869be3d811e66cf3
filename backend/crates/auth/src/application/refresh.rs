//! Refresh Use Case
//!
//! Exchanges a valid refresh token for a fresh token pair. The presented
//! token stays valid until it expires.

use std::sync::Arc;

use platform::token::{TokenKind, TokenPair, TokenService};

use crate::domain::repository::UserRepository;
use crate::domain::value_object::UserId;
use crate::error::{AuthError, AuthResult};

/// Refresh use case
pub struct RefreshUseCase<U>
where
    U: UserRepository,
{
    user_repo: Arc<U>,
    tokens: Arc<TokenService>,
}

impl<U> RefreshUseCase<U>
where
    U: UserRepository,
{
    pub fn new(user_repo: Arc<U>, tokens: Arc<TokenService>) -> Self {
        Self { user_repo, tokens }
    }

    pub async fn execute(&self, refresh_token: &str) -> AuthResult<TokenPair> {
        let claims = self.tokens.verify_kind(refresh_token, TokenKind::Refresh)?;

        // The account may have been deleted since the token was issued
        let user = match self.user_repo.find_by_id(UserId::new(claims.user_id)).await {
            Ok(user) => user,
            Err(AuthError::UserNotFound) => return Err(AuthError::InvalidCredentials),
            Err(e) => return Err(e),
        };

        let pair = self.tokens.issue_pair(user.user_id.value())?;

        tracing::info!(user_id = %user.user_id, "Tokens refreshed");

        Ok(pair)
    }
}

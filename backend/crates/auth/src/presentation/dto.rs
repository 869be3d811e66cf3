//! API DTOs (Data Transfer Objects)

use kernel::id::UserId;
use platform::token::TokenPair;
use serde::{Deserialize, Serialize};

use crate::domain::entity::user::User;

// ============================================================================
// Requests
// ============================================================================

/// POST /register
#[derive(Deserialize)]
pub struct RegisterRequest {
    pub username: String,
    pub password: String,
}

/// POST /login
#[derive(Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// POST /refresh
#[derive(Deserialize)]
pub struct RefreshRequest {
    pub refresh_token: String,
}

/// PUT /users/{id}
#[derive(Default, Deserialize)]
pub struct UpdateUserRequest {
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
}

// ============================================================================
// Responses
// ============================================================================

/// Public view of a user; the password hash is never serialized
#[derive(Debug, Clone, Serialize)]
pub struct UserResponse {
    pub id: UserId,
    pub username: String,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.user_id,
            username: user.user_name.into_inner(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct TokenPairResponse {
    pub access_token: String,
    pub refresh_token: String,
}

impl From<TokenPair> for TokenPairResponse {
    fn from(pair: TokenPair) -> Self {
        Self {
            access_token: pair.access_token,
            refresh_token: pair.refresh_token,
        }
    }
}

/// `data` payload of every auth response
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum AuthPayload {
    User(UserResponse),
    Users(Vec<UserResponse>),
    Tokens(TokenPairResponse),
}

//! Auth Error Types
//!
//! This module provides auth-specific error variants that integrate
//! with the unified `kernel::error::AppError` system.

use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use kernel::id::IdParseError;
use platform::password::PasswordHashError;
use platform::token::TokenError;
use thiserror::Error;

use crate::domain::value_object::user_name::UserNameError;

/// Auth-specific result type alias
pub type AuthResult<T> = Result<T, AuthError>;

/// Auth-specific error variants
#[derive(Debug, Error)]
pub enum AuthError {
    /// Request body failed validation or could not be parsed
    #[error("invalid payload: {0}")]
    InvalidPayload(String),

    #[error("invalid id")]
    InvalidId(#[from] IdParseError),

    #[error("no auth header")]
    MissingAuthHeader,

    #[error("invalid auth header")]
    InvalidAuthHeader,

    /// Token failed verification (or could not be signed)
    #[error("invalid token: {0}")]
    InvalidToken(#[from] TokenError),

    /// Unknown user name or wrong password; callers cannot tell them apart
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// Acting on another user's record
    #[error("forbidden")]
    Forbidden,

    #[error("user not found")]
    UserNotFound,

    #[error("username already taken")]
    UserNameTaken,

    #[error("password hashing failed: {0}")]
    PasswordHash(#[from] PasswordHashError),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AuthError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        StatusCode::from_u16(self.kind().status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }

    /// Get the ErrorKind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            AuthError::InvalidPayload(_) | AuthError::InvalidId(_) => ErrorKind::BadRequest,
            AuthError::InvalidToken(TokenError::Signing(_)) => ErrorKind::InternalServerError,
            AuthError::MissingAuthHeader
            | AuthError::InvalidAuthHeader
            | AuthError::InvalidToken(_)
            | AuthError::InvalidCredentials => ErrorKind::Unauthorized,
            AuthError::Forbidden => ErrorKind::Forbidden,
            AuthError::UserNotFound => ErrorKind::NotFound,
            AuthError::UserNameTaken => ErrorKind::Conflict,
            AuthError::PasswordHash(_) | AuthError::Database(_) | AuthError::Internal(_) => {
                ErrorKind::InternalServerError
            }
        }
    }

    /// Convert to AppError
    ///
    /// Variant payloads go to `errors`; the message stays short and stable.
    pub fn to_app_error(&self) -> AppError {
        match self {
            AuthError::InvalidPayload(detail) => {
                AppError::bad_request("invalid payload").with_detail(detail.clone())
            }
            AuthError::InvalidId(e) => AppError::bad_request("invalid id").with_detail(e.to_string()),
            AuthError::InvalidToken(TokenError::Expired) => AppError::unauthorized("token expired"),
            AuthError::InvalidToken(_) => AppError::new(self.kind(), "invalid token"),
            other => AppError::new(other.kind(), other.to_string()),
        }
    }

    /// Log the error with appropriate level
    fn log(&self) {
        match self {
            AuthError::Database(e) => {
                tracing::error!(error = %e, "Auth database error");
            }
            AuthError::PasswordHash(e) => {
                tracing::error!(error = %e, "Password hashing error");
            }
            AuthError::Internal(msg) => {
                tracing::error!(message = %msg, "Auth internal error");
            }
            AuthError::InvalidToken(TokenError::Signing(msg)) => {
                tracing::error!(message = %msg, "Token signing error");
            }
            AuthError::InvalidCredentials => {
                tracing::warn!("Invalid login attempt");
            }
            AuthError::InvalidToken(e) => {
                tracing::warn!(reason = %e, "Rejected bearer token");
            }
            _ => {
                tracing::debug!(error = %self, "Auth error");
            }
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        self.log();
        self.to_app_error().into_response()
    }
}

impl From<JsonRejection> for AuthError {
    fn from(rejection: JsonRejection) -> Self {
        AuthError::InvalidPayload(rejection.body_text())
    }
}

impl From<UserNameError> for AuthError {
    fn from(err: UserNameError) -> Self {
        AuthError::InvalidPayload(err.to_string())
    }
}

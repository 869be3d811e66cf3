//! Todo Error Types
//!
//! Todo-specific error variants that integrate with the unified
//! `kernel::error::AppError` system.

use axum::extract::multipart::{MultipartError, MultipartRejection};
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use kernel::id::IdParseError;
use thiserror::Error;

use crate::domain::storage::StorageError;
use crate::domain::value_object::todo_title::TodoTitleError;

/// Todo-specific result type alias
pub type TodoResult<T> = Result<T, TodoError>;

/// Todo-specific error variants
#[derive(Debug, Error)]
pub enum TodoError {
    /// Request body failed validation or could not be parsed
    #[error("invalid payload: {0}")]
    InvalidPayload(String),

    #[error("invalid id")]
    InvalidId(#[from] IdParseError),

    /// Missing, or owned by someone else
    #[error("Todo not found")]
    NotFound,

    #[error("upload too large")]
    PayloadTooLarge,

    #[error("unsupported content type: {0}")]
    UnsupportedMediaType(String),

    #[error("photo storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl TodoError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        StatusCode::from_u16(self.kind().status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }

    /// Get the ErrorKind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            TodoError::InvalidPayload(_) | TodoError::InvalidId(_) => ErrorKind::BadRequest,
            TodoError::NotFound => ErrorKind::NotFound,
            TodoError::PayloadTooLarge => ErrorKind::PayloadTooLarge,
            TodoError::UnsupportedMediaType(_) => ErrorKind::UnsupportedMediaType,
            TodoError::Storage(_) | TodoError::Database(_) | TodoError::Internal(_) => {
                ErrorKind::InternalServerError
            }
        }
    }

    /// Convert to AppError
    pub fn to_app_error(&self) -> AppError {
        match self {
            TodoError::InvalidPayload(detail) => {
                AppError::bad_request("invalid payload").with_detail(detail.clone())
            }
            TodoError::InvalidId(e) => AppError::bad_request("Invalid ID").with_detail(e.to_string()),
            TodoError::UnsupportedMediaType(ct) => {
                AppError::unsupported_media_type("unsupported content type").with_detail(
                    format!("expected multipart/form-data or application/json, got `{ct}`"),
                )
            }
            other => AppError::new(other.kind(), other.to_string()),
        }
    }

    /// Log the error with appropriate level
    fn log(&self) {
        match self {
            TodoError::Database(e) => {
                tracing::error!(error = %e, "Todo database error");
            }
            TodoError::Storage(e) => {
                tracing::error!(error = %e, "Photo storage error");
            }
            TodoError::Internal(msg) => {
                tracing::error!(message = %msg, "Todo internal error");
            }
            _ => {
                tracing::debug!(error = %self, "Todo error");
            }
        }
    }
}

impl IntoResponse for TodoError {
    fn into_response(self) -> Response {
        self.log();
        self.to_app_error().into_response()
    }
}

impl From<JsonRejection> for TodoError {
    fn from(rejection: JsonRejection) -> Self {
        if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
            return TodoError::PayloadTooLarge;
        }
        TodoError::InvalidPayload(rejection.body_text())
    }
}

impl From<MultipartRejection> for TodoError {
    fn from(rejection: MultipartRejection) -> Self {
        TodoError::InvalidPayload(rejection.body_text())
    }
}

impl From<MultipartError> for TodoError {
    fn from(err: MultipartError) -> Self {
        if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
            return TodoError::PayloadTooLarge;
        }
        TodoError::InvalidPayload(err.body_text())
    }
}

impl From<TodoTitleError> for TodoError {
    fn from(err: TodoTitleError) -> Self {
        TodoError::InvalidPayload(err.to_string())
    }
}

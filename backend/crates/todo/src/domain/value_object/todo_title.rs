//! Todo Title Value Object
//!
//! ## 不変条件
//! - 前後の空白を除去
//! - 長さ: 1〜255 文字
//! - 改行・タブ以外の制御文字を含まない

use derive_more::Display;
use serde::Serialize;
use thiserror::Error;

/// Maximum length for a title (in characters)
pub const TODO_TITLE_MAX_LENGTH: usize = 255;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TodoTitleError {
    #[error("title is required")]
    Empty,

    #[error("title must be at most {max} characters (got {actual})")]
    TooLong { max: usize, actual: usize },

    #[error("title must not contain control characters")]
    InvalidCharacter,
}

/// Validated todo title
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Display)]
#[serde(transparent)]
pub struct TodoTitle(String);

impl TodoTitle {
    pub fn new(raw: impl AsRef<str>) -> Result<Self, TodoTitleError> {
        let trimmed = raw.as_ref().trim();

        if trimmed.is_empty() {
            return Err(TodoTitleError::Empty);
        }

        let char_count = trimmed.chars().count();
        if char_count > TODO_TITLE_MAX_LENGTH {
            return Err(TodoTitleError::TooLong {
                max: TODO_TITLE_MAX_LENGTH,
                actual: char_count,
            });
        }

        if trimmed
            .chars()
            .any(|c| c.is_control() && c != '\n' && c != '\t')
        {
            return Err(TodoTitleError::InvalidCharacter);
        }

        Ok(Self(trimmed.to_string()))
    }

    /// Restore a title already validated on write
    pub fn from_db(value: String) -> Self {
        Self(value)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl AsRef<str> for TodoTitle {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

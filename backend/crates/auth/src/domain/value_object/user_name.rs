//! User Name Value Object
//!
//! ユーザー名はログインと表示に使われる一意なハンドル。
//!
//! ## 不変条件
//! - NFKC 正規化後、前後の空白を除去
//! - 長さ: 1〜64 文字
//! - 空白文字・制御文字を含まない
//!
//! 大文字小文字は区別する（一意性はストアの UNIQUE インデックスが保証）。

use derive_more::Display;
use serde::Serialize;
use thiserror::Error;
use unicode_normalization::UnicodeNormalization;

/// Maximum length for user name (in characters)
pub const USER_NAME_MAX_LENGTH: usize = 64;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UserNameError {
    #[error("username is required")]
    Empty,

    #[error("username must be at most {max} characters (got {actual})")]
    TooLong { max: usize, actual: usize },

    #[error("username must not contain whitespace or control characters")]
    InvalidCharacter,
}

/// Validated user name
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Display)]
#[serde(transparent)]
pub struct UserName(String);

impl UserName {
    pub fn new(raw: impl AsRef<str>) -> Result<Self, UserNameError> {
        let normalized: String = raw.as_ref().nfkc().collect();
        let trimmed = normalized.trim();

        if trimmed.is_empty() {
            return Err(UserNameError::Empty);
        }

        let char_count = trimmed.chars().count();
        if char_count > USER_NAME_MAX_LENGTH {
            return Err(UserNameError::TooLong {
                max: USER_NAME_MAX_LENGTH,
                actual: char_count,
            });
        }

        if trimmed
            .chars()
            .any(|c| c.is_whitespace() || c.is_control())
        {
            return Err(UserNameError::InvalidCharacter);
        }

        Ok(Self(trimmed.to_string()))
    }

    /// Restore a name already validated on write
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

impl AsRef<str> for UserName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

//! User Password Value Object
//!
//! Domain wrapper over `platform::password`.
//!
//! ```rust
//! use auth::domain::value_object::user_password::{RawPassword, UserPassword};
//!
//! let raw = RawPassword::new("pw1".to_string()).unwrap();
//! let hashed = UserPassword::from_raw(&raw, None).unwrap();
//! assert!(hashed.verify(&raw, None).unwrap());
//! ```

use std::fmt;

use platform::password::{ClearTextPassword, HashedPassword, PasswordPolicyError};

use crate::error::{AuthError, AuthResult};

// ============================================================================
// Raw Password (User Input)
// ============================================================================

/// Raw password from user input, zeroized on drop
pub struct RawPassword(ClearTextPassword);

impl RawPassword {
    pub fn new(raw: String) -> AuthResult<Self> {
        let clear_text = ClearTextPassword::new(raw).map_err(|e| {
            let detail = match e {
                PasswordPolicyError::EmptyOrWhitespace => "password is required".to_string(),
                other => other.to_string(),
            };
            AuthError::InvalidPayload(detail)
        })?;

        Ok(Self(clear_text))
    }
}

impl fmt::Debug for RawPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("RawPassword").field(&"[REDACTED]").finish()
    }
}

// ============================================================================
// User Password (Stored Hash)
// ============================================================================

/// Argon2id hash as stored in `users.password_hash`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserPassword(HashedPassword);

impl UserPassword {
    pub fn from_raw(raw: &RawPassword, pepper: Option<&[u8]>) -> AuthResult<Self> {
        Ok(Self(raw.0.hash(pepper)?))
    }

    pub fn from_db(phc: impl Into<String>) -> AuthResult<Self> {
        Ok(Self(HashedPassword::from_phc_string(phc)?))
    }

    pub fn verify(&self, raw: &RawPassword, pepper: Option<&[u8]>) -> AuthResult<bool> {
        Ok(self.0.verify(&raw.0, pepper)?)
    }

    pub fn as_phc_string(&self) -> &str {
        self.0.as_phc_string()
    }
}

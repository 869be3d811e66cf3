//! Password Service
//!
//! Argon2 work runs on the blocking pool via `tokio::task::spawn_blocking`
//! so a login never stalls the async workers.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, LazyLock};

use crate::domain::value_object::user_password::{RawPassword, UserPassword};
use crate::error::{AuthError, AuthResult};

/// Hash verified when the user name is unknown, so both login failures pay
/// the same Argon2 cost
static DUMMY_HASH: LazyLock<Option<UserPassword>> = LazyLock::new(|| {
    let raw = RawPassword::new("dummy-password-for-unknown-users".to_string()).ok()?;
    UserPassword::from_raw(&raw, None).ok()
});

/// Hashes and verifies passwords with the application pepper
#[derive(Clone)]
pub struct PasswordService {
    pepper: Option<Arc<[u8]>>,
    verifications: Arc<AtomicU64>,
}

impl PasswordService {
    pub fn new(pepper: Option<&[u8]>) -> Self {
        Self {
            pepper: pepper.map(Arc::from),
            verifications: Arc::default(),
        }
    }

    /// Number of Argon2 verifications performed by this service and its clones
    pub fn verification_count(&self) -> u64 {
        self.verifications.load(Ordering::Relaxed)
    }

    pub async fn hash(&self, raw: RawPassword) -> AuthResult<UserPassword> {
        let pepper = self.pepper.clone();
        tokio::task::spawn_blocking(move || UserPassword::from_raw(&raw, pepper.as_deref()))
            .await
            .map_err(|e| AuthError::Internal(format!("password hashing task failed: {e}")))?
    }

    pub async fn verify(&self, hash: UserPassword, raw: RawPassword) -> AuthResult<bool> {
        self.verifications.fetch_add(1, Ordering::Relaxed);
        let pepper = self.pepper.clone();
        tokio::task::spawn_blocking(move || hash.verify(&raw, pepper.as_deref()))
            .await
            .map_err(|e| AuthError::Internal(format!("password verification task failed: {e}")))?
    }

    /// Burn one verification against [`DUMMY_HASH`]; the outcome is ignored
    pub async fn verify_unknown_user(&self, raw: RawPassword) {
        self.verifications.fetch_add(1, Ordering::Relaxed);
        let pepper = self.pepper.clone();
        let task = tokio::task::spawn_blocking(move || {
            if let Some(dummy) = DUMMY_HASH.as_ref() {
                let _ = dummy.verify(&raw, pepper.as_deref());
            }
        });
        if let Err(e) = task.await {
            tracing::error!(error = %e, "Dummy password verification task failed");
        }
    }
}

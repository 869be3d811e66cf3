//! Access / Refresh Token Service
//!
//! HS256 JWTs carrying the user id. The token kind is encoded in the
//! `iss`/`sub` pair:
//!
//! | kind    | iss       | sub             | default TTL |
//! |---------|-----------|-----------------|-------------|
//! | access  | `access`  | `access_token`  | 15 minutes  |
//! | refresh | `refresh` | `refresh_token` | 30 days     |
//!
//! No server-side revocation: a token is trusted until `exp`.

use std::fmt;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

pub const DEFAULT_ACCESS_TTL: Duration = Duration::from_secs(15 * 60);
pub const DEFAULT_REFRESH_TTL: Duration = Duration::from_secs(30 * 24 * 60 * 60);

// ============================================================================
// Token kind
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    Access,
    Refresh,
}

impl TokenKind {
    pub const fn issuer(self) -> &'static str {
        match self {
            TokenKind::Access => "access",
            TokenKind::Refresh => "refresh",
        }
    }

    pub const fn subject(self) -> &'static str {
        match self {
            TokenKind::Access => "access_token",
            TokenKind::Refresh => "refresh_token",
        }
    }

    fn from_claims(iss: &str, sub: &str) -> Option<Self> {
        [TokenKind::Access, TokenKind::Refresh]
            .into_iter()
            .find(|kind| kind.issuer() == iss && kind.subject() == sub)
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.issuer())
    }
}

// ============================================================================
// Claims
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    pub user_id: i64,
    /// Issued-at (seconds since epoch)
    pub iat: i64,
    /// Expiry (seconds since epoch)
    pub exp: i64,
    pub iss: String,
    pub sub: String,
    pub jti: String,
}

impl Claims {
    /// Kind encoded in `iss`/`sub`; `None` for an unknown combination
    pub fn kind(&self) -> Option<TokenKind> {
        TokenKind::from_claims(&self.iss, &self.sub)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
}

// ============================================================================
// Errors
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TokenError {
    #[error("token expired")]
    Expired,

    #[error("malformed token")]
    Malformed,

    #[error("token signature invalid")]
    SignatureInvalid,

    #[error("expected {expected} token, got {actual} token")]
    WrongKind {
        expected: TokenKind,
        actual: TokenKind,
    },

    #[error("failed to sign token: {0}")]
    Signing(String),
}

impl From<jsonwebtoken::errors::Error> for TokenError {
    fn from(err: jsonwebtoken::errors::Error) -> Self {
        use jsonwebtoken::errors::ErrorKind;

        match err.kind() {
            ErrorKind::ExpiredSignature => TokenError::Expired,
            ErrorKind::InvalidSignature => TokenError::SignatureInvalid,
            _ => TokenError::Malformed,
        }
    }
}

// ============================================================================
// Token service
// ============================================================================

/// Issues and verifies tokens with a secret supplied at construction
pub struct TokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    access_ttl: Duration,
    refresh_ttl: Duration,
}

impl TokenService {
    pub fn new(secret: &[u8], access_ttl: Duration, refresh_ttl: Duration) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp", "iss", "sub"]);

        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            validation,
            access_ttl,
            refresh_ttl,
        }
    }

    /// Service with the default 15 minute / 30 day lifetimes
    pub fn with_default_ttls(secret: &[u8]) -> Self {
        Self::new(secret, DEFAULT_ACCESS_TTL, DEFAULT_REFRESH_TTL)
    }

    pub fn ttl(&self, kind: TokenKind) -> Duration {
        match kind {
            TokenKind::Access => self.access_ttl,
            TokenKind::Refresh => self.refresh_ttl,
        }
    }

    pub fn issue_access_token(&self, user_id: i64) -> Result<String, TokenError> {
        self.issue_at(TokenKind::Access, user_id, SystemTime::now())
    }

    pub fn issue_refresh_token(&self, user_id: i64) -> Result<String, TokenError> {
        self.issue_at(TokenKind::Refresh, user_id, SystemTime::now())
    }

    pub fn issue_pair(&self, user_id: i64) -> Result<TokenPair, TokenError> {
        Ok(TokenPair {
            access_token: self.issue_access_token(user_id)?,
            refresh_token: self.issue_refresh_token(user_id)?,
        })
    }

    /// Mint a token as if issued at `now`
    pub fn issue_at(
        &self,
        kind: TokenKind,
        user_id: i64,
        now: SystemTime,
    ) -> Result<String, TokenError> {
        let iat = now
            .duration_since(UNIX_EPOCH)
            .map_err(|e| TokenError::Signing(e.to_string()))?
            .as_secs() as i64;

        let claims = Claims {
            user_id,
            iat,
            exp: iat + self.ttl(kind).as_secs() as i64,
            iss: kind.issuer().to_string(),
            sub: kind.subject().to_string(),
            jti: Uuid::new_v4().to_string(),
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| TokenError::Signing(e.to_string()))
    }

    /// Verify signature, expiry and required claims
    ///
    /// Unknown `iss`/`sub` combinations are reported as [`TokenError::Malformed`].
    pub fn verify(&self, token: &str) -> Result<Claims, TokenError> {
        let claims = decode::<Claims>(token, &self.decoding_key, &self.validation)?.claims;
        if claims.kind().is_none() {
            return Err(TokenError::Malformed);
        }
        Ok(claims)
    }

    /// [`verify`](Self::verify) and require a specific kind
    pub fn verify_kind(&self, token: &str, expected: TokenKind) -> Result<Claims, TokenError> {
        let claims = self.verify(token)?;
        match claims.kind() {
            Some(actual) if actual == expected => Ok(claims),
            Some(actual) => Err(TokenError::WrongKind { expected, actual }),
            None => Err(TokenError::Malformed),
        }
    }
}

impl fmt::Debug for TokenService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenService")
            .field("secret", &"[REDACTED]")
            .field("access_ttl", &self.access_ttl)
            .field("refresh_ttl", &self.refresh_ttl)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &[u8] = b"test_secret_key_for_testing_purposes_only";

    fn service() -> TokenService {
        TokenService::with_default_ttls(SECRET)
    }

    #[test]
    fn test_access_token_roundtrip() {
        let tokens = service();
        let token = tokens.issue_access_token(42).unwrap();
        let claims = tokens.verify(&token).unwrap();

        assert_eq!(claims.user_id, 42);
        assert_eq!(claims.iss, "access");
        assert_eq!(claims.sub, "access_token");
        assert_eq!(claims.exp, claims.iat + 15 * 60);
        assert_eq!(claims.kind(), Some(TokenKind::Access));
    }

    #[test]
    fn test_refresh_token_lifetime() {
        let tokens = service();
        let token = tokens.issue_refresh_token(7).unwrap();
        let claims = tokens.verify_kind(&token, TokenKind::Refresh).unwrap();

        assert_eq!(claims.user_id, 7);
        assert_eq!(claims.exp - claims.iat, 30 * 24 * 60 * 60);
    }

    #[test]
    fn test_tokens_issued_together_differ() {
        let tokens = service();
        let a = tokens.issue_access_token(1).unwrap();
        let b = tokens.issue_access_token(1).unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn test_expired_token() {
        let tokens = service();
        // 20 minutes ago so the 15-minute token is expired
        let issued = SystemTime::now() - Duration::from_secs(20 * 60);
        let token = tokens.issue_at(TokenKind::Access, 1, issued).unwrap();

        assert_eq!(tokens.verify(&token).unwrap_err(), TokenError::Expired);
    }

    #[test]
    fn test_bad_signature() {
        let token = service().issue_access_token(1).unwrap();
        let other = TokenService::with_default_ttls(b"another_secret_of_sufficient_length!!");

        assert_eq!(
            other.verify(&token).unwrap_err(),
            TokenError::SignatureInvalid
        );
    }

    #[test]
    fn test_malformed_token() {
        let tokens = service();
        assert_eq!(tokens.verify("not.a.jwt").unwrap_err(), TokenError::Malformed);
        assert_eq!(tokens.verify("").unwrap_err(), TokenError::Malformed);
    }

    #[test]
    fn test_unknown_kind_is_malformed() {
        let tokens = service();
        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap()
            .as_secs() as i64;
        let claims = Claims {
            user_id: 1,
            iat: now,
            exp: now + 60,
            iss: "access".to_string(),
            sub: "refresh_token".to_string(),
            jti: "x".to_string(),
        };
        let token = encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(SECRET),
        )
        .unwrap();

        assert_eq!(tokens.verify(&token).unwrap_err(), TokenError::Malformed);
    }

    #[test]
    fn test_wrong_kind() {
        let tokens = service();
        let access = tokens.issue_access_token(3).unwrap();
        let refresh = tokens.issue_refresh_token(3).unwrap();

        assert_eq!(
            tokens.verify_kind(&access, TokenKind::Refresh).unwrap_err(),
            TokenError::WrongKind {
                expected: TokenKind::Refresh,
                actual: TokenKind::Access,
            }
        );
        assert!(matches!(
            tokens.verify_kind(&refresh, TokenKind::Access),
            Err(TokenError::WrongKind { .. })
        ));
    }

    #[test]
    fn test_debug_redacts_secret() {
        let debug = format!("{:?}", service());
        assert!(debug.contains("REDACTED"));
        assert!(!debug.contains("test_secret"));
    }
}

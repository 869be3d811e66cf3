//! Auth Middleware
//!
//! Bearer-token authentication for protected routes.

use std::sync::Arc;

use axum::extract::{FromRequestParts, Request, State};
use axum::http::{HeaderMap, header, request::Parts};
use axum::middleware::Next;
use axum::response::Response;
use platform::token::{TokenKind, TokenService};

use crate::domain::value_object::UserId;
use crate::error::{AuthError, AuthResult};

/// Middleware state
#[derive(Clone)]
pub struct BearerAuthState {
    pub tokens: Arc<TokenService>,
}

/// Acting identity taken from a verified access token
///
/// Inserted into request extensions by [`require_bearer_auth`]; handlers
/// take it as an extractor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthenticatedUser {
    pub user_id: UserId,
}

impl<S> FromRequestParts<S> for AuthenticatedUser
where
    S: Send + Sync,
{
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthenticatedUser>()
            .copied()
            .ok_or(AuthError::MissingAuthHeader)
    }
}

/// Middleware that requires `Authorization: Bearer <access token>`
///
/// The user id in the token is trusted as-is; the store is not consulted.
pub async fn require_bearer_auth(
    State(state): State<BearerAuthState>,
    mut req: Request,
    next: Next,
) -> Result<Response, AuthError> {
    let claims = {
        let token = extract_bearer_token(req.headers())?;
        state.tokens.verify_kind(token, TokenKind::Access)?
    };

    req.extensions_mut().insert(AuthenticatedUser {
        user_id: UserId::new(claims.user_id),
    });

    Ok(next.run(req).await)
}

/// Extract the token from `Authorization: Bearer <token>`
///
/// The header must split into exactly two space-separated parts and the
/// scheme is matched case-insensitively.
pub fn extract_bearer_token(headers: &HeaderMap) -> AuthResult<&str> {
    let value = headers
        .get(header::AUTHORIZATION)
        .ok_or(AuthError::MissingAuthHeader)?
        .to_str()
        .map_err(|_| AuthError::InvalidAuthHeader)?;

    match value.split(' ').collect::<Vec<_>>().as_slice() {
        [scheme, token] if scheme.eq_ignore_ascii_case("bearer") => Ok(*token),
        _ => Err(AuthError::InvalidAuthHeader),
    }
}

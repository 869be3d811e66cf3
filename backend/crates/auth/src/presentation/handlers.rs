//! HTTP Handlers

use std::sync::Arc;

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use kernel::response::ApiResponse;
use platform::token::TokenService;

use crate::application::{
    LoginInput, LoginUseCase, ManageUsersUseCase, RefreshUseCase, RegisterInput,
    PasswordService, RegisterUseCase, UpdateUserInput,
};
use crate::domain::hook::UserDeletionHook;
use crate::domain::repository::UserRepository;
use crate::domain::value_object::UserId;
use crate::error::AuthResult;
use crate::presentation::dto::{
    AuthPayload, LoginRequest, RefreshRequest, RegisterRequest, TokenPairResponse,
    UpdateUserRequest, UserResponse,
};
use crate::presentation::middleware::AuthenticatedUser;

/// Shared state for auth handlers
pub struct AuthAppState<R, H>
where
    R: UserRepository + Clone + Send + Sync + 'static,
    H: UserDeletionHook + Send + Sync + 'static,
{
    pub repo: Arc<R>,
    pub passwords: PasswordService,
    pub tokens: Arc<TokenService>,
    pub hook: Arc<H>,
}

impl<R, H> Clone for AuthAppState<R, H>
where
    R: UserRepository + Clone + Send + Sync + 'static,
    H: UserDeletionHook + Send + Sync + 'static,
{
    fn clone(&self) -> Self {
        Self {
            repo: self.repo.clone(),
            passwords: self.passwords.clone(),
            tokens: self.tokens.clone(),
            hook: self.hook.clone(),
        }
    }
}

pub type AuthResponse = ApiResponse<AuthPayload>;

// ============================================================================
// Register / Login / Refresh
// ============================================================================

/// POST /api/register
pub async fn register<R, H>(
    State(state): State<AuthAppState<R, H>>,
    payload: Result<Json<RegisterRequest>, JsonRejection>,
) -> AuthResult<AuthResponse>
where
    R: UserRepository + Clone + Send + Sync + 'static,
    H: UserDeletionHook + Send + Sync + 'static,
{
    let Json(req) = payload?;
    let use_case = RegisterUseCase::new(state.repo.clone(), state.passwords.clone());

    let user = use_case
        .execute(RegisterInput {
            user_name: req.username,
            password: req.password,
        })
        .await?;

    Ok(ApiResponse::created(
        "user registered",
        AuthPayload::User(user.into()),
    ))
}

/// POST /api/login
pub async fn login<R, H>(
    State(state): State<AuthAppState<R, H>>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> AuthResult<AuthResponse>
where
    R: UserRepository + Clone + Send + Sync + 'static,
    H: UserDeletionHook + Send + Sync + 'static,
{
    let Json(req) = payload?;
    let use_case = LoginUseCase::new(
        state.repo.clone(),
        state.passwords.clone(),
        state.tokens.clone(),
    );

    let pair = use_case
        .execute(LoginInput {
            user_name: req.username,
            password: req.password,
        })
        .await?;

    Ok(ApiResponse::ok(
        "login successful",
        AuthPayload::Tokens(TokenPairResponse::from(pair)),
    ))
}

/// POST /api/refresh
pub async fn refresh<R, H>(
    State(state): State<AuthAppState<R, H>>,
    payload: Result<Json<RefreshRequest>, JsonRejection>,
) -> AuthResult<AuthResponse>
where
    R: UserRepository + Clone + Send + Sync + 'static,
    H: UserDeletionHook + Send + Sync + 'static,
{
    let Json(req) = payload?;
    let use_case = RefreshUseCase::new(state.repo.clone(), state.tokens.clone());

    let pair = use_case.execute(&req.refresh_token).await?;

    Ok(ApiResponse::ok(
        "tokens refreshed",
        AuthPayload::Tokens(TokenPairResponse::from(pair)),
    ))
}

// ============================================================================
// User administration (requires authentication)
// ============================================================================

/// GET /api/users
pub async fn list_users<R, H>(
    State(state): State<AuthAppState<R, H>>,
    _caller: AuthenticatedUser,
) -> AuthResult<AuthResponse>
where
    R: UserRepository + Clone + Send + Sync + 'static,
    H: UserDeletionHook + Send + Sync + 'static,
{
    let use_case = ManageUsersUseCase::new(
        state.repo.clone(),
        state.passwords.clone(),
        state.hook.clone(),
    );

    let users: Vec<UserResponse> = use_case
        .list()
        .await?
        .into_iter()
        .map(UserResponse::from)
        .collect();
    let total = users.len();

    Ok(ApiResponse::ok("users fetched", AuthPayload::Users(users)).with_total(total))
}

/// GET /api/users/{id}
pub async fn get_user<R, H>(
    State(state): State<AuthAppState<R, H>>,
    _caller: AuthenticatedUser,
    Path(id): Path<String>,
) -> AuthResult<AuthResponse>
where
    R: UserRepository + Clone + Send + Sync + 'static,
    H: UserDeletionHook + Send + Sync + 'static,
{
    let user_id: UserId = id.parse()?;
    let use_case = ManageUsersUseCase::new(
        state.repo.clone(),
        state.passwords.clone(),
        state.hook.clone(),
    );

    let user = use_case.get(user_id).await?;

    Ok(ApiResponse::ok("user fetched", AuthPayload::User(user.into())))
}

/// PUT /api/users/{id}
pub async fn update_user<R, H>(
    State(state): State<AuthAppState<R, H>>,
    caller: AuthenticatedUser,
    Path(id): Path<String>,
    payload: Result<Json<UpdateUserRequest>, JsonRejection>,
) -> AuthResult<AuthResponse>
where
    R: UserRepository + Clone + Send + Sync + 'static,
    H: UserDeletionHook + Send + Sync + 'static,
{
    let user_id: UserId = id.parse()?;
    let Json(req) = payload?;
    let use_case = ManageUsersUseCase::new(
        state.repo.clone(),
        state.passwords.clone(),
        state.hook.clone(),
    );

    let user = use_case
        .update(
            caller.user_id,
            user_id,
            UpdateUserInput {
                user_name: req.username,
                password: req.password,
            },
        )
        .await?;

    Ok(ApiResponse::ok("user updated", AuthPayload::User(user.into())))
}

/// DELETE /api/users/{id}
pub async fn delete_user<R, H>(
    State(state): State<AuthAppState<R, H>>,
    caller: AuthenticatedUser,
    Path(id): Path<String>,
) -> AuthResult<AuthResponse>
where
    R: UserRepository + Clone + Send + Sync + 'static,
    H: UserDeletionHook + Send + Sync + 'static,
{
    let user_id: UserId = id.parse()?;
    let use_case = ManageUsersUseCase::new(
        state.repo.clone(),
        state.passwords.clone(),
        state.hook.clone(),
    );

    use_case.delete(caller.user_id, user_id).await?;

    Ok(ApiResponse::message("user deleted"))
}

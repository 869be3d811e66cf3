//! Auth Router

use std::sync::Arc;

use axum::{
    Router, middleware,
    routing::{get, post},
};
use platform::token::TokenService;

use crate::application::config::AuthConfig;
use crate::domain::hook::UserDeletionHook;
use crate::domain::repository::UserRepository;
use crate::infra::postgres::PgAuthRepository;
use crate::presentation::handlers::{self, AuthAppState};
use crate::presentation::middleware::{BearerAuthState, require_bearer_auth};

/// Create the Auth router with PostgreSQL repository
///
/// `hook` runs before each user row is deleted.
pub fn auth_router<H>(
    repo: PgAuthRepository,
    config: AuthConfig,
    tokens: Arc<TokenService>,
    hook: H,
) -> Router
where
    H: UserDeletionHook + Send + Sync + 'static,
{
    auth_router_with_hook(repo, config, tokens, hook)
}

/// Create a generic Auth router for any repository implementation
///
/// `/register`, `/login` and `/refresh` are public; `/users` routes
/// require a bearer access token.
pub fn auth_router_generic<R>(repo: R, config: AuthConfig, tokens: Arc<TokenService>) -> Router
where
    R: UserRepository + Clone + Send + Sync + 'static,
{
    auth_router_with_hook(repo, config, tokens, ())
}

/// Generic Auth router whose user deletion first runs `hook`
pub fn auth_router_with_hook<R, H>(
    repo: R,
    config: AuthConfig,
    tokens: Arc<TokenService>,
    hook: H,
) -> Router
where
    R: UserRepository + Clone + Send + Sync + 'static,
    H: UserDeletionHook + Send + Sync + 'static,
{
    let state = AuthAppState {
        repo: Arc::new(repo),
        passwords: config.password_service(),
        tokens: tokens.clone(),
        hook: Arc::new(hook),
    };

    let protected = Router::new()
        .route("/users", get(handlers::list_users::<R, H>))
        .route(
            "/users/{id}",
            get(handlers::get_user::<R, H>)
                .put(handlers::update_user::<R, H>)
                .delete(handlers::delete_user::<R, H>),
        )
        .route_layer(middleware::from_fn_with_state(
            BearerAuthState { tokens },
            require_bearer_auth,
        ));

    Router::new()
        .route("/register", post(handlers::register::<R, H>))
        .route("/login", post(handlers::login::<R, H>))
        .route("/refresh", post(handlers::refresh::<R, H>))
        .merge(protected)
        .with_state(state)
}

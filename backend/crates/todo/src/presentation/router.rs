//! Todo Router

use std::sync::Arc;

use auth::middleware::{BearerAuthState, require_bearer_auth};
use axum::{Router, extract::DefaultBodyLimit, middleware, routing::get};
use platform::token::TokenService;

use crate::application::config::TodoConfig;
use crate::domain::repository::TodoRepository;
use crate::domain::storage::PhotoStorage;
use crate::infra::{fs_storage::FsPhotoStorage, postgres::PgTodoRepository};
use crate::presentation::handlers::{self, TodoAppState};

/// Create the Todo router with PostgreSQL repository and filesystem storage
pub fn todo_router(
    repo: PgTodoRepository,
    storage: FsPhotoStorage,
    config: TodoConfig,
    tokens: Arc<TokenService>,
) -> Router {
    todo_router_generic(repo, storage, config, tokens)
}

/// Create a generic Todo router for any repository / storage implementation
///
/// Every route requires a bearer access token.
pub fn todo_router_generic<R, S>(
    repo: R,
    storage: S,
    config: TodoConfig,
    tokens: Arc<TokenService>,
) -> Router
where
    R: TodoRepository + Clone + Send + Sync + 'static,
    S: PhotoStorage + Clone + Send + Sync + 'static,
{
    let state = TodoAppState {
        repo: Arc::new(repo),
        storage: Arc::new(storage),
    };

    Router::new()
        .route(
            "/todos",
            get(handlers::list_todos::<R, S>).post(handlers::create_todo::<R, S>),
        )
        .route(
            "/todos/{id}",
            get(handlers::get_todo::<R, S>)
                .put(handlers::update_todo::<R, S>)
                .delete(handlers::delete_todo::<R, S>),
        )
        .route_layer(middleware::from_fn_with_state(
            BearerAuthState { tokens },
            require_bearer_auth,
        ))
        .layer(DefaultBodyLimit::max(config.max_upload_bytes))
        .with_state(state)
}

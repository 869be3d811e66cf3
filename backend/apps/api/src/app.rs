//! Router Composition
//!
//! `/api` carries the auth and todo routers; `/uploads` serves stored photos.

use std::sync::Arc;

use auth::{auth_router_with_hook, domain::UserRepository};
use axum::{
    Router, http,
    http::{Method, header},
};
use todo::{
    TodoCleanup,
    domain::{PhotoStorage, TodoRepository},
    todo_router_generic,
};
use tower_http::cors::{AllowHeaders, AllowMethods, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::config::ServerConfig;

/// Assemble the full application router
///
/// Both domain routers share one token service so tokens issued by
/// `/api/login` are accepted on `/api/todos`. Deleting a user first purges
/// that user's todos and photos.
pub fn build_router<U, T, S>(config: &ServerConfig, users: U, todos: T, storage: S) -> Router
where
    U: UserRepository + Clone + Send + Sync + 'static,
    T: TodoRepository + Clone + Send + Sync + 'static,
    S: PhotoStorage + Clone + Send + Sync + 'static,
{
    let tokens = Arc::new(config.auth.token_service());

    let cleanup = TodoCleanup::new(Arc::new(todos.clone()), Arc::new(storage.clone()));

    let api = auth_router_with_hook(users, config.auth.clone(), tokens.clone(), cleanup).merge(
        todo_router_generic(todos, storage, config.todo.clone(), tokens),
    );

    Router::new()
        .nest("/api", api)
        .nest_service("/uploads", ServeDir::new(&config.upload_dir))
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer(&config.frontend_origins))
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    let allowed_origins: Vec<http::HeaderValue> = origins
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();

    CorsLayer::new()
        .allow_origin(allowed_origins)
        .allow_methods(AllowMethods::list([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ]))
        .allow_headers(AllowHeaders::list([
            header::CONTENT_TYPE,
            header::AUTHORIZATION,
            header::ACCEPT,
        ]))
}

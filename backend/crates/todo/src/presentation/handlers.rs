//! HTTP Handlers

use std::sync::Arc;

use auth::middleware::AuthenticatedUser;
use axum::extract::{Path, State};
use kernel::response::ApiResponse;

use crate::application::{
    CreateTodoUseCase, DeleteTodoUseCase, QueryTodosUseCase, UpdateTodoUseCase,
};
use crate::domain::repository::TodoRepository;
use crate::domain::storage::PhotoStorage;
use crate::domain::value_object::TodoId;
use crate::error::TodoResult;
use crate::presentation::dto::{TodoPayload, TodoResponse};
use crate::presentation::form::TodoForm;

/// Shared state for todo handlers
#[derive(Clone)]
pub struct TodoAppState<R, S>
where
    R: TodoRepository + Clone + Send + Sync + 'static,
    S: PhotoStorage + Clone + Send + Sync + 'static,
{
    pub repo: Arc<R>,
    pub storage: Arc<S>,
}

pub type TodoApiResponse = ApiResponse<TodoPayload>;

/// GET /api/todos
pub async fn list_todos<R, S>(
    State(state): State<TodoAppState<R, S>>,
    caller: AuthenticatedUser,
) -> TodoResult<TodoApiResponse>
where
    R: TodoRepository + Clone + Send + Sync + 'static,
    S: PhotoStorage + Clone + Send + Sync + 'static,
{
    let use_case = QueryTodosUseCase::new(state.repo.clone());

    let todos: Vec<TodoResponse> = use_case
        .list(caller.user_id)
        .await?
        .into_iter()
        .map(TodoResponse::from)
        .collect();
    let total = todos.len();

    Ok(ApiResponse::ok("Todos fetched", TodoPayload::Todos(todos)).with_total(total))
}

/// POST /api/todos
pub async fn create_todo<R, S>(
    State(state): State<TodoAppState<R, S>>,
    caller: AuthenticatedUser,
    form: TodoForm,
) -> TodoResult<TodoApiResponse>
where
    R: TodoRepository + Clone + Send + Sync + 'static,
    S: PhotoStorage + Clone + Send + Sync + 'static,
{
    let use_case = CreateTodoUseCase::new(state.repo.clone(), state.storage.clone());

    let todo = use_case.execute(caller.user_id, form.into()).await?;

    Ok(ApiResponse::created(
        "Todo created",
        TodoPayload::Todo(todo.into()),
    ))
}

/// GET /api/todos/{id}
pub async fn get_todo<R, S>(
    State(state): State<TodoAppState<R, S>>,
    caller: AuthenticatedUser,
    Path(id): Path<String>,
) -> TodoResult<TodoApiResponse>
where
    R: TodoRepository + Clone + Send + Sync + 'static,
    S: PhotoStorage + Clone + Send + Sync + 'static,
{
    let todo_id: TodoId = id.parse()?;
    let use_case = QueryTodosUseCase::new(state.repo.clone());

    let todo = use_case.get(caller.user_id, todo_id).await?;

    Ok(ApiResponse::ok("Todo fetched", TodoPayload::Todo(todo.into())))
}

/// PUT /api/todos/{id}
pub async fn update_todo<R, S>(
    State(state): State<TodoAppState<R, S>>,
    caller: AuthenticatedUser,
    Path(id): Path<String>,
    form: TodoForm,
) -> TodoResult<TodoApiResponse>
where
    R: TodoRepository + Clone + Send + Sync + 'static,
    S: PhotoStorage + Clone + Send + Sync + 'static,
{
    let todo_id: TodoId = id.parse()?;
    let use_case = UpdateTodoUseCase::new(state.repo.clone(), state.storage.clone());

    let todo = use_case
        .execute(caller.user_id, todo_id, form.into())
        .await?;

    Ok(ApiResponse::ok("Todo updated", TodoPayload::Todo(todo.into())))
}

/// DELETE /api/todos/{id}
pub async fn delete_todo<R, S>(
    State(state): State<TodoAppState<R, S>>,
    caller: AuthenticatedUser,
    Path(id): Path<String>,
) -> TodoResult<TodoApiResponse>
where
    R: TodoRepository + Clone + Send + Sync + 'static,
    S: PhotoStorage + Clone + Send + Sync + 'static,
{
    let todo_id: TodoId = id.parse()?;
    let use_case = DeleteTodoUseCase::new(state.repo.clone(), state.storage.clone());

    use_case.execute(caller.user_id, todo_id).await?;

    Ok(ApiResponse::message("Todo deleted"))
}

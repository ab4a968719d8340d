//! One handler per todo endpoint.
//!
//! Each handler parses its inputs, makes exactly one store call, and maps
//! the outcome through [`ApiError`]. The `#[utoipa::path]` attributes feed
//! the generated OpenAPI document served under `/api-docs`.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use todo_core::{CreateTodo, Todo, TodoStore, UpdateTodo};

use crate::error::{ApiError, ErrorBody};

/// Stands in for a path segment that is not an integer. Storage assigns
/// ids from 1 upward, so lookups with it always come back not found.
const UNPARSABLE_ID: i64 = 0;

/// Reads the leading integer of a path segment: optional surrounding
/// whitespace, an optional sign, then digits up to the first non-digit.
/// `"1abc"` and `"1.5"` both read as 1.
pub(crate) fn parse_id(raw: &str) -> i64 {
    let trimmed = raw.trim_start();
    let (negative, rest) = match trimmed.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, trimmed.strip_prefix('+').unwrap_or(trimmed)),
    };
    let digits = rest.bytes().take_while(u8::is_ascii_digit).count();
    if digits == 0 {
        return UNPARSABLE_ID;
    }
    match rest[..digits].parse::<i64>() {
        Ok(id) if negative => -id,
        Ok(id) => id,
        Err(_) => UNPARSABLE_ID,
    }
}

#[utoipa::path(
    get,
    path = "/api/todos",
    tag = "todos",
    summary = "Get all todos",
    responses(
        (status = 200, description = "A list of todos", body = [Todo]),
        (status = 500, description = "Internal server error", body = ErrorBody),
    )
)]
pub async fn list_todos(State(store): State<TodoStore>) -> Result<Json<Vec<Todo>>, ApiError> {
    let todos = store
        .list_all()
        .await
        .map_err(|e| ApiError::from_store(e, "Failed to fetch todos"))?;
    Ok(Json(todos))
}

#[utoipa::path(
    get,
    path = "/api/todos/{id}",
    tag = "todos",
    summary = "Get a todo by ID",
    params(("id" = i64, Path, description = "The todo ID")),
    responses(
        (status = 200, description = "A single todo", body = Todo),
        (status = 404, description = "Todo not found", body = ErrorBody),
        (status = 500, description = "Internal server error", body = ErrorBody),
    )
)]
pub async fn get_todo(
    State(store): State<TodoStore>,
    Path(id): Path<String>,
) -> Result<Json<Todo>, ApiError> {
    let todo = store
        .get_by_id(parse_id(&id))
        .await
        .map_err(|e| ApiError::from_store(e, "Failed to fetch todo"))?;
    Ok(Json(todo))
}

#[utoipa::path(
    post,
    path = "/api/todos",
    tag = "todos",
    summary = "Create a new todo",
    request_body = CreateTodo,
    responses(
        (status = 201, description = "Todo created", body = Todo),
        (status = 500, description = "Internal server error", body = ErrorBody),
    )
)]
pub async fn create_todo(
    State(store): State<TodoStore>,
    Json(input): Json<CreateTodo>,
) -> Result<(StatusCode, Json<Todo>), ApiError> {
    let todo = store
        .create(input)
        .await
        .map_err(|e| ApiError::from_store(e, "Failed to create todo"))?;
    Ok((StatusCode::CREATED, Json(todo)))
}

#[utoipa::path(
    put,
    path = "/api/todos/{id}",
    tag = "todos",
    summary = "Update a todo",
    params(("id" = i64, Path, description = "The todo ID")),
    request_body = UpdateTodo,
    responses(
        (status = 200, description = "Todo updated", body = Todo),
        (status = 404, description = "Todo not found", body = ErrorBody),
        (status = 500, description = "Internal server error", body = ErrorBody),
    )
)]
pub async fn update_todo(
    State(store): State<TodoStore>,
    Path(id): Path<String>,
    Json(patch): Json<UpdateTodo>,
) -> Result<Json<Todo>, ApiError> {
    let todo = store
        .update(parse_id(&id), patch)
        .await
        .map_err(|e| ApiError::from_store(e, "Failed to update todo"))?;
    Ok(Json(todo))
}

#[utoipa::path(
    delete,
    path = "/api/todos/{id}",
    tag = "todos",
    summary = "Delete a todo",
    params(("id" = i64, Path, description = "The todo ID")),
    responses(
        (status = 204, description = "Todo deleted"),
        (status = 404, description = "Todo not found", body = ErrorBody),
        (status = 500, description = "Internal server error", body = ErrorBody),
    )
)]
pub async fn delete_todo(
    State(store): State<TodoStore>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    store
        .delete(parse_id(&id))
        .await
        .map_err(|e| ApiError::from_store(e, "Failed to delete todo"))?;
    Ok(StatusCode::NO_CONTENT)
}

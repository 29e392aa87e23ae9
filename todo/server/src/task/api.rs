use axum::{
    Json, Router,
    body::Bytes,
    extract::{
        Path, State,
        rejection::{BytesRejection, PathRejection},
    },
    http::StatusCode,
    routing::get,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::ToSchema;

use crate::task::{Task, TaskStore};
use crate::validation::{NewTask, TaskChanges, parse_json_body, parse_task_id};
use crate::web::error::{ApiError, ErrorResponse};

/// State for the task endpoints.
#[derive(Clone)]
pub struct TaskState {
    pub store: Arc<TaskStore>,
}

/// JSON request payload for creating a task.
#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateTaskRequest {
    /// Non-empty title; surrounding whitespace is removed
    pub title: String,
}

/// JSON request payload for updating a task. At least one field is required.
#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateTaskRequest {
    pub title: Option<String>,
    pub completed: Option<bool>,
}

/// JSON response for a successful delete.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct DeleteTaskResponse {
    pub success: bool,
    pub message: String,
}

/// Handler for GET /api/items - Returns every task in insertion order.
#[tracing::instrument(skip(state))]
#[utoipa::path(
    get,
    path = "/api/items",
    responses(
        (status = 200, description = "All tasks", body = Vec<Task>),
        (status = 401, description = "Missing or invalid bearer token", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(("bearer" = [])),
    tag = "Tasks"
)]
pub async fn list_tasks_handler(State(state): State<Arc<TaskState>>) -> Json<Vec<Task>> {
    Json(state.store.list_all())
}

/// Handler for POST /api/items - Creates a task from a trimmed title.
#[tracing::instrument(skip(state, body))]
#[utoipa::path(
    post,
    path = "/api/items",
    request_body = CreateTaskRequest,
    responses(
        (status = 201, description = "Task created", body = Task),
        (status = 400, description = "Missing or blank title", body = ErrorResponse),
        (status = 401, description = "Missing or invalid bearer token", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(("bearer" = [])),
    tag = "Tasks"
)]
pub async fn create_task_handler(
    State(state): State<Arc<TaskState>>,
    body: Result<Bytes, BytesRejection>,
) -> Result<(StatusCode, Json<Task>), ApiError> {
    let body = parse_json_body(&body?)?;
    let new_task = NewTask::parse(&body)?;

    let task = state.store.create(new_task.title);
    tracing::info!(id = task.id, "Task created");
    Ok((StatusCode::CREATED, Json(task)))
}

/// Handler for GET /api/items/{id} - Returns a single task.
#[tracing::instrument(skip(state))]
#[utoipa::path(
    get,
    path = "/api/items/{id}",
    params(("id" = i64, Path, description = "Task identifier")),
    responses(
        (status = 200, description = "The task", body = Task),
        (status = 400, description = "Malformed identifier", body = ErrorResponse),
        (status = 401, description = "Missing or invalid bearer token", body = ErrorResponse),
        (status = 404, description = "No such task", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(("bearer" = [])),
    tag = "Tasks"
)]
pub async fn get_task_handler(
    State(state): State<Arc<TaskState>>,
    path: Result<Path<String>, PathRejection>,
) -> Result<Json<Task>, ApiError> {
    let Path(raw_id) = path?;
    let id = parse_task_id(&raw_id)?;
    state
        .store
        .get_by_id(id)
        .map(Json)
        .ok_or(ApiError::TaskNotFound(id))
}

/// Handler for PUT /api/items/{id} - Replaces the supplied fields of a task.
#[tracing::instrument(skip(state, body))]
#[utoipa::path(
    put,
    path = "/api/items/{id}",
    params(("id" = i64, Path, description = "Task identifier")),
    request_body = UpdateTaskRequest,
    responses(
        (status = 200, description = "The updated task", body = Task),
        (status = 400, description = "Malformed identifier or body", body = ErrorResponse),
        (status = 401, description = "Missing or invalid bearer token", body = ErrorResponse),
        (status = 404, description = "No such task", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(("bearer" = [])),
    tag = "Tasks"
)]
pub async fn update_task_handler(
    State(state): State<Arc<TaskState>>,
    path: Result<Path<String>, PathRejection>,
    body: Result<Bytes, BytesRejection>,
) -> Result<Json<Task>, ApiError> {
    let Path(raw_id) = path?;
    let id = parse_task_id(&raw_id)?;
    let body = parse_json_body(&body?)?;
    let changes = TaskChanges::parse(&body)?;

    let task = state
        .store
        .update(id, changes.into_update())
        .ok_or(ApiError::TaskNotFound(id))?;
    tracing::info!(id, "Task updated");
    Ok(Json(task))
}

/// Handler for DELETE /api/items/{id} - Removes a task.
#[tracing::instrument(skip(state))]
#[utoipa::path(
    delete,
    path = "/api/items/{id}",
    params(("id" = i64, Path, description = "Task identifier")),
    responses(
        (status = 200, description = "Task deleted", body = DeleteTaskResponse),
        (status = 400, description = "Malformed identifier", body = ErrorResponse),
        (status = 401, description = "Missing or invalid bearer token", body = ErrorResponse),
        (status = 404, description = "No such task", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(("bearer" = [])),
    tag = "Tasks"
)]
pub async fn delete_task_handler(
    State(state): State<Arc<TaskState>>,
    path: Result<Path<String>, PathRejection>,
) -> Result<Json<DeleteTaskResponse>, ApiError> {
    let Path(raw_id) = path?;
    let id = parse_task_id(&raw_id)?;
    if !state.store.delete(id) {
        return Err(ApiError::TaskNotFound(id));
    }

    tracing::info!(id, "Task deleted");
    Ok(Json(DeleteTaskResponse {
        success: true,
        message: format!("Todo {} deleted successfully", id),
    }))
}

/// Creates and returns the task API router. Callers layer authentication on top.
pub fn create_api_router(state: Arc<TaskState>) -> Router {
    Router::new()
        .route("/items", get(list_tasks_handler).post(create_task_handler))
        .route(
            "/items/{id}",
            get(get_task_handler)
                .put(update_task_handler)
                .delete(delete_task_handler),
        )
        .with_state(state)
}

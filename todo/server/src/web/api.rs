use std::sync::Arc;

use axum::{Json, Router, middleware::from_fn_with_state, routing::get};
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::{
    auth::{self, AuthState},
    task::{self, api::TaskState},
};

#[derive(OpenApi)]
#[openapi(
    paths(
        auth::api::login_handler,
        task::api::list_tasks_handler,
        task::api::create_task_handler,
        task::api::get_task_handler,
        task::api::update_task_handler,
        task::api::delete_task_handler,
    ),
    components(schemas(
        auth::UserProfile,
        auth::api::LoginRequest,
        auth::api::LoginResponse,
        task::Task,
        task::api::CreateTaskRequest,
        task::api::UpdateTaskRequest,
        task::api::DeleteTaskResponse,
        crate::web::error::ErrorResponse,
    )),
    modifiers(&BearerSecurity),
    tags(
        (name = "Auth", description = "Login"),
        (name = "Tasks", description = "Task management")
    )
)]
pub struct ApiDoc;

struct BearerSecurity;

impl Modify for BearerSecurity {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer",
                SecurityScheme::Http(HttpBuilder::new().scheme(HttpAuthScheme::Bearer).build()),
            );
        }
    }
}

async fn openapi_handler() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

/// Creates the API routes for JSON API endpoints, mounted under `/api`.
/// The task routes require a bearer token; login does not.
pub fn create_api_router(auth_state: Arc<AuthState>, task_state: Arc<TaskState>) -> Router {
    let login_router = auth::api::create_api_router(auth_state.clone());
    let protected_routes = task::api::create_api_router(task_state)
        .layer(from_fn_with_state(auth_state, auth::api::require_bearer_token));
    let api_routes = login_router.merge(protected_routes);
    Router::new()
        .nest("/api", api_routes)
        .route("/api-docs/openapi.json", get(openapi_handler))
}

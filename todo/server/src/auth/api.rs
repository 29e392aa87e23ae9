use axum::{
    Json, Router,
    body::Bytes,
    extract::{Request, State, rejection::BytesRejection},
    http::{HeaderMap, StatusCode, header::AUTHORIZATION},
    middleware::Next,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::ToSchema;

use crate::auth::{AuthState, UserProfile};
use crate::validation::{LoginAttempt, parse_json_body};
use crate::web::error::{ApiError, ErrorResponse};

/// JSON request payload for login. Both fields are required.
#[derive(Debug, Deserialize, ToSchema)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// JSON response for a successful login.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct LoginResponse {
    pub success: bool,
    pub user: UserProfile,
    /// Bearer token to send in the `Authorization` header
    pub token: String,
}

/// Creates the router for the login endpoint.
pub fn create_api_router(state: Arc<AuthState>) -> Router {
    Router::new()
        .route("/login", axum::routing::post(login_handler))
        .with_state(state)
}

/// Returns the token of an `Authorization: Bearer <token>` header, if there is one.
pub fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
}

/// Middleware that rejects any request not carrying an accepted bearer token.
/// Runs before path and body extraction of the wrapped routes.
pub async fn require_bearer_token(
    State(state): State<Arc<AuthState>>,
    request: Request,
    next: Next,
) -> Response {
    let authorized = bearer_token(request.headers())
        .is_some_and(|token| state.policy.authorize(token));

    if !authorized {
        return ApiError::Unauthorized.into_response();
    }

    next.run(request).await
}

/// Handler for POST /api/login.
/// Checks the submitted email and password against the credential table.
#[tracing::instrument(skip(state, body))]
#[utoipa::path(
    post,
    path = "/api/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Logged in", body = LoginResponse),
        (status = 400, description = "Email or password missing", body = ErrorResponse),
        (status = 401, description = "Invalid email or password", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Auth"
)]
pub async fn login_handler(
    State(state): State<Arc<AuthState>>,
    body: Result<Bytes, BytesRejection>,
) -> Result<(StatusCode, Json<LoginResponse>), ApiError> {
    let body = parse_json_body(&body?)?;
    let attempt = LoginAttempt::parse(&body)?;

    let Some(credential) = state.credentials.verify(&attempt.email, &attempt.password) else {
        tracing::info!("Rejected login attempt");
        return Err(ApiError::InvalidCredentials);
    };

    tracing::info!(user_id = %credential.id, "User logged in");
    let response = LoginResponse {
        success: true,
        user: credential.profile(),
        token: state.policy.issue_token(credential),
    };
    Ok((StatusCode::OK, Json(response)))
}

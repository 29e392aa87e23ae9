use axum::Router;
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::auth::AuthState;
use crate::config::Config;
use crate::task::TaskStore;
use crate::task::api::TaskState;

pub mod api;
pub mod error;

/// Everything the HTTP surface needs, built once by the composition root.
#[derive(Clone)]
pub struct AppState {
    pub auth: Arc<AuthState>,
    pub tasks: Arc<TaskState>,
}

impl AppState {
    pub fn new(auth: AuthState, store: Arc<TaskStore>) -> Self {
        Self {
            auth: Arc::new(auth),
            tasks: Arc::new(TaskState { store }),
        }
    }

    /// Creates the state for a fresh process: seeded store, built-in accounts.
    pub fn from_config(config: &Config) -> Self {
        Self::new(AuthState::from_config(config), Arc::new(TaskStore::new()))
    }
}

/// Builds the full application router.
pub fn create_app(state: AppState) -> Router {
    Router::new()
        .route("/health", axum::routing::get(health_check_handler))
        .merge(api::create_api_router(state.auth, state.tasks))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive()),
        )
}

#[tracing::instrument(skip(config))]
pub async fn start_web_server(config: Config) -> anyhow::Result<()> {
    let server_address = format!("0.0.0.0:{}", &config.port);
    let listener = tokio::net::TcpListener::bind(&server_address).await?;
    tracing::info!("Web server running on http://{}", server_address);

    serve(listener, AppState::from_config(&config)).await
}

/// Serves the application on an already bound listener until the process stops.
pub async fn serve(listener: tokio::net::TcpListener, state: AppState) -> anyhow::Result<()> {
    axum::serve(listener, create_app(state)).await?;
    Ok(())
}

#[tracing::instrument]
pub async fn health_check_handler() -> &'static str {
    "OK"
}

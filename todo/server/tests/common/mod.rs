#![allow(dead_code)]

use axum::Router;
use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use serde_json::Value;
use std::sync::Arc;
use todo_server::config::Config;
use todo_server::task::TaskStore;
use todo_server::web::{AppState, create_app};
use tower::ServiceExt;

pub const TOKEN: &str = "mock-jwt-token";

/// Test context holding the router and a handle on its store.
pub struct TestContext {
    pub app: Router,
    pub store: Arc<TaskStore>,
}

/// Builds an app with the default configuration and a freshly seeded store.
pub fn setup() -> TestContext {
    // Allow multiple calls to init for tests.
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();
    let config = Config::default();
    let store = Arc::new(TaskStore::new());
    let state = AppState::new(
        todo_server::auth::AuthState::from_config(&config),
        store.clone(),
    );
    TestContext {
        app: create_app(state),
        store,
    }
}

/// Response status and parsed JSON body.
#[derive(Debug)]
pub struct JsonResponse {
    pub status: StatusCode,
    pub body: Value,
}

impl TestContext {
    /// Sends a request with an optional bearer token and an optional raw body.
    pub async fn send(
        &self,
        method: Method,
        uri: &str,
        token: Option<&str>,
        body: Option<&str>,
    ) -> JsonResponse {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header("authorization", format!("Bearer {}", token));
        }
        let body = match body {
            Some(body) => {
                builder = builder.header("content-type", "application/json");
                Body::from(body.to_string())
            }
            None => Body::empty(),
        };

        let response = self
            .app
            .clone()
            .oneshot(builder.body(body).unwrap())
            .await
            .unwrap();

        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or_else(|_| {
                Value::String(String::from_utf8_lossy(&bytes).into_owned())
            })
        };
        JsonResponse { status, body }
    }

    pub async fn authorized(&self, method: Method, uri: &str, body: Option<&str>) -> JsonResponse {
        self.send(method, uri, Some(TOKEN), body).await
    }
}

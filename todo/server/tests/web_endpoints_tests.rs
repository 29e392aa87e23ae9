use axum::http::{Method, StatusCode};

mod common;

use common::setup;

#[tokio::test]
async fn can_check_health_endpoint() {
    let ctx = setup();

    let response = ctx.send(Method::GET, "/health", None, None).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body, "OK");
}

#[tokio::test]
async fn can_serve_openapi_document_without_token() {
    let ctx = setup();

    let response = ctx
        .send(Method::GET, "/api-docs/openapi.json", None, None)
        .await;

    assert_eq!(response.status, StatusCode::OK);
    let paths = response.body["paths"].as_object().unwrap();
    for path in ["/api/login", "/api/items", "/api/items/{id}"] {
        assert!(paths.contains_key(path), "missing {}", path);
    }
    assert!(response.body["components"]["securitySchemes"]["bearer"].is_object());
}

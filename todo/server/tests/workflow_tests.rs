use axum::http::{Method, StatusCode};
use serde_json::Value;

mod common;

use common::setup;

fn ids(body: &Value) -> Vec<i64> {
    body.as_array()
        .unwrap()
        .iter()
        .map(|task| task["id"].as_i64().unwrap())
        .collect()
}

#[tokio::test]
async fn can_complete_task_workflow() {
    let ctx = setup();

    let login = ctx
        .send(
            Method::POST,
            "/api/login",
            None,
            Some(r#"{"email":"test@example.com","password":"password123"}"#),
        )
        .await;
    assert_eq!(login.status, StatusCode::OK);
    let token = login.body["token"].as_str().unwrap().to_string();
    let token = Some(token.as_str());

    let initial = ctx.send(Method::GET, "/api/items", token, None).await;
    assert_eq!(ids(&initial.body), vec![1, 2, 3]);

    let created = ctx
        .send(Method::POST, "/api/items", token, Some(r#"{"title":"Buy milk"}"#))
        .await;
    assert_eq!(created.status, StatusCode::CREATED);
    assert_eq!(created.body["id"], 4);
    assert_eq!(created.body["title"], "Buy milk");
    assert_eq!(created.body["completed"], false);

    let listed = ctx.send(Method::GET, "/api/items", token, None).await;
    assert_eq!(ids(&listed.body), vec![1, 2, 3, 4]);

    let fetched = ctx.send(Method::GET, "/api/items/4", token, None).await;
    assert_eq!(fetched.body, created.body);

    let updated = ctx
        .send(Method::PUT, "/api/items/4", token, Some(r#"{"completed":true}"#))
        .await;
    assert_eq!(updated.status, StatusCode::OK);
    assert_eq!(updated.body["id"], 4);
    assert_eq!(updated.body["title"], "Buy milk");
    assert_eq!(updated.body["completed"], true);
    assert_eq!(updated.body["createdAt"], created.body["createdAt"]);

    let deleted = ctx.send(Method::DELETE, "/api/items/2", token, None).await;
    assert_eq!(deleted.status, StatusCode::OK);
    assert_eq!(deleted.body["success"], true);

    let gone = ctx.send(Method::GET, "/api/items/2", token, None).await;
    assert_eq!(gone.status, StatusCode::NOT_FOUND);

    let remaining = ctx.send(Method::GET, "/api/items", token, None).await;
    assert_eq!(ids(&remaining.body), vec![1, 3, 4]);
}

#[tokio::test]
async fn can_isolate_stores_and_restart_identities_on_reset() {
    let first = setup();
    let second = setup();

    first
        .authorized(Method::POST, "/api/items", Some(r#"{"title":"Only here"}"#))
        .await;

    assert_eq!(first.store.len(), 4);
    assert_eq!(second.store.len(), 3);

    first.store.reset();
    let created = first
        .authorized(Method::POST, "/api/items", Some(r#"{"title":"After reset"}"#))
        .await;
    assert_eq!(created.body["id"], 4);
}

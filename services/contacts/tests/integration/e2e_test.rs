use axum::http::StatusCode;
use serde_json::{Value, json};

use crate::helpers::spawn_app;

#[tokio::test]
async fn should_register_tag_a_person_and_find_them_by_name() {
    let app = spawn_app().await;
    let alice_owner = app.user("owner@example.com").await;

    let tag_id = app
        .create_id(&alice_owner, "/api/tags", json!({ "name": "Friends" }))
        .await;
    let person = app
        .create(
            &alice_owner,
            "/api/persons",
            json!({ "first_name": "Alice", "tag_ids": [tag_id] }),
        )
        .await;
    assert_eq!(person["first_name"], "Alice");
    assert_eq!(person["user_id"], alice_owner.id.as_str());

    let resp = app
        .get(
            &alice_owner,
            "/api/persons?search[first_name]=Ali&preload[0]=tags",
        )
        .await;
    resp.assert_status_ok();
    let body = resp.json::<Value>();
    assert_eq!(body["message"], "Persons fetched successfully");
    assert_eq!(body["meta"]["total"], 1);
    assert_eq!(body["meta"]["page"], 1);
    assert_eq!(body["data"][0]["first_name"], "Alice");
    assert_eq!(body["data"][0]["tags"][0]["name"], "Friends");
}

#[tokio::test]
async fn should_report_health_without_auth() {
    let app = spawn_app().await;

    app.server.get("/healthz").await.assert_status_ok();
    app.server.get("/readyz").await.assert_status_ok();
}

#[tokio::test]
async fn should_echo_request_id_header() {
    let app = spawn_app().await;

    let resp = app.server.get("/healthz").await;
    let id = resp.header("x-request-id");
    assert!(!id.is_empty(), "missing x-request-id");
}

#[tokio::test]
async fn should_reject_requests_without_bearer_token() {
    let app = spawn_app().await;

    let resp = app.server.get("/api/tags").await;
    resp.assert_status(StatusCode::UNAUTHORIZED);
    assert_eq!(resp.json::<Value>()["errors"], "UNAUTHORIZED");
}

#[tokio::test]
async fn should_reject_malformed_json_body() {
    let app = spawn_app().await;
    let user = app.user("bad-json@example.com").await;

    let resp = app
        .server
        .post("/api/tags")
        .add_header(axum::http::header::AUTHORIZATION, user.bearer())
        .add_header(
            axum::http::header::CONTENT_TYPE,
            axum::http::HeaderValue::from_static("application/json"),
        )
        .bytes("{\"name\":".into())
        .await;
    resp.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(resp.json::<Value>()["errors"], "INVALID_REQUEST");
}

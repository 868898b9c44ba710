use axum::http::StatusCode;
use axum::http::header::AUTHORIZATION;
use serde_json::{Value, json};

use rolodex_testing::auth::MockAuth;

use crate::helpers::{PASSWORD, assert_error, spawn_app};

#[tokio::test]
async fn should_register_without_exposing_password() {
    let app = spawn_app().await;

    let resp = app
        .server
        .post("/api/users")
        .json(&json!({ "email": "New@Example.com", "password": PASSWORD, "name": "New" }))
        .await;
    resp.assert_status(StatusCode::CREATED);
    let data = resp.json::<Value>()["data"].clone();
    assert_eq!(data["email"], "new@example.com");
    assert!(data.get("password").is_none());
    assert!(data["verified_at"].is_null());
}

#[tokio::test]
async fn should_reject_duplicate_email() {
    let app = spawn_app().await;
    app.register("dup@example.com").await;

    let resp = app
        .server
        .post("/api/users")
        .json(&json!({ "email": "DUP@example.com", "password": PASSWORD, "name": "Again" }))
        .await;
    assert_error(&resp, StatusCode::CONFLICT, "EMAIL_ALREADY_EXISTS");
}

#[tokio::test]
async fn should_reject_missing_registration_fields() {
    let app = spawn_app().await;

    let resp = app
        .server
        .post("/api/users")
        .json(&json!({ "email": "x@example.com", "name": "X" }))
        .await;
    assert_error(&resp, StatusCode::BAD_REQUEST, "INVALID_REQUEST");
}

#[tokio::test]
async fn should_login_with_token_and_expiry() {
    let app = spawn_app().await;
    app.register("login@example.com").await;

    let resp = app.login("LOGIN@example.com", PASSWORD).await;
    resp.assert_status_ok();
    let data = resp.json::<Value>()["data"].clone();
    assert_eq!(data["email"], "login@example.com");
    assert!(data["token"].as_str().is_some_and(|t| !t.is_empty()));
    assert!(data["expires_at"].as_u64().is_some());
}

#[tokio::test]
async fn should_not_tell_unknown_email_from_wrong_password() {
    let app = spawn_app().await;
    app.register("known@example.com").await;

    let wrong = app.login("known@example.com", "nope").await;
    assert_error(&wrong, StatusCode::UNAUTHORIZED, "INVALID_CREDENTIALS");
    let unknown = app.login("ghost@example.com", PASSWORD).await;
    assert_error(&unknown, StatusCode::UNAUTHORIZED, "INVALID_CREDENTIALS");
}

#[tokio::test]
async fn should_get_and_patch_current_user() {
    let app = spawn_app().await;
    let user = app.user("me@example.com").await;

    let resp = app.get(&user, "/api/users/_current").await;
    resp.assert_status_ok();
    assert_eq!(resp.json::<Value>()["data"]["id"], user.id.as_str());

    let resp = app
        .patch(
            &user,
            "/api/users/_current",
            json!({ "name": "Renamed", "email": "", "password": "new secret" }),
        )
        .await;
    resp.assert_status_ok();
    let data = resp.json::<Value>()["data"].clone();
    assert_eq!(data["name"], "Renamed");
    assert_eq!(data["email"], "me@example.com");

    app.login("me@example.com", PASSWORD)
        .await
        .assert_status(StatusCode::UNAUTHORIZED);
    app.login("me@example.com", "new secret")
        .await
        .assert_status_ok();
}

#[tokio::test]
async fn should_logout_current_user() {
    let app = spawn_app().await;
    let user = app.user("bye@example.com").await;

    let resp = app.delete(&user, "/api/users", json!({})).await;
    resp.assert_status_ok();
    assert_eq!(resp.json::<Value>()["data"]["email"], "bye@example.com");
}

#[tokio::test]
async fn should_reject_otp_token_on_access_routes() {
    let app = spawn_app().await;
    let user = app.user("kinds@example.com").await;

    let ticket = app
        .server
        .post("/api/users/_otp")
        .json(&json!({ "email": user.email }))
        .await;
    ticket.assert_status(StatusCode::CREATED);
    let otp_token = ticket.json::<Value>()["data"]["token"]
        .as_str()
        .unwrap()
        .to_owned();

    let resp = app
        .server
        .get("/api/users/_current")
        .add_header(AUTHORIZATION, crate::helpers::bearer(&otp_token))
        .await;
    assert_error(&resp, StatusCode::UNAUTHORIZED, "UNAUTHORIZED");
}

#[tokio::test]
async fn should_return_404_for_valid_token_of_unknown_user() {
    let app = spawn_app().await;

    let resp = app
        .server
        .get("/api/users/_current")
        .add_header(AUTHORIZATION, MockAuth::stranger().bearer())
        .await;
    assert_error(&resp, StatusCode::NOT_FOUND, "USER_NOT_FOUND");
}

use std::sync::Arc;

use axum::http::StatusCode;
use axum::http::header::AUTHORIZATION;
use chrono::{Duration, Utc};
use sea_orm::{ActiveModelTrait, ActiveValue::Set, EntityTrait, PaginatorTrait};
use serde_json::{Value, json};

use rolodex_contacts_schema::otps;

use crate::helpers::{FailingMailer, PASSWORD, TestApp, assert_error, bearer, spawn_app, spawn_app_with};

/// Request an OTP for `email` and return its token.
async fn request_otp(app: &TestApp, email: &str) -> String {
    let resp = app
        .server
        .post("/api/users/_otp")
        .json(&json!({ "email": email }))
        .await;
    resp.assert_status(StatusCode::CREATED);
    resp.json::<Value>()["data"]["token"]
        .as_str()
        .unwrap()
        .to_owned()
}

// ── Issue ────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn should_email_code_and_store_only_its_hash() {
    let app = spawn_app().await;
    let user = app.user("otp@example.com").await;

    let token = request_otp(&app, "OTP@example.com").await;

    let sent = app.mailer.sent.lock().unwrap().clone();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].to, "otp@example.com");
    assert_eq!(sent[0].code.len(), 6);

    let row = otps::Entity::find().one(&app.db).await.unwrap().unwrap();
    assert_eq!(row.user_id, user.id);
    assert_eq!(row.token, token);
    assert_ne!(row.otp, sent[0].code);
    assert!(row.expires_at > Utc::now());
}

#[tokio::test]
async fn should_return_404_for_unknown_email() {
    let app = spawn_app().await;

    let resp = app
        .server
        .post("/api/users/_otp")
        .json(&json!({ "email": "nobody@example.com" }))
        .await;
    assert_error(&resp, StatusCode::NOT_FOUND, "USER_NOT_FOUND");
    assert_eq!(app.mailer.count(), 0);
}

#[tokio::test]
async fn should_discard_otp_when_email_fails() {
    let (server, db) = spawn_app_with(Arc::new(FailingMailer)).await;
    server
        .post("/api/users")
        .json(&json!({ "email": "down@example.com", "password": PASSWORD, "name": "Down" }))
        .await
        .assert_status(StatusCode::CREATED);

    let resp = server
        .post("/api/users/_otp")
        .json(&json!({ "email": "down@example.com" }))
        .await;
    assert_error(&resp, StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL");
    assert_eq!(otps::Entity::find().count(&db).await.unwrap(), 0);
}

// ── Verify user ──────────────────────────────────────────────────────────────

#[tokio::test]
async fn should_verify_user_once() {
    let app = spawn_app().await;
    let user = app.user("verify@example.com").await;
    let token = request_otp(&app, &user.email).await;
    let code = app.mailer.last_code();

    let resp = app
        .post(
            &user,
            "/api/users/_otp/verify",
            json!({ "otp": code, "token": token }),
        )
        .await;
    resp.assert_status_ok();
    assert!(resp.json::<Value>()["data"]["verified_at"].is_string());
    assert_eq!(otps::Entity::find().count(&app.db).await.unwrap(), 0);

    let again = app
        .post(
            &user,
            "/api/users/_otp/verify",
            json!({ "otp": code, "token": token }),
        )
        .await;
    assert_error(&again, StatusCode::UNAUTHORIZED, "OTP_ALREADY_VERIFIED");
}

#[tokio::test]
async fn should_reject_wrong_code() {
    let app = spawn_app().await;
    let user = app.user("wrong@example.com").await;
    let token = request_otp(&app, &user.email).await;
    let code = app.mailer.last_code();
    let wrong = if code == "000000" { "111111" } else { "000000" };

    let resp = app
        .post(
            &user,
            "/api/users/_otp/verify",
            json!({ "otp": wrong, "token": token }),
        )
        .await;
    assert_error(&resp, StatusCode::UNAUTHORIZED, "INVALID_OTP");
    assert_eq!(otps::Entity::find().count(&app.db).await.unwrap(), 1);
}

#[tokio::test]
async fn should_reject_expired_code() {
    let app = spawn_app().await;
    let user = app.user("late@example.com").await;
    let token = request_otp(&app, &user.email).await;
    let code = app.mailer.last_code();

    let row = otps::Entity::find().one(&app.db).await.unwrap().unwrap();
    let mut row: otps::ActiveModel = row.into();
    row.expires_at = Set(Utc::now() - Duration::seconds(1));
    row.update(&app.db).await.unwrap();

    let resp = app
        .post(
            &user,
            "/api/users/_otp/verify",
            json!({ "otp": code, "token": token }),
        )
        .await;
    assert_error(&resp, StatusCode::UNAUTHORIZED, "OTP_EXPIRED");
}

#[tokio::test]
async fn should_not_verify_with_someone_elses_otp() {
    let app = spawn_app().await;
    let owner = app.user("owner-otp@example.com").await;
    let intruder = app.user("intruder@example.com").await;
    let token = request_otp(&app, &owner.email).await;
    let code = app.mailer.last_code();

    let resp = app
        .post(
            &intruder,
            "/api/users/_otp/verify",
            json!({ "otp": code, "token": token }),
        )
        .await;
    assert_error(&resp, StatusCode::NOT_FOUND, "OTP_NOT_FOUND");
}

// ── Forgot password ──────────────────────────────────────────────────────────

#[tokio::test]
async fn should_reset_password_with_verified_otp() {
    let app = spawn_app().await;
    app.register("forgot@example.com").await;
    let token = request_otp(&app, "forgot@example.com").await;
    let code = app.mailer.last_code();

    let resp = app
        .server
        .post("/api/users/_otp/forgot")
        .json(&json!({ "otp": code, "token": token }))
        .await;
    resp.assert_status_ok();
    let ticket = resp.json::<Value>()["data"].clone();
    assert_eq!(ticket["token"], token.as_str());

    let resp = app
        .server
        .patch("/api/users/_password")
        .add_header(AUTHORIZATION, bearer(&token))
        .json(&json!({ "password": "brand new secret" }))
        .await;
    resp.assert_status_ok();
    assert_eq!(otps::Entity::find().count(&app.db).await.unwrap(), 0);

    app.login("forgot@example.com", PASSWORD)
        .await
        .assert_status(StatusCode::UNAUTHORIZED);
    app.login("forgot@example.com", "brand new secret")
        .await
        .assert_status_ok();

    let reuse = app
        .server
        .patch("/api/users/_password")
        .add_header(AUTHORIZATION, bearer(&token))
        .json(&json!({ "password": "third secret" }))
        .await;
    assert_error(&reuse, StatusCode::NOT_FOUND, "OTP_NOT_FOUND");
}

#[tokio::test]
async fn should_refuse_password_reset_before_otp_is_verified() {
    let app = spawn_app().await;
    app.register("eager@example.com").await;
    let token = request_otp(&app, "eager@example.com").await;

    let resp = app
        .server
        .patch("/api/users/_password")
        .add_header(AUTHORIZATION, bearer(&token))
        .json(&json!({ "password": "too soon" }))
        .await;
    assert_error(&resp, StatusCode::UNAUTHORIZED, "OTP_NOT_VERIFIED");
}

#[tokio::test]
async fn should_refuse_password_reset_with_access_token() {
    let app = spawn_app().await;
    let user = app.user("access@example.com").await;

    let resp = app
        .patch(&user, "/api/users/_password", json!({ "password": "x" }))
        .await;
    assert_error(&resp, StatusCode::UNAUTHORIZED, "UNAUTHORIZED");
}

#[tokio::test]
async fn should_reject_second_forgot_verification() {
    let app = spawn_app().await;
    app.register("twice@example.com").await;
    let token = request_otp(&app, "twice@example.com").await;
    let code = app.mailer.last_code();
    let body = json!({ "otp": code, "token": token });

    app.server
        .post("/api/users/_otp/forgot")
        .json(&body)
        .await
        .assert_status_ok();
    let again = app.server.post("/api/users/_otp/forgot").json(&body).await;
    assert_error(&again, StatusCode::UNAUTHORIZED, "OTP_ALREADY_VERIFIED");
}

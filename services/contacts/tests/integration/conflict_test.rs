use axum::http::StatusCode;
use serde_json::json;

use crate::helpers::{assert_error, spawn_app};

#[tokio::test]
async fn should_reject_duplicate_tag_name_per_user() {
    let app = spawn_app().await;
    let user = app.user("tags@example.com").await;
    let other = app.user("other-tags@example.com").await;
    app.create(&user, "/api/tags", json!({ "name": "Friends" }))
        .await;

    let resp = app.post(&user, "/api/tags", json!({ "name": "Friends" })).await;
    assert_error(&resp, StatusCode::CONFLICT, "TAG_ALREADY_EXISTS");

    app.post(&other, "/api/tags", json!({ "name": "Friends" }))
        .await
        .assert_status(StatusCode::CREATED);
}

#[tokio::test]
async fn should_reject_duplicate_phone_number() {
    let app = spawn_app().await;
    let user = app.user("phones@example.com").await;
    app.create(
        &user,
        "/api/phones",
        json!({ "name": "Mobile", "number": "555-0199" }),
    )
    .await;

    let resp = app
        .post(
            &user,
            "/api/phones",
            json!({ "name": "Other", "number": "555-0199" }),
        )
        .await;
    assert_error(&resp, StatusCode::CONFLICT, "PHONE_ALREADY_EXISTS");
}

#[tokio::test]
async fn should_reject_duplicate_relationship_and_date_names() {
    let app = spawn_app().await;
    let user = app.user("names@example.com").await;
    app.create(&user, "/api/relationships", json!({ "name": "Cousin" }))
        .await;
    app.create(
        &user,
        "/api/importantdates",
        json!({ "name": "Anniversary", "date": "2020-06-01" }),
    )
    .await;

    let rel = app
        .post(&user, "/api/relationships", json!({ "name": "Cousin" }))
        .await;
    assert_error(&rel, StatusCode::CONFLICT, "RELATIONSHIP_ALREADY_EXISTS");
    let date = app
        .post(
            &user,
            "/api/importantdates",
            json!({ "name": "Anniversary", "date": "2021-06-01" }),
        )
        .await;
    assert_error(&date, StatusCode::CONFLICT, "IMPORTANT_DATE_ALREADY_EXISTS");
}

#[tokio::test]
async fn should_reject_rename_onto_existing_tag() {
    let app = spawn_app().await;
    let user = app.user("rename@example.com").await;
    app.create(&user, "/api/tags", json!({ "name": "A" })).await;
    let b = app.create_id(&user, "/api/tags", json!({ "name": "B" })).await;

    let resp = app
        .patch(&user, "/api/tags", json!({ "id": b, "name": "A" }))
        .await;
    assert_error(&resp, StatusCode::CONFLICT, "TAG_ALREADY_EXISTS");
}

#[tokio::test]
async fn should_reject_email_change_onto_existing_account() {
    let app = spawn_app().await;
    app.register("taken@example.com").await;
    let user = app.user("mover@example.com").await;

    let resp = app
        .patch(
            &user,
            "/api/users/_current",
            json!({ "email": "taken@example.com" }),
        )
        .await;
    assert_error(&resp, StatusCode::CONFLICT, "EMAIL_ALREADY_EXISTS");
}

use axum::http::StatusCode;
use serde_json::{Value, json};

use crate::helpers::{TestApp, TestUser, assert_error, spawn_app};

async fn seed_dates(app: &TestApp, user: &TestUser) {
    for (name, date) in [
        ("New year trip", "2025-01-05"),
        ("Birthday", "2025-02-10"),
        ("Anniversary", "2025-03-20"),
    ] {
        app.create(
            user,
            "/api/importantdates",
            json!({ "name": name, "date": date }),
        )
        .await;
    }
}

fn total(resp: &axum_test::TestResponse) -> u64 {
    resp.json::<Value>()["meta"]["total"].as_u64().unwrap()
}

// ── Date ranges ──────────────────────────────────────────────────────────────

#[tokio::test]
async fn should_filter_by_inclusive_date_range() {
    let app = spawn_app().await;
    let user = app.user("dates@example.com").await;
    seed_dates(&app, &user).await;

    let resp = app
        .get(
            &user,
            "/api/importantdates?date_ranges[date][from]=2025-02-01&date_ranges[date][to]=2025-03-01",
        )
        .await;
    resp.assert_status_ok();
    assert_eq!(total(&resp), 1);
    assert_eq!(resp.json::<Value>()["data"][0]["name"], "Birthday");

    let open_ended = app
        .get(&user, "/api/importantdates?date_ranges[date][from]=2025-02-01")
        .await;
    assert_eq!(total(&open_ended), 2);
}

#[tokio::test]
async fn should_include_rows_on_both_bounds() {
    let app = spawn_app().await;
    let user = app.user("bounds@example.com").await;
    for (name, date) in [
        ("Start", "2025-01-01"),
        ("End", "2025-01-31"),
        ("After", "2025-02-01"),
    ] {
        app.create(
            &user,
            "/api/importantdates",
            json!({ "name": name, "date": date }),
        )
        .await;
    }

    let resp = app
        .get(
            &user,
            "/api/importantdates?date_ranges[date][from]=2025-01-01&date_ranges[date][to]=2025-01-31&sort_by=date",
        )
        .await;
    resp.assert_status_ok();
    assert_eq!(total(&resp), 2);
    let body = resp.json::<Value>();
    assert_eq!(body["data"][0]["name"], "Start");
    assert_eq!(body["data"][1]["name"], "End");
}

#[tokio::test]
async fn should_ignore_unparsable_date_bound() {
    let app = spawn_app().await;
    let user = app.user("bad-bound@example.com").await;
    seed_dates(&app, &user).await;

    let resp = app
        .get(
            &user,
            "/api/importantdates?date_ranges[date][from]=not-a-date&date_ranges[date][to]=2025-02-15",
        )
        .await;
    resp.assert_status_ok();
    assert_eq!(total(&resp), 2);
}

#[tokio::test]
async fn should_reject_date_range_on_text_field() {
    let app = spawn_app().await;
    let user = app.user("text-range@example.com").await;
    seed_dates(&app, &user).await;

    let resp = app
        .get(&user, "/api/importantdates?date_ranges[name][from]=2025-01-01")
        .await;
    assert_error(&resp, StatusCode::BAD_REQUEST, "INVALID_QUERY");
}

// ── Search ───────────────────────────────────────────────────────────────────

#[tokio::test]
async fn should_and_search_terms_unless_or_is_set() {
    let app = spawn_app().await;
    let user = app.user("search@example.com").await;
    app.create(&user, "/api/persons", json!({ "first_name": "Alice" }))
        .await;
    app.create(
        &user,
        "/api/persons",
        json!({ "first_name": "Robert", "nickname": "Bobby" }),
    )
    .await;

    let any = app
        .get(
            &user,
            "/api/persons?search[first_name]=Ali&search[nickname]=Bob&or=true",
        )
        .await;
    any.assert_status_ok();
    assert_eq!(total(&any), 2);

    let all = app
        .get(&user, "/api/persons?search[first_name]=Ali&search[nickname]=Bob")
        .await;
    assert_error(&all, StatusCode::NOT_FOUND, "PERSON_NOT_FOUND");
}

#[tokio::test]
async fn should_match_search_terms_case_sensitively() {
    let app = spawn_app().await;
    let user = app.user("case@example.com").await;
    app.create(&user, "/api/persons", json!({ "first_name": "Alice" }))
        .await;

    let exact = app.get(&user, "/api/persons?search[first_name]=Ali").await;
    exact.assert_status_ok();
    assert_eq!(total(&exact), 1);

    let lower = app.get(&user, "/api/persons?search[first_name]=ali").await;
    assert_error(&lower, StatusCode::NOT_FOUND, "PERSON_NOT_FOUND");
}

#[tokio::test]
async fn should_reject_unknown_fields_and_relations() {
    let app = spawn_app().await;
    let user = app.user("unknown@example.com").await;
    app.create(&user, "/api/tags", json!({ "name": "Friends" }))
        .await;

    let field = app.get(&user, "/api/tags?search[shoe_size]=44").await;
    assert_error(&field, StatusCode::BAD_REQUEST, "INVALID_QUERY");
    let sort = app.get(&user, "/api/tags?sort_by=shoe_size").await;
    assert_error(&sort, StatusCode::BAD_REQUEST, "INVALID_QUERY");
    let preload = app.get(&user, "/api/tags?preload[0]=phones").await;
    assert_error(&preload, StatusCode::BAD_REQUEST, "INVALID_QUERY");
}

#[tokio::test]
async fn should_return_404_when_nothing_matches() {
    let app = spawn_app().await;
    let user = app.user("empty@example.com").await;

    let resp = app.get(&user, "/api/tags").await;
    assert_error(&resp, StatusCode::NOT_FOUND, "TAG_NOT_FOUND");
}

// ── Paging ───────────────────────────────────────────────────────────────────

#[tokio::test]
async fn should_sort_and_window_with_page_meta() {
    let app = spawn_app().await;
    let user = app.user("pages@example.com").await;
    for n in 1..=5 {
        app.create(&user, "/api/tags", json!({ "name": format!("T{n}") }))
            .await;
    }

    let resp = app
        .get(&user, "/api/tags?sort_by=name&order=DESC&limit=2&offset=2")
        .await;
    resp.assert_status_ok();
    let body = resp.json::<Value>();
    assert_eq!(
        body["meta"],
        json!({ "total": 5, "page": 2, "page_size": 2, "total_pages": 3 })
    );
    let names: Vec<&str> = body["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|t| t["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["T3", "T2"]);
}

#[tokio::test]
async fn should_accept_largest_limit() {
    let app = spawn_app().await;
    let user = app.user("huge-limit@example.com").await;
    for name in ["A", "B"] {
        app.create(&user, "/api/tags", json!({ "name": name })).await;
    }

    let resp = app
        .get(&user, &format!("/api/tags?limit={}", i64::MAX))
        .await;
    resp.assert_status_ok();
    let body = resp.json::<Value>();
    assert_eq!(body["meta"]["total"], 2);
    assert_eq!(body["meta"]["page"], 1);
    assert_eq!(body["meta"]["total_pages"], 1);
    assert_eq!(body["data"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn should_preload_persons_on_tags_only_when_asked() {
    let app = spawn_app().await;
    let user = app.user("tag-preload@example.com").await;
    let person = app
        .create_id(&user, "/api/persons", json!({ "first_name": "Hana" }))
        .await;
    app.create(
        &user,
        "/api/tags",
        json!({ "name": "Club", "person_ids": [person] }),
    )
    .await;

    let plain = app.get(&user, "/api/tags").await;
    assert!(plain.json::<Value>()["data"][0].get("persons").is_none());

    let loaded = app.get(&user, "/api/tags?preload[0]=persons").await;
    assert_eq!(
        loaded.json::<Value>()["data"][0]["persons"][0]["first_name"],
        "Hana"
    );
}

// ── Ownership ────────────────────────────────────────────────────────────────

#[tokio::test]
async fn should_hide_rows_from_other_users() {
    let app = spawn_app().await;
    let owner = app.user("mine@example.com").await;
    let other = app.user("yours@example.com").await;
    let tag = app
        .create_id(&owner, "/api/tags", json!({ "name": "Private" }))
        .await;

    let list = app.get(&other, "/api/tags").await;
    assert_error(&list, StatusCode::NOT_FOUND, "TAG_NOT_FOUND");
    let by_id = app
        .get(&other, &format!("/api/tags?search[id]={tag}"))
        .await;
    assert_error(&by_id, StatusCode::NOT_FOUND, "TAG_NOT_FOUND");

    let update = app
        .patch(&other, "/api/tags", json!({ "id": tag, "name": "Stolen" }))
        .await;
    assert_error(&update, StatusCode::NOT_FOUND, "TAG_NOT_FOUND");
    let delete = app.delete(&other, "/api/tags", json!({ "id": tag })).await;
    assert_error(&delete, StatusCode::NOT_FOUND, "TAG_NOT_FOUND");

    let still_there = app.get(&owner, "/api/tags").await;
    assert_eq!(still_there.json::<Value>()["data"][0]["name"], "Private");
}

use axum::http::StatusCode;
use sea_orm::{EntityTrait, PaginatorTrait};
use serde_json::{Value, json};

use rolodex_contacts_schema::{persons_relationships, persons_tags, tags};

use crate::helpers::{assert_error, spawn_app};

fn names(list: &Value) -> Vec<String> {
    let mut names: Vec<String> = list
        .as_array()
        .unwrap()
        .iter()
        .map(|v| v["name"].as_str().unwrap().to_owned())
        .collect();
    names.sort();
    names
}

#[tokio::test]
async fn should_roll_back_tag_when_a_person_is_missing() {
    let app = spawn_app().await;
    let user = app.user("assoc@example.com").await;
    let alice = app
        .create_id(&user, "/api/persons", json!({ "first_name": "Alice" }))
        .await;

    let resp = app
        .post(
            &user,
            "/api/tags",
            json!({ "name": "Work", "person_ids": [alice, "missing-person"] }),
        )
        .await;
    assert_error(&resp, StatusCode::NOT_FOUND, "REFERENCE_NOT_FOUND");
    assert_eq!(persons_tags::Entity::find().count(&app.db).await.unwrap(), 0);
    assert_eq!(tags::Entity::find().count(&app.db).await.unwrap(), 0);
}

#[tokio::test]
async fn should_treat_other_users_rows_as_missing() {
    let app = spawn_app().await;
    let owner = app.user("a@example.com").await;
    let other = app.user("b@example.com").await;
    let foreign_tag = app
        .create_id(&other, "/api/tags", json!({ "name": "Theirs" }))
        .await;

    let resp = app
        .post(
            &owner,
            "/api/persons",
            json!({ "first_name": "Bob", "tag_ids": [foreign_tag] }),
        )
        .await;
    assert_error(&resp, StatusCode::NOT_FOUND, "REFERENCE_NOT_FOUND");
}

#[tokio::test]
async fn should_link_duplicate_ids_once() {
    let app = spawn_app().await;
    let user = app.user("dedupe@example.com").await;
    let tag = app
        .create_id(&user, "/api/tags", json!({ "name": "Family" }))
        .await;

    app.create(
        &user,
        "/api/persons",
        json!({ "first_name": "Carol", "tag_ids": [tag, tag] }),
    )
    .await;
    assert_eq!(persons_tags::Entity::find().count(&app.db).await.unwrap(), 1);
}

#[tokio::test]
async fn should_replace_links_on_update_and_keep_them_on_empty_list() {
    let app = spawn_app().await;
    let user = app.user("replace@example.com").await;
    let friends = app
        .create_id(&user, "/api/tags", json!({ "name": "Friends" }))
        .await;
    let gym = app
        .create_id(&user, "/api/tags", json!({ "name": "Gym" }))
        .await;
    let person = app
        .create_id(
            &user,
            "/api/persons",
            json!({ "first_name": "Dan", "tag_ids": [friends] }),
        )
        .await;

    app.patch(
        &user,
        "/api/persons",
        json!({ "id": person, "tag_ids": [gym] }),
    )
    .await
    .assert_status_ok();
    let resp = app
        .get(&user, &format!("/api/persons?search[id]={person}&preload[0]=tags"))
        .await;
    assert_eq!(names(&resp.json::<Value>()["data"][0]["tags"]), vec!["Gym"]);

    app.patch(
        &user,
        "/api/persons",
        json!({ "id": person, "nickname": "D" }),
    )
    .await
    .assert_status_ok();
    let resp = app
        .get(&user, &format!("/api/persons?search[id]={person}&preload[0]=tags"))
        .await;
    assert_eq!(names(&resp.json::<Value>()["data"][0]["tags"]), vec!["Gym"]);
}

#[tokio::test]
async fn should_link_persons_from_relationship_side() {
    let app = spawn_app().await;
    let user = app.user("rel@example.com").await;
    let erin = app
        .create_id(&user, "/api/persons", json!({ "first_name": "Erin" }))
        .await;

    let rel = app
        .create(
            &user,
            "/api/relationships",
            json!({ "name": "Sister", "color": "#ff0000", "person_ids": [erin] }),
        )
        .await;
    assert_eq!(rel["color"], "#ff0000");
    assert_eq!(
        persons_relationships::Entity::find()
            .count(&app.db)
            .await
            .unwrap(),
        1
    );

    let resp = app
        .get(&user, "/api/persons?preload[0]=relationships")
        .await;
    resp.assert_status_ok();
    assert_eq!(
        names(&resp.json::<Value>()["data"][0]["relationships"]),
        vec!["Sister"]
    );
}

#[tokio::test]
async fn should_reject_phone_for_unknown_person() {
    let app = spawn_app().await;
    let user = app.user("phone-ref@example.com").await;

    let resp = app
        .post(
            &user,
            "/api/phones",
            json!({ "name": "Mobile", "number": "+1 555 0100", "person_id": "nobody" }),
        )
        .await;
    assert_error(&resp, StatusCode::NOT_FOUND, "REFERENCE_NOT_FOUND");
}

#[tokio::test]
async fn should_unlink_dependents_when_person_is_deleted() {
    let app = spawn_app().await;
    let user = app.user("cascade@example.com").await;
    let tag = app
        .create_id(&user, "/api/tags", json!({ "name": "Old" }))
        .await;
    let person = app
        .create_id(
            &user,
            "/api/persons",
            json!({ "first_name": "Fay", "tag_ids": [tag] }),
        )
        .await;
    let phone = app
        .create_id(
            &user,
            "/api/phones",
            json!({ "name": "Home", "number": "555-0101", "person_id": person }),
        )
        .await;

    app.delete(&user, "/api/persons", json!({ "id": person }))
        .await
        .assert_status_ok();

    assert_eq!(persons_tags::Entity::find().count(&app.db).await.unwrap(), 0);
    let resp = app
        .get(&user, &format!("/api/phones?search[id]={phone}"))
        .await;
    resp.assert_status_ok();
    assert!(resp.json::<Value>()["data"][0].get("person_id").is_none());
}

#[tokio::test]
async fn should_preload_person_on_phones_and_dates() {
    let app = spawn_app().await;
    let user = app.user("preload@example.com").await;
    let person = app
        .create_id(&user, "/api/persons", json!({ "first_name": "Gus" }))
        .await;
    app.create(
        &user,
        "/api/phones",
        json!({ "name": "Work", "number": "555-0102", "person_id": person }),
    )
    .await;
    app.create(
        &user,
        "/api/importantdates",
        json!({ "name": "Birthday", "date": "1990-04-01", "person_id": person }),
    )
    .await;

    let phones = app.get(&user, "/api/phones?preload[0]=person").await;
    phones.assert_status_ok();
    assert_eq!(phones.json::<Value>()["data"][0]["person"]["first_name"], "Gus");

    let dates = app.get(&user, "/api/importantdates?preload[0]=person").await;
    dates.assert_status_ok();
    assert_eq!(dates.json::<Value>()["data"][0]["person"]["id"], person.as_str());

    let person_view = app
        .get(
            &user,
            "/api/persons?preload[0]=phones&preload[1]=important_dates",
        )
        .await;
    let data = person_view.json::<Value>()["data"][0].clone();
    assert_eq!(data["phones"][0]["number"], "555-0102");
    assert_eq!(data["important_dates"][0]["name"], "Birthday");
}

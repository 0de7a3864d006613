use axum::http::StatusCode;
use pretty_assertions::assert_eq;
use psychbook_core::models::user::Role;
use serde_json::{Value, json};

use crate::test_utils::TestContext;

#[test_log::test(tokio::test)]
async fn test_create_and_list_cabin() {
    let ctx = TestContext::new();
    let (_, admin) = ctx.user(Role::Admin).await;

    let response = ctx
        .server
        .post("/api/cabins")
        .add_header(admin.0.clone(), admin.1.clone())
        .json(&json!({ "name": "Downtown", "location": "Main St 1" }))
        .await;
    assert_eq!(response.status_code(), StatusCode::CREATED);
    let cabin_id = response.json::<Value>()["id"].as_str().unwrap().to_string();

    ctx.server
        .post(&format!("/api/cabins/{}/rooms", cabin_id))
        .add_header(admin.0.clone(), admin.1.clone())
        .json(&json!({ "name": "Room A" }))
        .await;

    let response = ctx
        .server
        .get("/api/cabins")
        .add_header(admin.0.clone(), admin.1.clone())
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);

    let body = response.json::<Value>();
    assert_eq!(body[0]["name"], "Downtown");
    assert_eq!(body[0]["location"], "Main St 1");
    assert_eq!(body[0]["rooms"][0]["name"], "Room A");
    assert_eq!(body[0]["psychologists"], json!([]));
}

#[test_log::test(tokio::test)]
async fn test_blank_cabin_name_is_rejected() {
    let ctx = TestContext::new();
    let (_, admin) = ctx.user(Role::Admin).await;

    let response = ctx
        .server
        .post("/api/cabins")
        .add_header(admin.0, admin.1)
        .json(&json!({ "name": "" }))
        .await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    assert!(response.json::<Value>()["error"].as_str().is_some());
}

#[test_log::test(tokio::test)]
async fn test_psychologist_cannot_manage_cabins() {
    let ctx = TestContext::new();
    let (_, psychologist) = ctx.user(Role::Psychologist).await;

    let response = ctx
        .server
        .post("/api/cabins")
        .add_header(psychologist.0.clone(), psychologist.1.clone())
        .json(&json!({ "name": "Downtown" }))
        .await;
    assert_eq!(response.status_code(), StatusCode::FORBIDDEN);

    let response = ctx
        .server
        .get("/api/cabins")
        .add_header(psychologist.0, psychologist.1)
        .await;
    assert_eq!(response.status_code(), StatusCode::FORBIDDEN);
}

#[test_log::test(tokio::test)]
async fn test_other_admins_cabin_is_not_found() {
    let ctx = TestContext::new();
    let (_, owner) = ctx.user(Role::Admin).await;
    let (_, other) = ctx.user(Role::Admin).await;
    let cabin_id = ctx.cabin(&owner, "Downtown").await;

    for response in [
        ctx.server
            .get(&format!("/api/cabins/{}", cabin_id))
            .add_header(other.0.clone(), other.1.clone())
            .await,
        ctx.server
            .put(&format!("/api/cabins/{}", cabin_id))
            .add_header(other.0.clone(), other.1.clone())
            .json(&json!({ "name": "Mine now" }))
            .await,
        ctx.server
            .delete(&format!("/api/cabins/{}", cabin_id))
            .add_header(other.0.clone(), other.1.clone())
            .await,
    ] {
        assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
    }

    let response = ctx
        .server
        .get(&format!("/api/cabins/{}", cabin_id))
        .add_header(owner.0, owner.1)
        .await;
    assert_eq!(response.json::<Value>()["name"], "Downtown");
}

#[test_log::test(tokio::test)]
async fn test_update_and_delete_cabin() {
    let ctx = TestContext::new();
    let (_, admin) = ctx.user(Role::Admin).await;
    let cabin_id = ctx.cabin(&admin, "Downtown").await;

    let response = ctx
        .server
        .put(&format!("/api/cabins/{}", cabin_id))
        .add_header(admin.0.clone(), admin.1.clone())
        .json(&json!({ "location": "" }))
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);
    let body = response.json::<Value>();
    assert_eq!(body["name"], "Downtown");
    assert_eq!(body["location"], Value::Null);

    let response = ctx
        .server
        .delete(&format!("/api/cabins/{}", cabin_id))
        .add_header(admin.0.clone(), admin.1.clone())
        .await;
    assert_eq!(response.status_code(), StatusCode::NO_CONTENT);

    let response = ctx
        .server
        .get(&format!("/api/cabins/{}", cabin_id))
        .add_header(admin.0, admin.1)
        .await;
    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
}

#[test_log::test(tokio::test)]
async fn test_room_lifecycle() {
    let ctx = TestContext::new();
    let (_, admin) = ctx.user(Role::Admin).await;
    let cabin_id = ctx.cabin(&admin, "Downtown").await;
    let rooms = format!("/api/cabins/{}/rooms", cabin_id);

    let response = ctx
        .server
        .post(&rooms)
        .add_header(admin.0.clone(), admin.1.clone())
        .json(&json!({ "name": "Room A" }))
        .await;
    assert_eq!(response.status_code(), StatusCode::CREATED);
    let room = response.json::<Value>();
    assert_eq!(room["cabin_id"], cabin_id.to_string());
    let room_url = format!("{}/{}", rooms, room["id"].as_str().unwrap());

    let response = ctx
        .server
        .put(&room_url)
        .add_header(admin.0.clone(), admin.1.clone())
        .json(&json!({ "name": "Quiet room" }))
        .await;
    assert_eq!(response.json::<Value>()["name"], "Quiet room");

    let response = ctx
        .server
        .delete(&room_url)
        .add_header(admin.0.clone(), admin.1.clone())
        .await;
    assert_eq!(response.status_code(), StatusCode::NO_CONTENT);

    let response = ctx
        .server
        .get(&room_url)
        .add_header(admin.0, admin.1)
        .await;
    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
}

use axum::http::StatusCode;
use pretty_assertions::assert_eq;
use psychbook_core::models::user::Role;
use serde_json::{Value, json};
use uuid::Uuid;

use crate::test_utils::TestContext;

#[test_log::test(tokio::test)]
async fn test_assign_and_list_psychologists() {
    let ctx = TestContext::new();
    let (_, admin) = ctx.user(Role::Admin).await;
    let (ana, _) = ctx.user(Role::Psychologist).await;
    let cabin_id = ctx.cabin(&admin, "Downtown").await;

    ctx.assign(&admin, cabin_id, ana.user_id).await;

    let response = ctx
        .server
        .get(&format!("/api/cabins/{}/psychologists", cabin_id))
        .add_header(admin.0, admin.1)
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);

    let body = response.json::<Value>();
    assert_eq!(body.as_array().unwrap().len(), 1);
    assert_eq!(body[0]["psychologist_id"], ana.user_id.to_string());
    assert_eq!(body[0]["email"], ana.email);
}

#[test_log::test(tokio::test)]
async fn test_repeat_assignment_is_bad_request() {
    let ctx = TestContext::new();
    let (_, admin) = ctx.user(Role::Admin).await;
    let (ana, _) = ctx.user(Role::Psychologist).await;
    let cabin_id = ctx.cabin(&admin, "Downtown").await;
    ctx.assign(&admin, cabin_id, ana.user_id).await;

    let response = ctx
        .server
        .post(&format!("/api/cabins/{}/psychologists", cabin_id))
        .add_header(admin.0, admin.1)
        .json(&json!({ "psychologist_id": ana.user_id }))
        .await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    assert_eq!(
        response.json::<Value>()["error"],
        "Validation error: Psychologist is already assigned to this cabin"
    );
}

#[test_log::test(tokio::test)]
async fn test_assignment_in_second_cabin_conflicts() {
    let ctx = TestContext::new();
    let (_, admin) = ctx.user(Role::Admin).await;
    let (ana, _) = ctx.user(Role::Psychologist).await;
    let north = ctx.cabin(&admin, "North").await;
    let south = ctx.cabin(&admin, "South").await;
    ctx.assign(&admin, north, ana.user_id).await;

    let response = ctx
        .server
        .post(&format!("/api/cabins/{}/psychologists", south))
        .add_header(admin.0, admin.1)
        .json(&json!({ "psychologist_id": ana.user_id }))
        .await;

    assert_eq!(response.status_code(), StatusCode::CONFLICT);
}

#[test_log::test(tokio::test)]
async fn test_only_psychologists_can_be_assigned() {
    let ctx = TestContext::new();
    let (_, admin) = ctx.user(Role::Admin).await;
    let (colleague, _) = ctx.user(Role::Admin).await;
    let cabin_id = ctx.cabin(&admin, "Downtown").await;

    for candidate in [colleague.user_id, Uuid::new_v4()] {
        let response = ctx
            .server
            .post(&format!("/api/cabins/{}/psychologists", cabin_id))
            .add_header(admin.0.clone(), admin.1.clone())
            .json(&json!({ "psychologist_id": candidate }))
            .await;
        assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
    }
}

#[test_log::test(tokio::test)]
async fn test_unassign_psychologist() {
    let ctx = TestContext::new();
    let (_, admin) = ctx.user(Role::Admin).await;
    let (ana, _) = ctx.user(Role::Psychologist).await;
    let cabin_id = ctx.cabin(&admin, "Downtown").await;
    ctx.assign(&admin, cabin_id, ana.user_id).await;
    let url = format!("/api/cabins/{}/psychologists/{}", cabin_id, ana.user_id);

    let response = ctx
        .server
        .delete(&url)
        .add_header(admin.0.clone(), admin.1.clone())
        .await;
    assert_eq!(response.status_code(), StatusCode::NO_CONTENT);

    let response = ctx
        .server
        .delete(&url)
        .add_header(admin.0, admin.1)
        .await;
    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
}

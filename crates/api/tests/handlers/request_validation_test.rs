use axum::http::StatusCode;
use pretty_assertions::assert_eq;
use psychbook_core::models::user::Role;
use serde_json::{Value, json};

use crate::test_utils::TestContext;

fn error_message(body: &Value) -> &str {
    body["error"].as_str().unwrap_or_default()
}

#[test_log::test(tokio::test)]
async fn test_malformed_date_is_bad_request_with_error_body() {
    let ctx = TestContext::new();
    let (_, admin) = ctx.user(Role::Admin).await;
    let (ana, auth) = ctx.user(Role::Psychologist).await;
    let cabin_id = ctx.cabin(&admin, "Downtown").await;
    ctx.assign(&admin, cabin_id, ana.user_id).await;

    let response = ctx
        .server
        .post("/api/appointments")
        .add_header(auth.0, auth.1)
        .json(&json!({ "client_name": "Jane Roe", "date": "not-a-date", "start_time": "09:00:00" }))
        .await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    let body = response.json::<Value>();
    assert!(error_message(&body).starts_with("Validation error:"));
}

#[test_log::test(tokio::test)]
async fn test_missing_field_is_bad_request() {
    let ctx = TestContext::new();
    let (_, admin) = ctx.user(Role::Admin).await;

    let response = ctx
        .server
        .post("/api/cabins")
        .add_header(admin.0, admin.1)
        .json(&json!({ "location": "Main St 1" }))
        .await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    assert!(response.json::<Value>()["error"].is_string());
}

#[test_log::test(tokio::test)]
async fn test_wrong_role_with_malformed_body_is_forbidden() {
    let ctx = TestContext::new();
    let (_, psychologist) = ctx.user(Role::Psychologist).await;

    let response = ctx
        .server
        .post("/api/cabins")
        .add_header(psychologist.0, psychologist.1)
        .json(&json!({ "name": 42 }))
        .await;

    assert_eq!(response.status_code(), StatusCode::FORBIDDEN);
}

#[test_log::test(tokio::test)]
async fn test_admin_booking_with_malformed_body_is_forbidden() {
    let ctx = TestContext::new();
    let (_, admin) = ctx.user(Role::Admin).await;

    let response = ctx
        .server
        .post("/api/appointments")
        .add_header(admin.0, admin.1)
        .json(&json!({ "date": "soon" }))
        .await;

    assert_eq!(response.status_code(), StatusCode::FORBIDDEN);
}

#[test_log::test(tokio::test)]
async fn test_non_uuid_path_is_bad_request() {
    let ctx = TestContext::new();
    let (_, admin) = ctx.user(Role::Admin).await;
    let (_, psychologist) = ctx.user(Role::Psychologist).await;

    let response = ctx
        .server
        .get("/api/cabins/downtown")
        .add_header(admin.0, admin.1)
        .await;
    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    assert!(error_message(&response.json::<Value>()).starts_with("Validation error:"));

    let response = ctx
        .server
        .delete("/api/appointments/42")
        .add_header(psychologist.0, psychologist.1)
        .await;
    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
}

use axum::http::{HeaderValue, StatusCode, header::AUTHORIZATION};
use chrono::Duration;
use pretty_assertions::assert_eq;
use psychbook_api::middleware::{
    auth::{JwtConfig, issue_token},
    error_handling::AppError,
};
use psychbook_core::{
    errors::BookingError,
    models::user::{Identity, Role},
};
use rstest::rstest;
use serde_json::{Value, json};
use uuid::Uuid;

use crate::test_utils::TestContext;

#[rstest]
#[case(BookingError::NotFound("Cabin not found".to_string()), StatusCode::NOT_FOUND)]
#[case(BookingError::Validation("Invalid input".to_string()), StatusCode::BAD_REQUEST)]
#[case(BookingError::Conflict("Slot taken".to_string()), StatusCode::CONFLICT)]
#[case(BookingError::Authentication("Missing token".to_string()), StatusCode::UNAUTHORIZED)]
#[case(BookingError::Authorization("Admins only".to_string()), StatusCode::FORBIDDEN)]
#[case(BookingError::PermissionDenied("Not yours".to_string()), StatusCode::FORBIDDEN)]
#[case(BookingError::Database(eyre::eyre!("connection reset")), StatusCode::INTERNAL_SERVER_ERROR)]
fn test_error_status_mapping(#[case] error: BookingError, #[case] expected: StatusCode) {
    assert_eq!(AppError(error).status(), expected);
}

#[test_log::test(tokio::test)]
async fn test_health_needs_no_token() {
    let ctx = TestContext::new();

    let response = ctx.server.get("/health").await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let body = response.json::<Value>();
    assert_eq!(body["service"], "psychbook");
    assert_eq!(body["status"], "up");
    assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
}

#[test_log::test(tokio::test)]
async fn test_version_reports_build() {
    let ctx = TestContext::new();

    let response = ctx.server.get("/version").await;

    assert_eq!(response.status_code(), StatusCode::OK);
    assert_eq!(
        response.json::<Value>(),
        json!({ "service": "psychbook", "version": env!("CARGO_PKG_VERSION") })
    );
}

#[test_log::test(tokio::test)]
async fn test_missing_token_is_unauthorized() {
    let ctx = TestContext::new();

    let response = ctx.server.get("/api/cabins").await;

    assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);
    assert!(response.json::<Value>()["error"].as_str().is_some());
}

#[test_log::test(tokio::test)]
async fn test_non_bearer_scheme_is_unauthorized() {
    let ctx = TestContext::new();

    let response = ctx
        .server
        .get("/api/me")
        .add_header(AUTHORIZATION, HeaderValue::from_static("Basic YWRtaW46YWRtaW4="))
        .await;

    assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);
}

#[test_log::test(tokio::test)]
async fn test_token_signed_with_other_secret_is_unauthorized() {
    let ctx = TestContext::new();
    let identity = Identity::new(Uuid::new_v4(), "admin@example.com", Role::Admin);
    let token = issue_token(&identity, &JwtConfig::new("someone-else"), Duration::hours(1)).unwrap();

    let response = ctx
        .server
        .get("/api/cabins")
        .add_header(
            AUTHORIZATION,
            HeaderValue::from_str(&format!("Bearer {}", token)).unwrap(),
        )
        .await;

    assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);
}

#[test_log::test(tokio::test)]
async fn test_inactive_account_is_unauthorized() {
    let ctx = TestContext::new();
    let mut identity = Identity::new(Uuid::new_v4(), "former@example.com", Role::Admin);
    identity.is_active = false;
    let (name, value) = ctx.bearer(&identity);

    let response = ctx.server.get("/api/cabins").add_header(name, value).await;

    assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);
}

#[test_log::test(tokio::test)]
async fn test_me_reports_assigned_cabin() {
    let ctx = TestContext::new();
    let (_, admin) = ctx.user(Role::Admin).await;
    let (ana, auth) = ctx.user(Role::Psychologist).await;

    let response = ctx
        .server
        .get("/api/me")
        .add_header(auth.0.clone(), auth.1.clone())
        .await;
    let body = response.json::<Value>();
    assert_eq!(body["role"], "psychologist");
    assert_eq!(body["cabin_id"], Value::Null);

    let cabin_id = ctx.cabin(&admin, "Downtown").await;
    ctx.assign(&admin, cabin_id, ana.user_id).await;

    let response = ctx.server.get("/api/me").add_header(auth.0, auth.1).await;
    let body = response.json::<Value>();
    assert_eq!(body["id"], ana.user_id.to_string());
    assert_eq!(body["cabin_id"], cabin_id.to_string());
}

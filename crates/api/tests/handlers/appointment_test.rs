use axum::http::{HeaderName, HeaderValue, StatusCode};
use pretty_assertions::assert_eq;
use psychbook_core::models::user::{Identity, Role};
use serde_json::{Value, json};
use uuid::Uuid;

use crate::test_utils::TestContext;

type Auth = (HeaderName, HeaderValue);

/// An admin-owned cabin with two psychologists assigned to it.
async fn shared_cabin(ctx: &TestContext) -> (Uuid, (Identity, Auth), (Identity, Auth)) {
    let (_, admin) = ctx.user(Role::Admin).await;
    let first = ctx.user(Role::Psychologist).await;
    let second = ctx.user(Role::Psychologist).await;
    let cabin_id = ctx.cabin(&admin, "Downtown").await;
    ctx.assign(&admin, cabin_id, first.0.user_id).await;
    ctx.assign(&admin, cabin_id, second.0.user_id).await;
    (cabin_id, first, second)
}

async fn book(ctx: &TestContext, auth: &Auth, body: Value) -> axum_test::TestResponse {
    ctx.server
        .post("/api/appointments")
        .add_header(auth.0.clone(), auth.1.clone())
        .json(&body)
        .await
}

#[test_log::test(tokio::test)]
async fn test_booking_defaults_to_one_hour_pending() {
    let ctx = TestContext::new();
    let (cabin_id, (ana, auth), _) = shared_cabin(&ctx).await;

    let response = book(
        &ctx,
        &auth,
        json!({ "client_name": "Jane Roe", "date": "2025-03-14", "start_time": "09:00:00" }),
    )
    .await;

    assert_eq!(response.status_code(), StatusCode::CREATED);
    let body = response.json::<Value>();
    assert_eq!(body["cabin_id"], cabin_id.to_string());
    assert_eq!(body["psychologist_id"], ana.user_id.to_string());
    assert_eq!(body["end_time"], "10:00:00");
    assert_eq!(body["status"], "pending");
}

#[test_log::test(tokio::test)]
async fn test_double_booking_a_slot_conflicts() {
    let ctx = TestContext::new();
    let (_, (_, first), (_, second)) = shared_cabin(&ctx).await;
    let slot = json!({
        "client_name": "Jane Roe",
        "date": "2025-03-14",
        "start_time": "09:00:00",
        "end_time": "10:00:00",
    });

    assert_eq!(book(&ctx, &first, slot.clone()).await.status_code(), StatusCode::CREATED);

    let response = book(&ctx, &second, slot).await;
    assert_eq!(response.status_code(), StatusCode::CONFLICT);
    assert_eq!(
        response.json::<Value>()["error"],
        "Conflict: This time slot is already booked in this cabin"
    );
}

#[test_log::test(tokio::test)]
async fn test_unassigned_psychologist_cannot_book() {
    let ctx = TestContext::new();
    let (_, auth) = ctx.user(Role::Psychologist).await;

    let response = book(
        &ctx,
        &auth,
        json!({ "client_name": "Jane Roe", "date": "2025-03-14", "start_time": "09:00:00" }),
    )
    .await;

    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
}

#[test_log::test(tokio::test)]
async fn test_invalid_time_range_is_bad_request() {
    let ctx = TestContext::new();
    let (_, (_, auth), _) = shared_cabin(&ctx).await;

    let inverted = book(
        &ctx,
        &auth,
        json!({
            "client_name": "Jane Roe",
            "date": "2025-03-14",
            "start_time": "11:00:00",
            "end_time": "10:00:00",
        }),
    )
    .await;
    assert_eq!(inverted.status_code(), StatusCode::BAD_REQUEST);

    let near_midnight = book(
        &ctx,
        &auth,
        json!({ "client_name": "Jane Roe", "date": "2025-03-14", "start_time": "23:30:00" }),
    )
    .await;
    assert_eq!(near_midnight.status_code(), StatusCode::BAD_REQUEST);
}

#[test_log::test(tokio::test)]
async fn test_admin_cannot_book() {
    let ctx = TestContext::new();
    let (_, admin) = ctx.user(Role::Admin).await;

    let response = book(
        &ctx,
        &admin,
        json!({ "client_name": "Jane Roe", "date": "2025-03-14", "start_time": "09:00:00" }),
    )
    .await;

    assert_eq!(response.status_code(), StatusCode::FORBIDDEN);
}

#[test_log::test(tokio::test)]
async fn test_colleague_sees_but_cannot_change_appointment() {
    let ctx = TestContext::new();
    let (_, (_, owner), (_, colleague)) = shared_cabin(&ctx).await;
    let created = book(
        &ctx,
        &owner,
        json!({ "client_name": "Jane Roe", "date": "2025-03-14", "start_time": "09:00:00" }),
    )
    .await
    .json::<Value>();
    let url = format!("/api/appointments/{}", created["id"].as_str().unwrap());

    let response = ctx
        .server
        .get("/api/appointments")
        .add_header(colleague.0.clone(), colleague.1.clone())
        .await;
    assert_eq!(response.json::<Value>().as_array().unwrap().len(), 1);

    let response = ctx
        .server
        .get(&url)
        .add_header(colleague.0.clone(), colleague.1.clone())
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);

    let response = ctx
        .server
        .put(&url)
        .add_header(colleague.0.clone(), colleague.1.clone())
        .json(&json!({ "status": "cancelled" }))
        .await;
    assert_eq!(response.status_code(), StatusCode::FORBIDDEN);
    assert_eq!(
        response.json::<Value>()["error"],
        "Permission denied: You can only modify your own appointments"
    );

    let response = ctx
        .server
        .delete(&url)
        .add_header(colleague.0.clone(), colleague.1.clone())
        .await;
    assert_eq!(response.status_code(), StatusCode::FORBIDDEN);

    let response = ctx
        .server
        .get("/api/my-appointments")
        .add_header(colleague.0, colleague.1)
        .await;
    assert_eq!(response.json::<Value>(), json!([]));
}

#[test_log::test(tokio::test)]
async fn test_owner_updates_and_deletes_appointment() {
    let ctx = TestContext::new();
    let (_, (ana, owner), (other, _)) = shared_cabin(&ctx).await;
    let created = book(
        &ctx,
        &owner,
        json!({ "client_name": "Jane Roe", "date": "2025-03-14", "start_time": "09:00:00" }),
    )
    .await
    .json::<Value>();
    let url = format!("/api/appointments/{}", created["id"].as_str().unwrap());

    let response = ctx
        .server
        .put(&url)
        .add_header(owner.0.clone(), owner.1.clone())
        .json(&json!({
            "status": "confirmed",
            "notes": "first session",
            "psychologist_id": other.user_id,
        }))
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);
    let body = response.json::<Value>();
    assert_eq!(body["status"], "confirmed");
    assert_eq!(body["notes"], "first session");
    assert_eq!(body["psychologist_id"], ana.user_id.to_string());

    let response = ctx
        .server
        .put(&url)
        .add_header(owner.0.clone(), owner.1.clone())
        .json(&json!({ "notes": "" }))
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);
    let body = response.json::<Value>();
    assert_eq!(body["notes"], Value::Null);
    assert_eq!(body["status"], "confirmed");

    let response = ctx
        .server
        .put(&url)
        .add_header(owner.0.clone(), owner.1.clone())
        .json(&json!({ "status": "pending" }))
        .await;
    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);

    let response = ctx
        .server
        .delete(&url)
        .add_header(owner.0.clone(), owner.1.clone())
        .await;
    assert_eq!(response.status_code(), StatusCode::NO_CONTENT);

    let response = ctx
        .server
        .get(&url)
        .add_header(owner.0, owner.1)
        .await;
    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
}

#[test_log::test(tokio::test)]
async fn test_appointments_in_other_cabins_are_hidden() {
    let ctx = TestContext::new();
    let (_, (_, owner), _) = shared_cabin(&ctx).await;
    let (_, outsider) = ctx.user(Role::Psychologist).await;
    let created = book(
        &ctx,
        &owner,
        json!({ "client_name": "Jane Roe", "date": "2025-03-14", "start_time": "09:00:00" }),
    )
    .await
    .json::<Value>();

    let response = ctx
        .server
        .get(&format!("/api/appointments/{}", created["id"].as_str().unwrap()))
        .add_header(outsider.0.clone(), outsider.1.clone())
        .await;
    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);

    let response = ctx
        .server
        .get("/api/appointments")
        .add_header(outsider.0, outsider.1)
        .await;
    assert_eq!(response.json::<Value>(), json!([]));
}

#[test_log::test(tokio::test)]
async fn test_cabin_listing_is_ordered_by_date_and_time() {
    let ctx = TestContext::new();
    let (_, (_, auth), _) = shared_cabin(&ctx).await;

    for (date, start) in [("2025-03-15", "08:00:00"), ("2025-03-14", "14:00:00"), ("2025-03-14", "09:00:00")] {
        let response = book(
            &ctx,
            &auth,
            json!({ "client_name": "Jane Roe", "date": date, "start_time": start }),
        )
        .await;
        assert_eq!(response.status_code(), StatusCode::CREATED);
    }

    let response = ctx
        .server
        .get("/api/appointments")
        .add_header(auth.0, auth.1)
        .await;
    let slots: Vec<(String, String)> = response
        .json::<Vec<Value>>()
        .iter()
        .map(|a| {
            (
                a["date"].as_str().unwrap().to_string(),
                a["start_time"].as_str().unwrap().to_string(),
            )
        })
        .collect();

    assert_eq!(
        slots,
        vec![
            ("2025-03-14".to_string(), "09:00:00".to_string()),
            ("2025-03-14".to_string(), "14:00:00".to_string()),
            ("2025-03-15".to_string(), "08:00:00".to_string()),
        ]
    );
}

//! # Appointment Handlers
//!
//! Psychologist endpoints for booking in their assigned cabin.
//!
//! - `GET /api/appointments` lists everything booked in the caller's cabin;
//! - `GET /api/my-appointments` lists only what the caller booked;
//! - updates and deletes are limited to the appointment's owner and answer
//!   403 for colleagues' appointments.

use axum::{
    Json,
    extract::State,
    http::StatusCode,
};
use psychbook_core::{
    models::appointment::{Appointment, CreateAppointmentRequest, UpdateAppointmentRequest},
    services::scheduling,
};
use std::sync::Arc;
use uuid::Uuid;

use crate::{
    ApiState,
    middleware::{
        auth::PsychologistUser,
        error_handling::AppError,
        extract::{AppJson, AppPath},
    },
};

#[axum::debug_handler]
pub async fn list_appointments(
    State(state): State<Arc<ApiState>>,
    PsychologistUser(identity): PsychologistUser,
) -> Result<Json<Vec<Appointment>>, AppError> {
    let appointments = scheduling::list_cabin_appointments(state.store.as_ref(), &identity).await?;
    Ok(Json(appointments))
}

#[axum::debug_handler]
pub async fn list_my_appointments(
    State(state): State<Arc<ApiState>>,
    PsychologistUser(identity): PsychologistUser,
) -> Result<Json<Vec<Appointment>>, AppError> {
    let appointments = scheduling::list_own_appointments(state.store.as_ref(), &identity).await?;
    Ok(Json(appointments))
}

/// Books an appointment. Without `end_time` the slot lasts one hour.
///
/// # Errors
///
/// * `404` - the caller is not assigned to a cabin
/// * `400` - invalid client name or time range
/// * `409` - the slot is already booked in this cabin
#[axum::debug_handler]
pub async fn create_appointment(
    State(state): State<Arc<ApiState>>,
    PsychologistUser(identity): PsychologistUser,
    AppJson(payload): AppJson<CreateAppointmentRequest>,
) -> Result<(StatusCode, Json<Appointment>), AppError> {
    let appointment = scheduling::create_appointment(state.store.as_ref(), &identity, payload).await?;
    Ok((StatusCode::CREATED, Json(appointment)))
}

#[axum::debug_handler]
pub async fn get_appointment(
    State(state): State<Arc<ApiState>>,
    PsychologistUser(identity): PsychologistUser,
    AppPath(id): AppPath<Uuid>,
) -> Result<Json<Appointment>, AppError> {
    let appointment = scheduling::get_appointment(state.store.as_ref(), &identity, id).await?;
    Ok(Json(appointment))
}

#[axum::debug_handler]
pub async fn update_appointment(
    State(state): State<Arc<ApiState>>,
    PsychologistUser(identity): PsychologistUser,
    AppPath(id): AppPath<Uuid>,
    AppJson(payload): AppJson<UpdateAppointmentRequest>,
) -> Result<Json<Appointment>, AppError> {
    let appointment =
        scheduling::update_appointment(state.store.as_ref(), &identity, id, payload).await?;
    Ok(Json(appointment))
}

#[axum::debug_handler]
pub async fn delete_appointment(
    State(state): State<Arc<ApiState>>,
    PsychologistUser(identity): PsychologistUser,
    AppPath(id): AppPath<Uuid>,
) -> Result<StatusCode, AppError> {
    scheduling::delete_appointment(state.store.as_ref(), &identity, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

//! # Assignment Handlers
//!
//! Linking psychologists to cabins. A psychologist can only ever work in one
//! cabin: a repeat of the same pair answers 400, an attempt to add them to a
//! second cabin answers 409.

use axum::{
    Json,
    extract::State,
    http::StatusCode,
};
use psychbook_core::{
    models::cabin::{AssignPsychologistRequest, AssignedPsychologist, CabinPsychologist},
    services::resources,
};
use std::sync::Arc;
use uuid::Uuid;

use crate::{
    ApiState,
    middleware::{
        auth::AdminUser,
        error_handling::AppError,
        extract::{AppJson, AppPath},
    },
};

#[axum::debug_handler]
pub async fn list_assignments(
    State(state): State<Arc<ApiState>>,
    AdminUser(identity): AdminUser,
    AppPath(cabin_id): AppPath<Uuid>,
) -> Result<Json<Vec<AssignedPsychologist>>, AppError> {
    let psychologists = resources::list_assignments(state.store.as_ref(), &identity, cabin_id).await?;
    Ok(Json(psychologists))
}

#[axum::debug_handler]
pub async fn assign_psychologist(
    State(state): State<Arc<ApiState>>,
    AdminUser(identity): AdminUser,
    AppPath(cabin_id): AppPath<Uuid>,
    AppJson(payload): AppJson<AssignPsychologistRequest>,
) -> Result<(StatusCode, Json<CabinPsychologist>), AppError> {
    let assignment = resources::assign_psychologist(
        state.store.as_ref(),
        &identity,
        cabin_id,
        payload.psychologist_id,
    )
    .await?;
    Ok((StatusCode::CREATED, Json(assignment)))
}

#[axum::debug_handler]
pub async fn unassign_psychologist(
    State(state): State<Arc<ApiState>>,
    AdminUser(identity): AdminUser,
    AppPath((cabin_id, psychologist_id)): AppPath<(Uuid, Uuid)>,
) -> Result<StatusCode, AppError> {
    resources::unassign_psychologist(state.store.as_ref(), &identity, cabin_id, psychologist_id)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

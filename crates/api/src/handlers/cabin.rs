//! # Cabin Handlers
//!
//! Admin endpoints for the cabins they own. Cabins created by another admin
//! answer 404 exactly like cabins that do not exist.

use axum::{
    Json,
    extract::State,
    http::StatusCode,
};
use psychbook_core::{
    models::cabin::{Cabin, CabinDetail, CreateCabinRequest, UpdateCabinRequest},
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
pub async fn list_cabins(
    State(state): State<Arc<ApiState>>,
    AdminUser(identity): AdminUser,
) -> Result<Json<Vec<CabinDetail>>, AppError> {
    let cabins = resources::list_cabins(state.store.as_ref(), &identity).await?;
    Ok(Json(cabins))
}

#[axum::debug_handler]
pub async fn create_cabin(
    State(state): State<Arc<ApiState>>,
    AdminUser(identity): AdminUser,
    AppJson(payload): AppJson<CreateCabinRequest>,
) -> Result<(StatusCode, Json<Cabin>), AppError> {
    let cabin = resources::create_cabin(state.store.as_ref(), &identity, payload).await?;
    Ok((StatusCode::CREATED, Json(cabin)))
}

#[axum::debug_handler]
pub async fn get_cabin(
    State(state): State<Arc<ApiState>>,
    AdminUser(identity): AdminUser,
    AppPath(cabin_id): AppPath<Uuid>,
) -> Result<Json<CabinDetail>, AppError> {
    let cabin = resources::get_cabin(state.store.as_ref(), &identity, cabin_id).await?;
    Ok(Json(cabin))
}

#[axum::debug_handler]
pub async fn update_cabin(
    State(state): State<Arc<ApiState>>,
    AdminUser(identity): AdminUser,
    AppPath(cabin_id): AppPath<Uuid>,
    AppJson(payload): AppJson<UpdateCabinRequest>,
) -> Result<Json<Cabin>, AppError> {
    let cabin = resources::update_cabin(state.store.as_ref(), &identity, cabin_id, payload).await?;
    Ok(Json(cabin))
}

#[axum::debug_handler]
pub async fn delete_cabin(
    State(state): State<Arc<ApiState>>,
    AdminUser(identity): AdminUser,
    AppPath(cabin_id): AppPath<Uuid>,
) -> Result<StatusCode, AppError> {
    resources::delete_cabin(state.store.as_ref(), &identity, cabin_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

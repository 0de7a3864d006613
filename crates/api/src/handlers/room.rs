use axum::{
    Json,
    extract::State,
    http::StatusCode,
};
use psychbook_core::{
    models::cabin::{CreateRoomRequest, Room, UpdateRoomRequest},
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
pub async fn list_rooms(
    State(state): State<Arc<ApiState>>,
    AdminUser(identity): AdminUser,
    AppPath(cabin_id): AppPath<Uuid>,
) -> Result<Json<Vec<Room>>, AppError> {
    let rooms = resources::list_rooms(state.store.as_ref(), &identity, cabin_id).await?;
    Ok(Json(rooms))
}

#[axum::debug_handler]
pub async fn create_room(
    State(state): State<Arc<ApiState>>,
    AdminUser(identity): AdminUser,
    AppPath(cabin_id): AppPath<Uuid>,
    AppJson(payload): AppJson<CreateRoomRequest>,
) -> Result<(StatusCode, Json<Room>), AppError> {
    let room = resources::create_room(state.store.as_ref(), &identity, cabin_id, payload).await?;
    Ok((StatusCode::CREATED, Json(room)))
}

#[axum::debug_handler]
pub async fn get_room(
    State(state): State<Arc<ApiState>>,
    AdminUser(identity): AdminUser,
    AppPath((cabin_id, room_id)): AppPath<(Uuid, Uuid)>,
) -> Result<Json<Room>, AppError> {
    let room = resources::get_room(state.store.as_ref(), &identity, cabin_id, room_id).await?;
    Ok(Json(room))
}

#[axum::debug_handler]
pub async fn update_room(
    State(state): State<Arc<ApiState>>,
    AdminUser(identity): AdminUser,
    AppPath((cabin_id, room_id)): AppPath<(Uuid, Uuid)>,
    AppJson(payload): AppJson<UpdateRoomRequest>,
) -> Result<Json<Room>, AppError> {
    let room =
        resources::update_room(state.store.as_ref(), &identity, cabin_id, room_id, payload).await?;
    Ok(Json(room))
}

#[axum::debug_handler]
pub async fn delete_room(
    State(state): State<Arc<ApiState>>,
    AdminUser(identity): AdminUser,
    AppPath((cabin_id, room_id)): AppPath<(Uuid, Uuid)>,
) -> Result<StatusCode, AppError> {
    resources::delete_room(state.store.as_ref(), &identity, cabin_id, room_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

use axum::{
    Router,
    routing::{delete, get},
};
use std::sync::Arc;

use crate::{ApiState, handlers};

pub fn routes() -> Router<Arc<ApiState>> {
    Router::new()
        .route(
            "/api/cabins",
            get(handlers::cabin::list_cabins).post(handlers::cabin::create_cabin),
        )
        .route(
            "/api/cabins/:cabin_id",
            get(handlers::cabin::get_cabin)
                .put(handlers::cabin::update_cabin)
                .delete(handlers::cabin::delete_cabin),
        )
        .route(
            "/api/cabins/:cabin_id/rooms",
            get(handlers::room::list_rooms).post(handlers::room::create_room),
        )
        .route(
            "/api/cabins/:cabin_id/rooms/:room_id",
            get(handlers::room::get_room)
                .put(handlers::room::update_room)
                .delete(handlers::room::delete_room),
        )
        .route(
            "/api/cabins/:cabin_id/psychologists",
            get(handlers::assignment::list_assignments)
                .post(handlers::assignment::assign_psychologist),
        )
        .route(
            "/api/cabins/:cabin_id/psychologists/:psychologist_id",
            delete(handlers::assignment::unassign_psychologist),
        )
}

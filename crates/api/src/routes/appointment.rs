use axum::{Router, routing::get};
use std::sync::Arc;

use crate::{ApiState, handlers};

pub fn routes() -> Router<Arc<ApiState>> {
    Router::new()
        .route(
            "/api/appointments",
            get(handlers::appointment::list_appointments)
                .post(handlers::appointment::create_appointment),
        )
        .route(
            "/api/appointments/:id",
            get(handlers::appointment::get_appointment)
                .put(handlers::appointment::update_appointment)
                .delete(handlers::appointment::delete_appointment),
        )
        .route(
            "/api/my-appointments",
            get(handlers::appointment::list_my_appointments),
        )
}

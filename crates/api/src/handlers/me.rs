use axum::{Json, extract::State};
use psychbook_core::{models::user::MeResponse, services::resources};
use std::sync::Arc;

use crate::{
    ApiState,
    middleware::{auth::CurrentUser, error_handling::AppError},
};

/// Echoes the caller's identity, plus the cabin they work in for psychologists.
#[axum::debug_handler]
pub async fn me(
    State(state): State<Arc<ApiState>>,
    CurrentUser(identity): CurrentUser,
) -> Result<Json<MeResponse>, AppError> {
    let cabin_id = resources::assigned_cabin(state.store.as_ref(), &identity).await?;

    Ok(Json(MeResponse {
        id: identity.user_id,
        email: identity.email,
        role: identity.role,
        is_active: identity.is_active,
        cabin_id,
    }))
}

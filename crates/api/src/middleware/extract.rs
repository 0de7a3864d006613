//! # Request Extractors
//!
//! Wrappers around axum's `Json` and `Path` whose rejections go through
//! [`AppError`], so a malformed body or path segment answers 400 with the
//! same `{"error": ...}` body as every other failure.

use axum::{
    Json, async_trait,
    extract::{FromRequest, FromRequestParts, Path, Request},
    http::request::Parts,
};
use psychbook_core::errors::BookingError;
use serde::de::DeserializeOwned;

use crate::middleware::error_handling::AppError;

/// JSON request body.
#[derive(Debug, Clone)]
pub struct AppJson<T>(pub T);

#[async_trait]
impl<T, S> FromRequest<S> for AppJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(AppJson(value)),
            Err(rejection) => {
                tracing::debug!("Rejected request body: {}", rejection.body_text());
                Err(BookingError::Validation(rejection.body_text()).into())
            }
        }
    }
}

/// URL path parameters.
#[derive(Debug, Clone)]
pub struct AppPath<T>(pub T);

#[async_trait]
impl<T, S> FromRequestParts<S> for AppPath<T>
where
    T: DeserializeOwned + Send,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        Path::<T>::from_request_parts(parts, state)
            .await
            .map(|Path(value)| AppPath(value))
            .map_err(|rejection| BookingError::Validation(rejection.body_text()).into())
    }
}

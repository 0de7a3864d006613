//! # Error Handling Middleware
//!
//! Maps [`BookingError`] variants to HTTP status codes and JSON error bodies
//! so every endpoint reports failures the same way.
//!
//! | error | status |
//! |---|---|
//! | `NotFound` | 404 |
//! | `Validation` | 400 |
//! | `Conflict` | 409 |
//! | `Authentication` | 401 |
//! | `Authorization`, `PermissionDenied` | 403 |
//! | `Database`, `Internal` | 500 |

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use psychbook_core::errors::BookingError;
use serde_json::json;

/// Application error wrapper that provides HTTP status code mapping
///
/// # Example
///
/// ```
/// use psychbook_api::middleware::error_handling::AppError;
/// use psychbook_core::errors::BookingError;
///
/// fn lookup(found: bool) -> Result<&'static str, AppError> {
///     if !found {
///         return Err(BookingError::NotFound("Cabin not found".to_string()).into());
///     }
///     Ok("cabin")
/// }
/// # fn main() { assert!(lookup(false).is_err()); }
/// ```
#[derive(Debug)]
pub struct AppError(pub BookingError);

impl AppError {
    pub fn status(&self) -> StatusCode {
        match &self.0 {
            BookingError::NotFound(_) => StatusCode::NOT_FOUND,
            BookingError::Validation(_) => StatusCode::BAD_REQUEST,
            BookingError::Conflict(_) => StatusCode::CONFLICT,
            BookingError::Authentication(_) => StatusCode::UNAUTHORIZED,
            BookingError::Authorization(_) => StatusCode::FORBIDDEN,
            BookingError::PermissionDenied(_) => StatusCode::FORBIDDEN,
            BookingError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
            BookingError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();

        // Storage details stay in the logs
        let message = if status.is_server_error() {
            tracing::error!("Request failed: {:?}", self.0);
            "Internal server error".to_string()
        } else {
            self.0.to_string()
        };

        let body = Json(json!({ "error": message }));
        (status, body).into_response()
    }
}

/// Allows `?` on `BookingResult` inside handlers.
impl From<BookingError> for AppError {
    fn from(err: BookingError) -> Self {
        AppError(err)
    }
}

//! Unauthenticated liveness and build information for the booking service.

use std::sync::Arc;

use axum::{Json, Router, routing::get};
use serde::Serialize;

use crate::ApiState;

const SERVICE_NAME: &str = "psychbook";

#[derive(Debug, Serialize)]
struct ServiceStatus {
    service: &'static str,
    status: &'static str,
    version: &'static str,
}

#[derive(Debug, Serialize)]
struct BuildInfo {
    service: &'static str,
    version: &'static str,
}

/// Answers as long as the process is serving requests. Storage is not consulted.
async fn liveness() -> Json<ServiceStatus> {
    Json(ServiceStatus {
        service: SERVICE_NAME,
        status: "up",
        version: env!("CARGO_PKG_VERSION"),
    })
}

async fn build_info() -> Json<BuildInfo> {
    Json(BuildInfo {
        service: SERVICE_NAME,
        version: env!("CARGO_PKG_VERSION"),
    })
}

pub fn routes() -> Router<Arc<ApiState>> {
    Router::new()
        .route("/health", get(liveness))
        .route("/version", get(build_info))
}

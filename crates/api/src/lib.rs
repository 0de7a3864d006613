//! # Psychbook API
//!
//! The API crate provides the web server for the cabin booking service. It
//! exposes REST endpoints for cabins, rooms, psychologist assignments and
//! appointments.
//!
//! ## Architecture
//!
//! This crate follows a layered architecture:
//!
//! - **Routes**: Define API endpoints and URL structure
//! - **Handlers**: Extract the caller and payload, delegate to the services in
//!   `psychbook_core`
//! - **Middleware**: Token authentication and error-to-HTTP mapping
//! - **Config**: Handle environment and application configuration
//!
//! The API uses Axum as the web framework. Storage is reached through the
//! `Store` trait, backed by PostgreSQL in production.

/// Configuration module for API settings
pub mod config;
/// Request handlers for each resource
pub mod handlers;
/// Middleware for authentication and error handling
pub mod middleware;
/// Route definitions and API endpoint structure
pub mod routes;

use std::{sync::Arc, time::Duration};

use axum::{
    Router,
    http::{HeaderValue, Method, header},
};
use eyre::Result;
use psychbook_core::repository::Store;
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, timeout::TimeoutLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::FmtSubscriber;

use crate::middleware::auth::JwtConfig;

/// Shared application state that is accessible to all request handlers
pub struct ApiState {
    /// Storage backend for every repository operation
    pub store: Arc<dyn Store>,
    /// Settings used to verify bearer tokens
    pub jwt: JwtConfig,
}

impl ApiState {
    pub fn new(store: Arc<dyn Store>, jwt: JwtConfig) -> Self {
        Self { store, jwt }
    }
}

/// Builds the router with every endpoint and request tracing attached.
pub fn app(state: Arc<ApiState>) -> Router {
    Router::new()
        // Health check endpoints
        .merge(routes::health::routes())
        // Caller identity
        .merge(routes::me::routes())
        // Cabin, room and assignment endpoints
        .merge(routes::cabin::routes())
        // Appointment endpoints
        .merge(routes::appointment::routes())
        // Attach shared state to all routes
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    let allowed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match origin.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                warn!("Ignoring invalid CORS origin: {}", origin);
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION, header::ACCEPT])
        .allow_origin(allowed)
        .allow_credentials(true)
}

/// Starts the API server with the provided configuration and store
///
/// Sets up logging, builds the router and serves until the process stops.
///
/// # Example
///
/// ```rust,ignore
/// let config = ApiConfig::from_env()?;
/// let pool = psychbook_db::create_pool(&config.database_url, config.database_max_connections).await?;
/// start_server(config, Arc::new(PgStore::new(pool))).await?;
/// ```
pub async fn start_server(config: config::ApiConfig, store: Arc<dyn Store>) -> Result<()> {
    // Initialize tracing for logging
    let subscriber = FmtSubscriber::builder()
        .with_max_level(config.log_level)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let state = Arc::new(ApiState::new(store, JwtConfig::new(config.jwt_secret.clone())));

    let app = app(state);

    // Apply CORS configuration if origins are specified
    let app = match &config.cors_origins {
        Some(origins) => app.layer(cors_layer(origins)),
        None => app,
    };

    // Add request timeout middleware
    let app = app.layer(
        ServiceBuilder::new().layer(TimeoutLayer::new(Duration::from_secs(config.request_timeout))),
    );

    // Start the HTTP server
    let addr = config.server_addr();
    let listener = TcpListener::bind(&addr).await?;
    info!("Server listening on http://{}", addr);
    axum::serve(listener, app).await?;

    Ok(())
}

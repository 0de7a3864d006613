//! # Authentication Module
//!
//! Verifies HS256 bearer tokens issued by the identity provider and turns
//! their claims into an [`Identity`]. Handlers receive the caller through the
//! [`CurrentUser`] extractor; role and ownership checks happen later in the
//! service layer.

use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts},
};
use chrono::{Duration, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use psychbook_core::{
    errors::BookingError,
    models::user::{Identity, Role},
    policy::{self, Capability},
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::{ApiState, middleware::error_handling::AppError};

/// Token claims understood by the API
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// User ID
    pub sub: Uuid,
    pub email: String,
    pub role: Role,
    #[serde(default = "default_active")]
    pub active: bool,
    /// Expiration time (Unix timestamp)
    pub exp: usize,
    pub iat: Option<usize>,
}

fn default_active() -> bool {
    true
}

impl From<Claims> for Identity {
    fn from(claims: Claims) -> Self {
        Identity {
            user_id: claims.sub,
            email: claims.email,
            role: claims.role,
            is_active: claims.active,
        }
    }
}

#[derive(Clone)]
pub struct JwtConfig {
    pub secret: String,
    pub algorithm: Algorithm,
}

impl JwtConfig {
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
            algorithm: Algorithm::HS256,
        }
    }
}

/// Verifies a token's signature and expiry and returns its claims
pub fn verify_token(token: &str, config: &JwtConfig) -> Result<Claims, BookingError> {
    let mut validation = Validation::new(config.algorithm);
    validation.validate_exp = true;

    let decoding_key = DecodingKey::from_secret(config.secret.as_bytes());
    decode::<Claims>(token, &decoding_key, &validation)
        .map(|data| data.claims)
        .map_err(|e| {
            warn!("JWT validation failed: {}", e);
            BookingError::Authentication(format!("Invalid token: {}", e))
        })
}

/// Signs a token for `identity` that expires after `ttl`.
pub fn issue_token(identity: &Identity, config: &JwtConfig, ttl: Duration) -> Result<String, BookingError> {
    let now = Utc::now();
    let claims = Claims {
        sub: identity.user_id,
        email: identity.email.clone(),
        role: identity.role,
        active: identity.is_active,
        exp: (now + ttl).timestamp() as usize,
        iat: Some(now.timestamp() as usize),
    };

    encode(
        &Header::new(config.algorithm),
        &claims,
        &EncodingKey::from_secret(config.secret.as_bytes()),
    )
    .map_err(|e| BookingError::Internal(Box::new(e)))
}

/// The authenticated caller of a request.
///
/// Rejects with 401 when the `Authorization` header is missing or not a
/// bearer token, when the token is invalid or expired, and when it belongs to
/// an inactive account.
#[derive(Debug, Clone)]
pub struct CurrentUser(pub Identity);

#[async_trait]
impl FromRequestParts<Arc<ApiState>> for CurrentUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<ApiState>,
    ) -> Result<Self, Self::Rejection> {
        let header = parts.headers.get(AUTHORIZATION).ok_or_else(|| {
            debug!("No Authorization header present");
            BookingError::Authentication("Missing authorization header".to_string())
        })?;

        let token = header
            .to_str()
            .ok()
            .and_then(|value| value.strip_prefix("Bearer "))
            .ok_or_else(|| {
                BookingError::Authentication(
                    "Authorization header must use the Bearer scheme".to_string(),
                )
            })?;

        let claims = verify_token(token, &state.jwt)?;
        if !claims.active {
            warn!("Rejected token for inactive user {}", claims.sub);
            return Err(BookingError::Authentication("Account is inactive".to_string()).into());
        }
        debug!("Authenticated user {} with role {}", claims.sub, claims.role);
        Ok(CurrentUser(claims.into()))
    }
}

/// An authenticated caller holding the admin role.
///
/// The role gate runs while extracting request parts, before any body is
/// read, so a wrong-role caller gets 403 whatever the payload looks like.
#[derive(Debug, Clone)]
pub struct AdminUser(pub Identity);

/// An authenticated caller holding the psychologist role.
#[derive(Debug, Clone)]
pub struct PsychologistUser(pub Identity);

async fn caller_with(
    parts: &mut Parts,
    state: &Arc<ApiState>,
    capability: Capability,
) -> Result<Identity, AppError> {
    let CurrentUser(identity) = CurrentUser::from_request_parts(parts, state).await?;
    policy::authorize(&identity, capability)?;
    Ok(identity)
}

#[async_trait]
impl FromRequestParts<Arc<ApiState>> for AdminUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<ApiState>,
    ) -> Result<Self, Self::Rejection> {
        caller_with(parts, state, Capability::ManageCabins)
            .await
            .map(AdminUser)
    }
}

#[async_trait]
impl FromRequestParts<Arc<ApiState>> for PsychologistUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<ApiState>,
    ) -> Result<Self, Self::Rejection> {
        caller_with(parts, state, Capability::ManageAppointments)
            .await
            .map(PsychologistUser)
    }
}

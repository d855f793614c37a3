//! # API Handlers
//!
//! This module contains all the HTTP endpoint handlers for the Roster API.

use axum::{extract::State, response::Json};

use crate::db;
use crate::error::ApiError;
use crate::models::ServiceInfo;
use crate::server::AppState;
use types::HealthResponse;

pub mod companies;
pub mod resource;
pub mod types;
pub mod users;

/// Root handler that returns basic service information
#[utoipa::path(
    get,
    path = "/",
    responses(
        (status = 200, description = "Service information", body = ServiceInfo)
    ),
    tag = "root"
)]
pub async fn root() -> Json<ServiceInfo> {
    Json(ServiceInfo::default())
}

/// Liveness probe; never touches the database
#[utoipa::path(
    get,
    path = "/healthz",
    responses(
        (status = 200, description = "Process is alive", body = HealthResponse)
    ),
    tag = "operations"
)]
pub async fn healthz() -> Json<HealthResponse> {
    Json(HealthResponse::new("ok"))
}

/// Readiness probe backed by a trivial database query
#[utoipa::path(
    get,
    path = "/readyz",
    responses(
        (status = 200, description = "Database reachable", body = HealthResponse),
        (status = 503, description = "Database unavailable", body = ApiError)
    ),
    tag = "operations"
)]
pub async fn readyz(State(state): State<AppState>) -> Result<Json<HealthResponse>, ApiError> {
    match db::health_check(&state.db).await {
        Ok(()) => Ok(Json(HealthResponse::new("ready"))),
        Err(err) => {
            tracing::warn!(error = %err, "readiness check failed");
            Err(ApiError::service_unavailable())
        }
    }
}

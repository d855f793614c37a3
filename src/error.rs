//! # Error Handling
//!
//! This module provides the error types shared by the repository and handler
//! layers. Repository outcomes are typed ([`RepositoryError`]); only
//! [`ApiError`] knows about HTTP status codes and response bodies.

use axum::{
    extract::rejection::JsonRejection,
    http::{HeaderMap, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;
use utoipa::ToSchema;

use crate::telemetry;

/// Header carrying the request correlation id.
pub const TRACE_ID_HEADER: &str = "x-trace-id";

/// Error response returned to API clients.
///
/// Only the `error` message is serialized; the status code becomes the
/// response status and the trace id travels in the `x-trace-id` header.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ApiError {
    /// HTTP status code for the response
    #[serde(skip)]
    pub status: StatusCode,
    /// Error code for programmatic handling and logs
    #[serde(skip)]
    pub code: Box<str>,
    /// Human-readable error message
    #[schema(example = "User not found")]
    pub error: Box<str>,
    /// Correlation trace ID for debugging
    #[serde(skip)]
    pub trace_id: Option<Box<str>>,
}

impl ApiError {
    /// Create a new API error with the given status code, code and message
    pub fn new<S: Into<String>>(status: StatusCode, code: S, message: S) -> Self {
        Self {
            status,
            code: code.into().into_boxed_str(),
            error: message.into().into_boxed_str(),
            trace_id: Self::current_trace_id(),
        }
    }

    /// 404 carrying the fixed "<Entity> not found" message
    pub fn not_found(entity: &str) -> Self {
        Self::new(
            StatusCode::NOT_FOUND,
            "NOT_FOUND".to_string(),
            format!("{entity} not found"),
        )
    }

    /// 400 carrying the decoder's message verbatim
    pub fn bad_request<S: Into<String>>(message: S) -> Self {
        Self::new(
            StatusCode::BAD_REQUEST,
            "VALIDATION_FAILED".to_string(),
            message.into(),
        )
    }

    /// 503 used when the database cannot be reached
    pub fn service_unavailable() -> Self {
        Self::new(
            StatusCode::SERVICE_UNAVAILABLE,
            "SERVICE_UNAVAILABLE",
            "Database service unavailable",
        )
    }

    /// Extract current trace ID from the request scope (falls back to a generated correlation ID)
    fn current_trace_id() -> Option<Box<str>> {
        telemetry::current_trace_id()
            .map(|trace_id| trace_id.into_boxed_str())
            .or_else(|| {
                let generated = uuid::Uuid::new_v4().simple().to_string();
                Some(format!("corr-{}", &generated[..8]).into_boxed_str())
            })
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let mut headers = HeaderMap::new();
        if let Some(trace_id) = self.trace_id.as_deref()
            && let Ok(value) = HeaderValue::from_str(trace_id)
        {
            headers.insert(TRACE_ID_HEADER, value);
        }

        (self.status, headers, axum::Json(self)).into_response()
    }
}

/// Typed outcomes of repository operations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// The row never existed or has been logically deleted.
    #[error("{entity} not found")]
    NotFound { entity: &'static str },
    /// The store rejected or could not execute the operation.
    #[error("database error: {0}")]
    Database(sea_orm::DbErr),
}

impl RepositoryError {
    pub fn not_found(entity: &'static str) -> Self {
        Self::NotFound { entity }
    }

    pub fn database_error(error: sea_orm::DbErr) -> Self {
        Self::Database(error)
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

impl From<RepositoryError> for ApiError {
    fn from(error: RepositoryError) -> Self {
        match error {
            RepositoryError::NotFound { entity } => Self::not_found(entity),
            RepositoryError::Database(db_err) => db_err.into(),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::bad_request(rejection.body_text())
    }
}

impl From<sea_orm::DbErr> for ApiError {
    fn from(error: sea_orm::DbErr) -> Self {
        match error {
            sea_orm::DbErr::Conn(connection_err) => {
                tracing::error!("Database connection error: {:?}", connection_err);
                Self::service_unavailable()
            }
            sea_orm::DbErr::ConnectionAcquire(acquire_err) => {
                tracing::error!("Database connection acquire error: {:?}", acquire_err);
                Self::service_unavailable()
            }
            _ => {
                tracing::error!("Database error: {:?}", error);
                Self::new(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_SERVER_ERROR",
                    "Database error occurred",
                )
            }
        }
    }
}

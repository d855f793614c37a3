//! # Companies API Handlers

use axum::{
    Json,
    extract::{
        Path, State,
        rejection::{JsonRejection, PathRejection},
    },
};

use crate::error::ApiError;
use crate::handlers::{resource, types::MessageResponse};
use crate::models::{Company, CompanyFields, CompanyPatch, Record, company};
use crate::server::AppState;

/// Create a company
#[utoipa::path(
    post,
    path = "/companies",
    request_body = CompanyFields,
    responses(
        (status = 200, description = "Company created", body = Record<CompanyFields>),
        (status = 400, description = "Request body could not be decoded", body = ApiError),
        (status = 500, description = "Database error", body = ApiError),
        (status = 503, description = "Database unavailable", body = ApiError)
    ),
    tag = "companies"
)]
pub async fn create_company(
    State(state): State<AppState>,
    body: Result<Json<CompanyFields>, JsonRejection>,
) -> Result<Json<Company>, ApiError> {
    resource::create::<company::Entity>(&state.db, body).await
}

/// Get a company by id
#[utoipa::path(
    get,
    path = "/companies/{id}",
    params(("id" = i32, Path, description = "Company id")),
    responses(
        (status = 200, description = "Company found", body = Record<CompanyFields>),
        (status = 404, description = "Company not found", body = ApiError),
        (status = 500, description = "Database error", body = ApiError)
    ),
    tag = "companies"
)]
pub async fn get_company(
    State(state): State<AppState>,
    path: Result<Path<i32>, PathRejection>,
) -> Result<Json<Company>, ApiError> {
    resource::fetch::<company::Entity>(&state.db, path).await
}

/// Partially update a company
///
/// Keys omitted from the body keep their stored values.
#[utoipa::path(
    put,
    path = "/companies/{id}",
    params(("id" = i32, Path, description = "Company id")),
    request_body = CompanyPatch,
    responses(
        (status = 200, description = "Company updated", body = Record<CompanyFields>),
        (status = 400, description = "Request body could not be decoded", body = ApiError),
        (status = 404, description = "Company not found", body = ApiError),
        (status = 500, description = "Database error", body = ApiError)
    ),
    tag = "companies"
)]
pub async fn update_company(
    State(state): State<AppState>,
    path: Result<Path<i32>, PathRejection>,
    body: Result<Json<CompanyPatch>, JsonRejection>,
) -> Result<Json<Company>, ApiError> {
    resource::update::<company::Entity>(&state.db, path, body).await
}

/// Delete a company
#[utoipa::path(
    delete,
    path = "/companies/{id}",
    params(("id" = i32, Path, description = "Company id")),
    responses(
        (status = 200, description = "Company deleted", body = MessageResponse),
        (status = 404, description = "Company not found", body = ApiError),
        (status = 500, description = "Database error", body = ApiError)
    ),
    tag = "companies"
)]
pub async fn delete_company(
    State(state): State<AppState>,
    path: Result<Path<i32>, PathRejection>,
) -> Result<Json<MessageResponse>, ApiError> {
    resource::remove::<company::Entity>(&state.db, path).await
}

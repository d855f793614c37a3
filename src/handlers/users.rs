//! # Users API Handlers

use axum::{
    Json,
    extract::{
        Path, State,
        rejection::{JsonRejection, PathRejection},
    },
};

use crate::error::ApiError;
use crate::handlers::{resource, types::MessageResponse};
use crate::models::{Record, User, UserFields, UserPatch, user};
use crate::server::AppState;

/// Create a user
#[utoipa::path(
    post,
    path = "/users",
    request_body = UserFields,
    responses(
        (status = 200, description = "User created", body = Record<UserFields>),
        (status = 400, description = "Request body could not be decoded", body = ApiError),
        (status = 500, description = "Database error", body = ApiError),
        (status = 503, description = "Database unavailable", body = ApiError)
    ),
    tag = "users"
)]
pub async fn create_user(
    State(state): State<AppState>,
    body: Result<Json<UserFields>, JsonRejection>,
) -> Result<Json<User>, ApiError> {
    resource::create::<user::Entity>(&state.db, body).await
}

/// Get a user by id
#[utoipa::path(
    get,
    path = "/users/{id}",
    params(("id" = i32, Path, description = "User id")),
    responses(
        (status = 200, description = "User found", body = Record<UserFields>),
        (status = 404, description = "User not found", body = ApiError),
        (status = 500, description = "Database error", body = ApiError)
    ),
    tag = "users"
)]
pub async fn get_user(
    State(state): State<AppState>,
    path: Result<Path<i32>, PathRejection>,
) -> Result<Json<User>, ApiError> {
    resource::fetch::<user::Entity>(&state.db, path).await
}

/// Partially update a user
///
/// Keys omitted from the body keep their stored values.
#[utoipa::path(
    put,
    path = "/users/{id}",
    params(("id" = i32, Path, description = "User id")),
    request_body = UserPatch,
    responses(
        (status = 200, description = "User updated", body = Record<UserFields>),
        (status = 400, description = "Request body could not be decoded", body = ApiError),
        (status = 404, description = "User not found", body = ApiError),
        (status = 500, description = "Database error", body = ApiError)
    ),
    tag = "users"
)]
pub async fn update_user(
    State(state): State<AppState>,
    path: Result<Path<i32>, PathRejection>,
    body: Result<Json<UserPatch>, JsonRejection>,
) -> Result<Json<User>, ApiError> {
    resource::update::<user::Entity>(&state.db, path, body).await
}

/// Delete a user
#[utoipa::path(
    delete,
    path = "/users/{id}",
    params(("id" = i32, Path, description = "User id")),
    responses(
        (status = 200, description = "User deleted", body = MessageResponse),
        (status = 404, description = "User not found", body = ApiError),
        (status = 500, description = "Database error", body = ApiError)
    ),
    tag = "users"
)]
pub async fn delete_user(
    State(state): State<AppState>,
    path: Result<Path<i32>, PathRejection>,
) -> Result<Json<MessageResponse>, ApiError> {
    resource::remove::<user::Entity>(&state.db, path).await
}

//! # Resource Handlers
//!
//! Entity-agnostic request handling shared by every CRUD route. Each entity
//! module wraps these with its own route documentation.
//!
//! Only this layer turns repository outcomes into HTTP responses.

use axum::{
    Json,
    extract::{
        Path,
        rejection::{JsonRejection, PathRejection},
    },
};
use sea_orm::{DatabaseConnection, IntoActiveModel};
use tracing::{debug, info};

use crate::error::ApiError;
use crate::handlers::types::MessageResponse;
use crate::models::{Record, SoftDeletable};
use crate::repositories::ResourceRepository;

/// Path ids that fail to decode name no record, so they are reported as
/// not found rather than as a bad request.
fn resource_id<E: SoftDeletable>(path: Result<Path<i32>, PathRejection>) -> Result<i32, ApiError> {
    match path {
        Ok(Path(id)) => Ok(id),
        Err(rejection) => {
            debug!(entity = E::LABEL, error = %rejection, "undecodable resource id");
            Err(ApiError::not_found(E::LABEL))
        }
    }
}

pub async fn create<E>(
    db: &DatabaseConnection,
    body: Result<Json<E::Fields>, JsonRejection>,
) -> Result<Json<Record<E::Fields>>, ApiError>
where
    E: SoftDeletable,
    E::Model: IntoActiveModel<E::Active>,
{
    let Json(fields) = body?;

    let record = ResourceRepository::<E>::new(db).create(fields).await?;
    info!(entity = E::LABEL, id = record.id, "created");

    Ok(Json(record))
}

pub async fn fetch<E>(
    db: &DatabaseConnection,
    path: Result<Path<i32>, PathRejection>,
) -> Result<Json<Record<E::Fields>>, ApiError>
where
    E: SoftDeletable,
    E::Model: IntoActiveModel<E::Active>,
{
    let id = resource_id::<E>(path)?;

    let record = ResourceRepository::<E>::new(db).fetch(id).await?;

    Ok(Json(record))
}

/// Existence is checked before the body is decoded, so an unknown id is a
/// 404 even when the body is malformed.
pub async fn update<E>(
    db: &DatabaseConnection,
    path: Result<Path<i32>, PathRejection>,
    body: Result<Json<E::Patch>, JsonRejection>,
) -> Result<Json<Record<E::Fields>>, ApiError>
where
    E: SoftDeletable,
    E::Model: IntoActiveModel<E::Active>,
{
    let id = resource_id::<E>(path)?;
    let repo = ResourceRepository::<E>::new(db);

    repo.fetch(id).await?;
    let Json(patch) = body?;

    let record = repo.update(id, patch).await?;
    info!(entity = E::LABEL, id, "updated");

    Ok(Json(record))
}

pub async fn remove<E>(
    db: &DatabaseConnection,
    path: Result<Path<i32>, PathRejection>,
) -> Result<Json<MessageResponse>, ApiError>
where
    E: SoftDeletable,
    E::Model: IntoActiveModel<E::Active>,
{
    let id = resource_id::<E>(path)?;

    ResourceRepository::<E>::new(db).remove(id).await?;
    info!(entity = E::LABEL, id, "deleted");

    Ok(Json(MessageResponse::new(format!("{} deleted", E::LABEL))))
}

//! Startup schema synchronization.
//!
//! Runs the additive migration engine over every registered entity, in
//! registration order, stopping at the first failure.

use migration::{EnsureOutcome, ensure_entity};
use sea_orm::{DatabaseConnection, DbErr, EntityName};
use thiserror::Error;
use tracing::info;

use crate::models::{company, user};

/// A table the registry keeps in sync with storage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegisteredEntity {
    User,
    Company,
}

impl RegisteredEntity {
    pub fn label(&self) -> &'static str {
        match self {
            RegisteredEntity::User => "User",
            RegisteredEntity::Company => "Company",
        }
    }

    pub fn table_name(&self) -> String {
        match self {
            RegisteredEntity::User => user::Entity.table_name().to_string(),
            RegisteredEntity::Company => company::Entity.table_name().to_string(),
        }
    }

    async fn ensure(&self, db: &DatabaseConnection) -> Result<EnsureOutcome, DbErr> {
        match self {
            RegisteredEntity::User => ensure_entity(db, user::Entity).await,
            RegisteredEntity::Company => ensure_entity(db, company::Entity).await,
        }
    }
}

/// Every persisted entity, in the order tables are synchronized.
pub fn registered_entities() -> &'static [RegisteredEntity] {
    &[RegisteredEntity::User, RegisteredEntity::Company]
}

/// Result of synchronizing one entity's table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncReport {
    pub entity: &'static str,
    pub table: String,
    pub outcome: EnsureOutcome,
}

#[derive(Debug, Error)]
#[error("failed to synchronize table '{table}': {source}")]
pub struct SchemaSyncError {
    pub table: String,
    #[source]
    pub source: DbErr,
}

/// Brings storage in line with every registered entity.
pub async fn sync_all(db: &DatabaseConnection) -> Result<Vec<SyncReport>, SchemaSyncError> {
    let mut reports = Vec::with_capacity(registered_entities().len());

    for entity in registered_entities() {
        let table = entity.table_name();
        let outcome = entity
            .ensure(db)
            .await
            .map_err(|source| SchemaSyncError {
                table: table.clone(),
                source,
            })?;

        info!(entity = entity.label(), table = %table, outcome = %outcome, "schema synchronized");
        reports.push(SyncReport {
            entity: entity.label(),
            table,
            outcome,
        });
    }

    Ok(reports)
}

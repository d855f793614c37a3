//! Additive, idempotent table reconciliation.

use std::fmt;

use sea_orm_migration::prelude::*;
use sea_orm_migration::sea_orm::{
    ConnectionTrait, DatabaseConnection, EntityName, EntityTrait, Schema,
};
use tracing::{debug, info};

/// What [`ensure_table`] had to do to bring storage in line with a declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EnsureOutcome {
    /// The table did not exist and was created from the declaration.
    Created,
    /// The table existed but lacked the listed columns, which were added.
    Extended { added: Vec<String> },
    /// Storage already matched; no DDL was issued.
    Unchanged,
}

impl EnsureOutcome {
    /// Returns true when no DDL statement was executed.
    pub fn is_unchanged(&self) -> bool {
        matches!(self, EnsureOutcome::Unchanged)
    }
}

impl fmt::Display for EnsureOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EnsureOutcome::Created => write!(f, "created"),
            EnsureOutcome::Extended { added } => write!(f, "added columns [{}]", added.join(", ")),
            EnsureOutcome::Unchanged => write!(f, "unchanged"),
        }
    }
}

/// Reconciles `table` with `declaration`.
///
/// Creates the table when it is missing, otherwise adds every declared
/// column the table lacks. Columns present in storage but absent from the
/// declaration are left untouched.
pub async fn ensure_table(
    manager: &SchemaManager<'_>,
    table: &str,
    declaration: &TableCreateStatement,
) -> Result<EnsureOutcome, DbErr> {
    if !manager.has_table(table).await? {
        let mut create = declaration.clone();
        create.if_not_exists();
        manager.create_table(create).await?;
        info!(table, "created table");
        return Ok(EnsureOutcome::Created);
    }

    let mut added = Vec::new();
    for column in declaration.get_columns() {
        let name = column.get_column_name();
        if manager.has_column(table, &name).await? {
            continue;
        }

        let mut column = column.clone();
        manager
            .alter_table(
                Table::alter()
                    .table(Alias::new(table))
                    .add_column(&mut column)
                    .to_owned(),
            )
            .await?;
        info!(table, column = %name, "added column");
        added.push(name);
    }

    if added.is_empty() {
        debug!(table, "schema already up to date");
        Ok(EnsureOutcome::Unchanged)
    } else {
        Ok(EnsureOutcome::Extended { added })
    }
}

/// Derives the table declaration from a SeaORM entity and reconciles it.
pub async fn ensure_entity<E>(db: &DatabaseConnection, entity: E) -> Result<EnsureOutcome, DbErr>
where
    E: EntityTrait,
{
    let declaration = Schema::new(db.get_database_backend()).create_table_from_entity(entity);
    let manager = SchemaManager::new(db);
    ensure_table(&manager, entity.table_name(), &declaration).await
}

//! # Resource Repository
//!
//! Create, fetch, update and soft-delete for any entity implementing
//! [`SoftDeletable`]. Logically deleted rows are invisible to every
//! operation here.

use std::marker::PhantomData;

use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DatabaseTransaction, IntoActiveModel,
    QueryFilter, QuerySelect, Select, TransactionTrait, Value,
};

use crate::error::RepositoryError;
use crate::models::record::{self, Record, SoftDeletable};

/// Repository for one soft-deletable entity type
pub struct ResourceRepository<'a, E> {
    db: &'a DatabaseConnection,
    _entity: PhantomData<E>,
}

impl<'a, E> ResourceRepository<'a, E>
where
    E: SoftDeletable,
    E::Model: IntoActiveModel<E::Active>,
{
    /// Create a new repository over the given database connection
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self {
            db,
            _entity: PhantomData,
        }
    }

    /// Insert a new record, assigning identity and both timestamps.
    pub async fn create(&self, fields: E::Fields) -> Result<Record<E::Fields>, RepositoryError> {
        let now = record::now();
        let mut active = E::new_active(fields);
        active.set(E::created_at_column(), Value::from(now));
        active.set(E::updated_at_column(), Value::from(now));
        active.set(E::deleted_at_column(), Value::from(None::<chrono::DateTime<chrono::Utc>>));

        let model = active
            .insert(self.db)
            .await
            .map_err(RepositoryError::database_error)?;

        Ok(E::into_record(model))
    }

    /// Fetch an active record by id.
    pub async fn fetch(&self, id: i32) -> Result<Record<E::Fields>, RepositoryError> {
        Self::find_active(id)
            .one(self.db)
            .await
            .map_err(RepositoryError::database_error)?
            .map(E::into_record)
            .ok_or_else(|| RepositoryError::not_found(E::LABEL))
    }

    /// Merge `patch` onto the stored record and refresh `updated_at`.
    ///
    /// The read and the write happen in one transaction holding the row
    /// lock, so concurrent updates cannot interleave between them.
    pub async fn update(
        &self,
        id: i32,
        patch: E::Patch,
    ) -> Result<Record<E::Fields>, RepositoryError> {
        let txn = self
            .db
            .begin()
            .await
            .map_err(RepositoryError::database_error)?;

        let Some(current) = Self::lock_active(&txn, id).await? else {
            txn.rollback()
                .await
                .map_err(RepositoryError::database_error)?;
            return Err(RepositoryError::not_found(E::LABEL));
        };

        let mut active = E::Active::from(current);
        E::merge(&mut active, patch);
        active.set(E::updated_at_column(), Value::from(record::now()));

        let model = active
            .update(&txn)
            .await
            .map_err(RepositoryError::database_error)?;
        txn.commit().await.map_err(RepositoryError::database_error)?;

        Ok(E::into_record(model))
    }

    /// Logically delete an active record. The row itself is kept.
    pub async fn remove(&self, id: i32) -> Result<(), RepositoryError> {
        let txn = self
            .db
            .begin()
            .await
            .map_err(RepositoryError::database_error)?;

        let Some(current) = Self::lock_active(&txn, id).await? else {
            txn.rollback()
                .await
                .map_err(RepositoryError::database_error)?;
            return Err(RepositoryError::not_found(E::LABEL));
        };

        let now = record::now();
        let mut active = E::Active::from(current);
        active.set(E::deleted_at_column(), Value::from(Some(now)));
        active.set(E::updated_at_column(), Value::from(now));

        active
            .update(&txn)
            .await
            .map_err(RepositoryError::database_error)?;
        txn.commit().await.map_err(RepositoryError::database_error)?;

        Ok(())
    }

    fn find_active(id: i32) -> Select<E> {
        E::find()
            .filter(E::id_column().eq(id))
            .filter(E::deleted_at_column().is_null())
    }

    // SQLite ignores the lock clause; its writer lock serializes instead.
    async fn lock_active(
        txn: &DatabaseTransaction,
        id: i32,
    ) -> Result<Option<E::Model>, RepositoryError> {
        Self::find_active(id)
            .lock_exclusive()
            .one(txn)
            .await
            .map_err(RepositoryError::database_error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{UserFields, UserPatch, user};
    use sea_orm::Database;

    async fn setup() -> DatabaseConnection {
        let db = Database::connect("sqlite::memory:").await.unwrap();
        crate::schema::sync_all(&db).await.unwrap();
        db
    }

    #[tokio::test]
    async fn create_assigns_identity_and_timestamps() {
        let db = setup().await;
        let repo = ResourceRepository::<user::Entity>::new(&db);

        let created = repo
            .create(UserFields {
                name: "Ann".to_string(),
                email: "ann@x.com".to_string(),
            })
            .await
            .unwrap();

        assert!(created.id > 0);
        assert_eq!(created.created_at, created.updated_at);
        assert!(created.lifecycle.is_active());
    }

    #[tokio::test]
    async fn ids_are_not_reused_after_remove() {
        let db = setup().await;
        let repo = ResourceRepository::<user::Entity>::new(&db);

        let first = repo.create(UserFields::default()).await.unwrap();
        repo.remove(first.id).await.unwrap();
        let second = repo.create(UserFields::default()).await.unwrap();

        assert_ne!(first.id, second.id);
    }

    #[tokio::test]
    async fn update_on_removed_record_is_not_found() {
        let db = setup().await;
        let repo = ResourceRepository::<user::Entity>::new(&db);

        let created = repo.create(UserFields::default()).await.unwrap();
        repo.remove(created.id).await.unwrap();

        let err = repo
            .update(created.id, UserPatch::default())
            .await
            .unwrap_err();
        assert!(err.is_not_found());
    }
}

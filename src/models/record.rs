//! Shared soft-deletable record shape.
//!
//! Every persisted resource is a [`Record`] wrapping its own field set: the
//! identity, timestamps and [`Lifecycle`] live here once instead of being
//! repeated on each entity.

use chrono::{DateTime, SubsecRound, Utc};
use sea_orm::{ActiveModelBehavior, ActiveModelTrait, EntityTrait};
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use utoipa::ToSchema;

/// Persisted part of a record's lifecycle.
///
/// The third state, "nonexistent", has no row and therefore no value; the
/// repository reports it as not found. `Deleted` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(
    from = "Option<DateTime<Utc>>",
    into = "Option<DateTime<Utc>>"
)]
pub enum Lifecycle {
    Active,
    Deleted { at: DateTime<Utc> },
}

impl Lifecycle {
    pub fn is_active(&self) -> bool {
        matches!(self, Lifecycle::Active)
    }

    pub fn deleted_at(&self) -> Option<DateTime<Utc>> {
        match self {
            Lifecycle::Active => None,
            Lifecycle::Deleted { at } => Some(*at),
        }
    }
}

impl From<Option<DateTime<Utc>>> for Lifecycle {
    fn from(deleted_at: Option<DateTime<Utc>>) -> Self {
        match deleted_at {
            None => Lifecycle::Active,
            Some(at) => Lifecycle::Deleted { at },
        }
    }
}

impl From<Lifecycle> for Option<DateTime<Utc>> {
    fn from(lifecycle: Lifecycle) -> Self {
        lifecycle.deleted_at()
    }
}

/// A persisted resource: storage-assigned identity and timestamps plus the
/// entity's own fields, flattened on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Record<F> {
    /// Surrogate identity assigned by storage on creation
    #[schema(example = 1)]
    pub id: i32,
    /// When the record was created
    pub created_at: DateTime<Utc>,
    /// When the record was last modified
    pub updated_at: DateTime<Utc>,
    /// Deletion timestamp; `null` while the record is active
    #[serde(rename = "deleted_at")]
    #[schema(value_type = Option<String>, format = DateTime)]
    pub lifecycle: Lifecycle,
    #[serde(flatten)]
    pub fields: F,
}

/// Current time at the precision every supported backend stores.
///
/// Postgres keeps microseconds, so truncating here makes an in-memory
/// timestamp equal to the one read back.
pub fn now() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(6)
}

/// Capability shared by entities persisted as soft-deletable records.
///
/// Implementors describe where identity and timestamps live and how their
/// own fields map onto an active model; the generic repository does the rest.
pub trait SoftDeletable: EntityTrait {
    type Active: ActiveModelTrait<Entity = Self>
        + ActiveModelBehavior
        + From<<Self as EntityTrait>::Model>
        + Send
        + Sync;
    /// Full field set supplied on create.
    type Fields: Serialize + DeserializeOwned + ToSchema + Clone + Send + Sync + 'static;
    /// Partial field set supplied on update; `None` means "keep".
    type Patch: DeserializeOwned + ToSchema + Send + Sync + 'static;

    /// Entity name used in client-facing messages, e.g. "User".
    const LABEL: &'static str;

    fn id_column() -> Self::Column;
    fn created_at_column() -> Self::Column;
    fn updated_at_column() -> Self::Column;
    fn deleted_at_column() -> Self::Column;

    /// Builds an active model with only the entity's own fields set.
    fn new_active(fields: Self::Fields) -> Self::Active;

    /// Overwrites the fields present in `patch`, leaving the rest untouched.
    fn merge(active: &mut Self::Active, patch: Self::Patch);

    fn into_record(model: <Self as EntityTrait>::Model) -> Record<Self::Fields>;
}

//! User entity model
//!
//! SeaORM mapping for the `users` table plus the wire-level field sets used
//! on create and update.

use sea_orm::ActiveValue::Set;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::record::{Record, SoftDeletable};

/// Stored user row
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
    /// Set once on logical deletion
    pub deleted_at: Option<DateTimeUtc>,
    #[sea_orm(column_type = "Text", default_value = "")]
    pub name: String,
    #[sea_orm(column_type = "Text", default_value = "")]
    pub email: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

/// Fields supplied when creating a user. Missing keys default to empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(default)]
pub struct UserFields {
    #[schema(example = "Ann")]
    pub name: String,
    #[schema(example = "ann@x.com")]
    pub email: String,
}

/// Partial update; absent or `null` keys keep the stored value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(default)]
pub struct UserPatch {
    pub name: Option<String>,
    pub email: Option<String>,
}

/// A persisted user as exposed over the API
pub type User = Record<UserFields>;

impl SoftDeletable for Entity {
    type Active = ActiveModel;
    type Fields = UserFields;
    type Patch = UserPatch;

    const LABEL: &'static str = "User";

    fn id_column() -> Column {
        Column::Id
    }

    fn created_at_column() -> Column {
        Column::CreatedAt
    }

    fn updated_at_column() -> Column {
        Column::UpdatedAt
    }

    fn deleted_at_column() -> Column {
        Column::DeletedAt
    }

    fn new_active(fields: UserFields) -> ActiveModel {
        ActiveModel {
            name: Set(fields.name),
            email: Set(fields.email),
            ..Default::default()
        }
    }

    fn merge(active: &mut ActiveModel, patch: UserPatch) {
        if let Some(name) = patch.name {
            active.name = Set(name);
        }
        if let Some(email) = patch.email {
            active.email = Set(email);
        }
    }

    fn into_record(model: Model) -> User {
        Record {
            id: model.id,
            created_at: model.created_at,
            updated_at: model.updated_at,
            lifecycle: model.deleted_at.into(),
            fields: UserFields {
                name: model.name,
                email: model.email,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sea_orm::ActiveValue;
    use serde_json::json;

    #[test]
    fn missing_keys_default_to_empty() {
        let fields: UserFields = serde_json::from_value(json!({ "name": "Ann" })).unwrap();

        assert_eq!(fields.name, "Ann");
        assert_eq!(fields.email, "");
    }

    #[test]
    fn wrongly_typed_field_is_rejected() {
        let result = serde_json::from_value::<UserFields>(json!({ "name": 5 }));
        assert!(result.is_err());
    }

    #[test]
    fn patch_distinguishes_absent_from_empty() {
        let patch: UserPatch =
            serde_json::from_value(json!({ "name": "", "email": null })).unwrap();

        assert_eq!(patch.name.as_deref(), Some(""));
        assert_eq!(patch.email, None);
    }

    #[test]
    fn merge_only_touches_present_fields() {
        let mut active = ActiveModel {
            name: ActiveValue::Unchanged("Ann".to_string()),
            email: ActiveValue::Unchanged("ann@x.com".to_string()),
            ..Default::default()
        };

        Entity::merge(
            &mut active,
            UserPatch {
                name: None,
                email: Some("ann2@x.com".to_string()),
            },
        );

        assert_eq!(active.name, ActiveValue::Unchanged("Ann".to_string()));
        assert_eq!(active.email, ActiveValue::Set("ann2@x.com".to_string()));
    }
}

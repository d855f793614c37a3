//! Company entity model

use sea_orm::ActiveValue::Set;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::record::{Record, SoftDeletable};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "companies")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
    pub deleted_at: Option<DateTimeUtc>,
    #[sea_orm(column_type = "Text", default_value = "")]
    pub name: String,
    #[sea_orm(column_type = "Text", default_value = "")]
    pub email: String,
    #[sea_orm(column_type = "Text", default_value = "")]
    pub address: String,
    #[sea_orm(column_type = "Text", default_value = "")]
    pub bank: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

/// Fields supplied when creating a company. Missing keys default to empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(default)]
pub struct CompanyFields {
    #[schema(example = "Acme")]
    pub name: String,
    #[schema(example = "billing@acme.test")]
    pub email: String,
    #[schema(example = "1 Main St")]
    pub address: String,
    #[schema(example = "First Bank")]
    pub bank: String,
}

/// Partial update; absent or `null` keys keep the stored value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(default)]
pub struct CompanyPatch {
    pub name: Option<String>,
    pub email: Option<String>,
    pub address: Option<String>,
    pub bank: Option<String>,
}

pub type Company = Record<CompanyFields>;

impl SoftDeletable for Entity {
    type Active = ActiveModel;
    type Fields = CompanyFields;
    type Patch = CompanyPatch;

    const LABEL: &'static str = "Company";

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

    fn new_active(fields: CompanyFields) -> ActiveModel {
        ActiveModel {
            name: Set(fields.name),
            email: Set(fields.email),
            address: Set(fields.address),
            bank: Set(fields.bank),
            ..Default::default()
        }
    }

    fn merge(active: &mut ActiveModel, patch: CompanyPatch) {
        if let Some(name) = patch.name {
            active.name = Set(name);
        }
        if let Some(email) = patch.email {
            active.email = Set(email);
        }
        if let Some(address) = patch.address {
            active.address = Set(address);
        }
        if let Some(bank) = patch.bank {
            active.bank = Set(bank);
        }
    }

    fn into_record(model: Model) -> Company {
        Record {
            id: model.id,
            created_at: model.created_at,
            updated_at: model.updated_at,
            lifecycle: model.deleted_at.into(),
            fields: CompanyFields {
                name: model.name,
                email: model.email,
                address: model.address,
                bank: model.bank,
            },
        }
    }
}

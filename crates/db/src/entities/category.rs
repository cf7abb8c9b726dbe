//! Assistance category entity.

use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// A category that assistance requests are filed under.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "category")]
pub struct Model {
    /// Unique category ID.
    #[sea_orm(primary_key)]
    pub id: i32,

    /// Category name, unique among categories.
    #[sea_orm(unique)]
    pub name: String,

    /// Description shown to requesters.
    pub description: String,

    /// Whether the category accepts new requests.
    pub is_active: bool,

    /// When the category was created.
    pub created_at: DateTime<Utc>,
}

/// Relationships.
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::request::Entity")]
    Requests,
}

impl Related<super::request::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Requests.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

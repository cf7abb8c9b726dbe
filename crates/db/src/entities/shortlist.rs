//! Shortlist entity.

use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// A CSR representative's provisional interest marker on a request.
///
/// No uniqueness constraint across (`csr_id`, `request_id`); a CSR shortlists
/// a request once per action.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "shortlist")]
pub struct Model {
    /// Unique shortlist entry ID.
    #[sea_orm(primary_key)]
    pub id: i32,

    /// CSR representative who shortlisted the request.
    pub csr_id: i32,

    /// The shortlisted request.
    pub request_id: i32,

    /// When the entry was created.
    pub created_at: DateTime<Utc>,
}

/// Relationships.
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::user_account::Entity",
        from = "Column::CsrId",
        to = "super::user_account::Column::Id"
    )]
    Csr,

    #[sea_orm(
        belongs_to = "super::request::Entity",
        from = "Column::RequestId",
        to = "super::request::Column::Id"
    )]
    Request,
}

impl Related<super::user_account::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Csr.def()
    }
}

impl Related<super::request::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Request.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

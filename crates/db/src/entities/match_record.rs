//! Match record entity.

use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Status value for a completed match.
pub const STATUS_COMPLETED: &str = "completed";

/// Record of a completed pairing between a request and the CSR who fulfilled
/// it.
///
/// Invariant: `completed_at >= matched_at >= request.created_at`.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "match_record")]
pub struct Model {
    /// Unique match record ID.
    #[sea_orm(primary_key)]
    pub id: i32,

    /// The fulfilled request.
    pub request_id: i32,

    /// CSR representative who fulfilled the request.
    pub csr_id: i32,

    /// Person in need who filed the request.
    pub pin_id: i32,

    /// Category of the fulfilled request (denormalized for reporting).
    pub category_id: i32,

    /// Match status; "completed" for all closed requests.
    pub status: String,

    /// When the CSR was matched to the request.
    pub matched_at: DateTime<Utc>,

    /// When the request was fulfilled.
    pub completed_at: DateTime<Utc>,
}

/// Relationships.
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::request::Entity",
        from = "Column::RequestId",
        to = "super::request::Column::Id"
    )]
    Request,

    #[sea_orm(
        belongs_to = "super::category::Entity",
        from = "Column::CategoryId",
        to = "super::category::Column::Id"
    )]
    Category,
}

impl Related<super::request::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Request.def()
    }
}

impl Related<super::category::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Category.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

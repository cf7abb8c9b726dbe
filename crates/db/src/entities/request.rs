//! Assistance request entity.

use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Status value for an open request.
pub const STATUS_OPEN: &str = "open";
/// Status value for a closed request.
pub const STATUS_CLOSED: &str = "closed";

/// An assistance request filed by a person in need.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "request")]
pub struct Model {
    /// Unique request ID.
    #[sea_orm(primary_key)]
    pub id: i32,

    /// Account of the person in need who filed the request.
    pub pin_id: i32,

    /// Category the request is filed under.
    pub category_id: i32,

    /// Short title.
    pub title: String,

    /// Full description of the need.
    #[sea_orm(column_type = "Text")]
    pub description: String,

    /// "open" or "closed". `closed_at` is set iff this is "closed".
    pub status: String,

    /// How many times the request has been viewed (denormalized).
    pub view_count: i32,

    /// How many shortlist entries the request has (denormalized).
    pub shortlist_count: i32,

    /// When the request was created.
    pub created_at: DateTime<Utc>,

    /// When the request was closed, if it is closed.
    #[sea_orm(nullable)]
    pub closed_at: Option<DateTime<Utc>>,
}

/// Relationships.
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::user_account::Entity",
        from = "Column::PinId",
        to = "super::user_account::Column::Id"
    )]
    Pin,

    #[sea_orm(
        belongs_to = "super::category::Entity",
        from = "Column::CategoryId",
        to = "super::category::Column::Id"
    )]
    Category,

    #[sea_orm(has_many = "super::shortlist::Entity")]
    Shortlists,

    #[sea_orm(has_many = "super::match_record::Entity")]
    MatchRecords,
}

impl Related<super::user_account::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Pin.def()
    }
}

impl Related<super::category::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Category.def()
    }
}

impl Related<super::shortlist::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Shortlists.def()
    }
}

impl Related<super::match_record::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::MatchRecords.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

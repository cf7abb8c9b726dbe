//! Stored report entity.

use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Report type for daily reports.
pub const TYPE_DAILY: &str = "daily";
/// Report type for weekly reports.
pub const TYPE_WEEKLY: &str = "weekly";
/// Report type for monthly reports.
pub const TYPE_MONTHLY: &str = "monthly";

/// A stored, timestamped snapshot of aggregate platform statistics for a
/// given period. Immutable once stored.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "report")]
pub struct Model {
    /// Unique report ID.
    #[sea_orm(primary_key)]
    pub id: i32,

    /// Report title.
    pub title: String,

    /// "daily", "weekly" or "monthly".
    pub report_type: String,

    /// Account ID of the platform manager who generated the report.
    pub generated_by: i32,

    /// Period label: `YYYY-MM-DD`, `YYYY-Www` or `YYYY-MM` depending on type.
    pub period: String,

    /// JSON-encoded summary data.
    #[sea_orm(column_type = "Text")]
    pub data: String,

    /// When the report was generated.
    pub created_at: DateTime<Utc>,
}

/// Relationships.
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::user_account::Entity",
        from = "Column::GeneratedBy",
        to = "super::user_account::Column::Id"
    )]
    GeneratedByAccount,
}

impl Related<super::user_account::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::GeneratedByAccount.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

//! User account entity.

use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// A registered user account.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "user_account")]
pub struct Model {
    /// Unique account ID.
    #[sea_orm(primary_key)]
    pub id: i32,

    /// Display name.
    pub name: String,

    /// Login email, unique across all accounts.
    #[sea_orm(unique)]
    pub email: String,

    /// Argon2 password hash.
    #[serde(skip_serializing)]
    pub password_hash: String,

    /// Role this account belongs to.
    pub profile_id: i32,

    /// Contact phone number.
    pub phone_number: String,

    /// Age in years.
    pub age: i32,

    /// Whether the account may log in.
    pub is_active: bool,

    /// When the account was created.
    pub created_at: DateTime<Utc>,
}

/// Relationships.
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::user_profile::Entity",
        from = "Column::ProfileId",
        to = "super::user_profile::Column::Id"
    )]
    Profile,

    #[sea_orm(has_many = "super::request::Entity")]
    Requests,

    #[sea_orm(has_many = "super::shortlist::Entity")]
    Shortlists,
}

impl Related<super::user_profile::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Profile.def()
    }
}

impl Related<super::request::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Requests.def()
    }
}

impl Related<super::shortlist::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Shortlists.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

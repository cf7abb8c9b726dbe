//! User profile (role) entity.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Fixed role names.
pub const PROFILE_USER_ADMIN: &str = "UserAdmin";
/// CSR representative role name.
pub const PROFILE_CSR_REP: &str = "CSRRep";
/// Person-in-need role name.
pub const PROFILE_PERSON_IN_NEED: &str = "PersonInNeed";
/// Platform manager role name.
pub const PROFILE_PLATFORM_MANAGER: &str = "PlatformManager";

/// A role that user accounts belong to.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "user_profile")]
pub struct Model {
    /// Unique profile ID.
    #[sea_orm(primary_key)]
    pub id: i32,

    /// Role name, one of the fixed enumerated set.
    #[sea_orm(unique)]
    pub name: String,

    /// Human-readable description of the role.
    pub description: String,
}

/// Relationships.
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::user_account::Entity")]
    UserAccounts,
}

impl Related<super::user_account::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::UserAccounts.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

//! User account and profile repository.

use std::sync::Arc;

use crate::entities::{UserAccount, user_account, user_profile};
use carelink_common::{AppError, AppResult};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
};

/// User repository for database operations.
#[derive(Clone)]
pub struct UserRepository {
    db: Arc<DatabaseConnection>,
}

impl UserRepository {
    /// Create a new user repository.
    #[must_use]
    pub const fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Find an account by ID.
    pub async fn find_by_id(&self, id: i32) -> AppResult<Option<user_account::Model>> {
        UserAccount::find_by_id(id)
            .one(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Find an account by ID, returning an error if not found.
    pub async fn get_by_id(&self, id: i32) -> AppResult<user_account::Model> {
        self.find_by_id(id)
            .await?
            .ok_or_else(|| AppError::UserNotFound(id.to_string()))
    }

    /// Find an account by email.
    pub async fn find_by_email(&self, email: &str) -> AppResult<Option<user_account::Model>> {
        UserAccount::find()
            .filter(user_account::Column::Email.eq(email))
            .one(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Create a new account.
    pub async fn create(&self, model: user_account::ActiveModel) -> AppResult<user_account::Model> {
        model
            .insert(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Count all accounts.
    pub async fn count(&self) -> AppResult<u64> {
        UserAccount::find()
            .count(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Create a role profile.
    pub async fn create_profile(
        &self,
        model: user_profile::ActiveModel,
    ) -> AppResult<user_profile::Model> {
        model
            .insert(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }
}

//! Category service.

use carelink_common::{AppError, AppResult};
use carelink_db::{entities::category, repositories::CategoryRepository};
use chrono::Utc;
use sea_orm::Set;
use serde::Deserialize;
use validator::Validate;

/// Service for curating assistance categories.
#[derive(Clone)]
pub struct CategoryService {
    category_repo: CategoryRepository,
}

/// Input for creating a category.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateCategoryInput {
    /// Category name, unique among categories.
    #[validate(length(min = 1, max = 128))]
    pub name: String,

    /// Description shown to requesters.
    #[validate(length(max = 512))]
    pub description: String,
}

impl CategoryService {
    /// Create a new category service.
    #[must_use]
    pub const fn new(category_repo: CategoryRepository) -> Self {
        Self { category_repo }
    }

    /// Create a new category.
    pub async fn create(&self, input: CreateCategoryInput) -> AppResult<category::Model> {
        input.validate()?;

        if self
            .category_repo
            .find_by_name(&input.name)
            .await?
            .is_some()
        {
            return Err(AppError::Conflict(format!(
                "category {} already exists",
                input.name
            )));
        }

        let model = category::ActiveModel {
            name: Set(input.name),
            description: Set(input.description),
            is_active: Set(true),
            created_at: Set(Utc::now()),
            ..Default::default()
        };

        self.category_repo.create(model).await
    }

    /// Get a category by ID.
    pub async fn get_by_id(&self, id: i32) -> AppResult<category::Model> {
        self.category_repo.get_by_id(id).await
    }

    /// List all categories.
    pub async fn list_all(&self) -> AppResult<Vec<category::Model>> {
        self.category_repo.find_all().await
    }

    /// List active categories.
    pub async fn list_active(&self) -> AppResult<Vec<category::Model>> {
        self.category_repo.find_active().await
    }

    /// Deactivate a category so it no longer accepts requests.
    pub async fn deactivate(&self, id: i32) -> AppResult<category::Model> {
        let existing = self.category_repo.get_by_id(id).await?;

        let mut model: category::ActiveModel = existing.into();
        model.is_active = Set(false);
        self.category_repo.update(model).await
    }
}

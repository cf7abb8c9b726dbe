//! Category repository.

use std::sync::Arc;

use crate::entities::{Category, category};
use carelink_common::{AppError, AppResult};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder,
};

/// Category repository for database operations.
#[derive(Clone)]
pub struct CategoryRepository {
    db: Arc<DatabaseConnection>,
}

impl CategoryRepository {
    /// Create a new category repository.
    #[must_use]
    pub const fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Find a category by ID.
    pub async fn find_by_id(&self, id: i32) -> AppResult<Option<category::Model>> {
        Category::find_by_id(id)
            .one(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Find a category by ID, returning an error if not found.
    pub async fn get_by_id(&self, id: i32) -> AppResult<category::Model> {
        self.find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("category {id}")))
    }

    /// Find a category by name.
    pub async fn find_by_name(&self, name: &str) -> AppResult<Option<category::Model>> {
        Category::find()
            .filter(category::Column::Name.eq(name))
            .one(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// List all categories, ordered by ID.
    pub async fn find_all(&self) -> AppResult<Vec<category::Model>> {
        Category::find()
            .order_by_asc(category::Column::Id)
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// List active categories, ordered by ID.
    pub async fn find_active(&self) -> AppResult<Vec<category::Model>> {
        Category::find()
            .filter(category::Column::IsActive.eq(true))
            .order_by_asc(category::Column::Id)
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Create a new category.
    pub async fn create(&self, model: category::ActiveModel) -> AppResult<category::Model> {
        model
            .insert(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Update a category.
    pub async fn update(&self, model: category::ActiveModel) -> AppResult<category::Model> {
        model
            .update(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Count all categories.
    pub async fn count(&self) -> AppResult<u64> {
        Category::find()
            .count(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use chrono::Utc;
    use sea_orm::{DatabaseBackend, MockDatabase};

    fn create_test_category(id: i32, name: &str, is_active: bool) -> category::Model {
        category::Model {
            id,
            name: name.to_string(),
            description: "Test category".to_string(),
            is_active,
            created_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_find_all_returns_categories() {
        let transport = create_test_category(1, "Transportation", true);
        let medical = create_test_category(2, "Medical Aid", true);
        let food = create_test_category(3, "Food Support", true);

        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[transport, medical, food]])
                .into_connection(),
        );

        let repo = CategoryRepository::new(db);
        let results = repo.find_all().await.unwrap();

        assert_eq!(results.len(), 3);
        assert_eq!(results[0].name, "Transportation");
    }

    #[tokio::test]
    async fn test_find_active_filters_inactive() {
        let active = create_test_category(1, "Transportation", true);

        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[active]])
                .into_connection(),
        );

        let repo = CategoryRepository::new(db);
        let results = repo.find_active().await.unwrap();

        assert!(results.iter().all(|c| c.is_active));
    }

    #[tokio::test]
    async fn test_get_by_id_not_found() {
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([Vec::<category::Model>::new()])
                .into_connection(),
        );

        let repo = CategoryRepository::new(db);
        let result = repo.get_by_id(99).await;

        assert!(matches!(result, Err(AppError::NotFound(_))));
    }
}

//! Shortlist repository.

use std::sync::Arc;

use crate::entities::shortlist;
use carelink_common::{AppError, AppResult};
use sea_orm::{ActiveModelTrait, DatabaseConnection};

/// Shortlist repository for database operations.
#[derive(Clone)]
pub struct ShortlistRepository {
    db: Arc<DatabaseConnection>,
}

impl ShortlistRepository {
    /// Create a new shortlist repository.
    #[must_use]
    pub const fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Create a new shortlist entry.
    pub async fn create(&self, model: shortlist::ActiveModel) -> AppResult<shortlist::Model> {
        model
            .insert(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use chrono::Utc;
    use sea_orm::{DatabaseBackend, MockDatabase, MockExecResult, Set};

    #[tokio::test]
    async fn test_create_shortlist_entry() {
        let entry = shortlist::Model {
            id: 1,
            csr_id: 2,
            request_id: 4,
            created_at: Utc::now(),
        };

        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[entry]])
                .append_exec_results([MockExecResult {
                    last_insert_id: 1,
                    rows_affected: 1,
                }])
                .into_connection(),
        );

        let repo = ShortlistRepository::new(db);
        let active = shortlist::ActiveModel {
            csr_id: Set(2),
            request_id: Set(4),
            created_at: Set(Utc::now()),
            ..Default::default()
        };

        let result = repo.create(active).await.unwrap();
        assert_eq!(result.request_id, 4);
    }
}

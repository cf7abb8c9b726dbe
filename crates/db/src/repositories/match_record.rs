//! Match record repository.

use std::sync::Arc;

use crate::entities::{MatchRecord, match_record};
use carelink_common::{AppError, AppResult};
use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
};

/// Match record repository for database operations.
#[derive(Clone)]
pub struct MatchRecordRepository {
    db: Arc<DatabaseConnection>,
}

impl MatchRecordRepository {
    /// Create a new match record repository.
    #[must_use]
    pub const fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Create a new match record.
    pub async fn create(&self, model: match_record::ActiveModel) -> AppResult<match_record::Model> {
        model
            .insert(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Count all match records.
    pub async fn count(&self) -> AppResult<u64> {
        MatchRecord::find()
            .count(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Count match records completed at or after the cutoff.
    ///
    /// Closed lower bound: a record completed exactly at the cutoff is
    /// included.
    pub async fn count_completed_since(&self, cutoff: DateTime<Utc>) -> AppResult<u64> {
        MatchRecord::find()
            .filter(match_record::Column::CompletedAt.gte(cutoff))
            .count(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use sea_orm::{DatabaseBackend, MockDatabase};

    #[tokio::test]
    async fn test_count_completed_since() {
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[maplit::btreemap! {
                    "num_items" => sea_orm::Value::BigInt(Some(11))
                }]])
                .into_connection(),
        );

        let repo = MatchRecordRepository::new(db);
        let cutoff = Utc::now() - chrono::Duration::days(30);
        let count = repo.count_completed_since(cutoff).await.unwrap();

        assert_eq!(count, 11);
    }

    #[tokio::test]
    async fn test_count_completed_since_filters_with_a_closed_lower_bound() {
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[maplit::btreemap! {
                    "num_items" => sea_orm::Value::BigInt(Some(1))
                }]])
                .into_connection(),
        );

        let repo = MatchRecordRepository::new(Arc::clone(&db));
        let cutoff = Utc::now() - chrono::Duration::days(30);
        repo.count_completed_since(cutoff).await.unwrap();

        drop(repo);
        let Ok(conn) = Arc::try_unwrap(db) else {
            panic!("connection still shared");
        };
        let log = format!("{:?}", conn.into_transaction_log());

        // A record completed exactly at the cutoff must be counted, so the
        // query has to compare with >= rather than >.
        assert!(
            log.contains(r#""completed_at" >="#),
            "expected a >= comparison on completed_at, got: {log}"
        );
    }
}

//! Assistance request repository.

use std::sync::Arc;

use crate::entities::{Request, request};
use carelink_common::{AppError, AppResult};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, FromQueryResult,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, sea_query::Expr,
};

/// One row of the grouped per-category request aggregate.
#[derive(Debug, Clone, PartialEq, Eq, FromQueryResult)]
pub struct CategoryStatusCount {
    /// Category the requests belong to.
    pub category_id: i32,
    /// Request status ("open" or "closed").
    pub status: String,
    /// Number of requests with that category and status.
    pub count: i64,
}

/// Request repository for database operations.
#[derive(Clone)]
pub struct RequestRepository {
    db: Arc<DatabaseConnection>,
}

impl RequestRepository {
    /// Create a new request repository.
    #[must_use]
    pub const fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Find a request by ID.
    pub async fn find_by_id(&self, id: i32) -> AppResult<Option<request::Model>> {
        Request::find_by_id(id)
            .one(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Find a request by ID, returning an error if not found.
    pub async fn get_by_id(&self, id: i32) -> AppResult<request::Model> {
        self.find_by_id(id)
            .await?
            .ok_or_else(|| AppError::RequestNotFound(id.to_string()))
    }

    /// List requests, newest first.
    pub async fn find_all(&self, limit: u64, offset: u64) -> AppResult<Vec<request::Model>> {
        Request::find()
            .order_by_desc(request::Column::CreatedAt)
            .offset(offset)
            .limit(limit)
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Create a new request.
    pub async fn create(&self, model: request::ActiveModel) -> AppResult<request::Model> {
        model
            .insert(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Update a request.
    pub async fn update(&self, model: request::ActiveModel) -> AppResult<request::Model> {
        model
            .update(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Count all requests.
    pub async fn count(&self) -> AppResult<u64> {
        Request::find()
            .count(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Count requests with the given status.
    pub async fn count_by_status(&self, status: &str) -> AppResult<u64> {
        Request::find()
            .filter(request::Column::Status.eq(status))
            .count(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Count requests grouped by category and status.
    ///
    /// Single grouped aggregate query; categories with no requests produce no
    /// rows and are zero-filled by the caller.
    pub async fn count_by_category_and_status(&self) -> AppResult<Vec<CategoryStatusCount>> {
        Request::find()
            .select_only()
            .column(request::Column::CategoryId)
            .column(request::Column::Status)
            .column_as(request::Column::Id.count(), "count")
            .group_by(request::Column::CategoryId)
            .group_by(request::Column::Status)
            .into_model::<CategoryStatusCount>()
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Increment the view counter atomically (single UPDATE query, no fetch).
    pub async fn increment_view_count(&self, request_id: i32) -> AppResult<()> {
        Request::update_many()
            .col_expr(
                request::Column::ViewCount,
                Expr::col(request::Column::ViewCount).add(1),
            )
            .filter(request::Column::Id.eq(request_id))
            .exec(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(())
    }

    /// Increment the shortlist counter atomically (single UPDATE query, no fetch).
    pub async fn increment_shortlist_count(&self, request_id: i32) -> AppResult<()> {
        Request::update_many()
            .col_expr(
                request::Column::ShortlistCount,
                Expr::col(request::Column::ShortlistCount).add(1),
            )
            .filter(request::Column::Id.eq(request_id))
            .exec(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(())
    }
}

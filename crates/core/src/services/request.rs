//! Assistance request service.

use carelink_common::{AppError, AppResult};
use carelink_db::{
    entities::{
        match_record,
        request::{self, STATUS_CLOSED, STATUS_OPEN},
        shortlist,
    },
    repositories::{
        CategoryRepository, MatchRecordRepository, RequestRepository, ShortlistRepository,
    },
};
use chrono::{DateTime, Utc};
use sea_orm::Set;
use serde::Deserialize;
use validator::Validate;

/// Service for the request lifecycle: create, view, shortlist, complete.
#[derive(Clone)]
pub struct RequestService {
    request_repo: RequestRepository,
    shortlist_repo: ShortlistRepository,
    match_repo: MatchRecordRepository,
    category_repo: CategoryRepository,
}

/// Input for creating a request.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateRequestInput {
    /// Account of the person in need filing the request.
    pub pin_id: i32,

    /// Category to file under; must be active.
    pub category_id: i32,

    /// Short title.
    #[validate(length(min = 1, max = 256))]
    pub title: String,

    /// Full description of the need.
    #[validate(length(min = 1, max = 4096))]
    pub description: String,
}

/// Input for completing a request.
///
/// Timestamps default to "now"; the seeder passes explicit values.
#[derive(Debug, Deserialize)]
pub struct CompleteRequestInput {
    /// The request to close.
    pub request_id: i32,

    /// CSR representative fulfilling the request.
    pub csr_id: i32,

    /// When the CSR was matched; defaults to now.
    #[serde(default)]
    pub matched_at: Option<DateTime<Utc>>,

    /// When the request closes; defaults to now.
    #[serde(default)]
    pub closed_at: Option<DateTime<Utc>>,

    /// When fulfilment finished; defaults to `closed_at`.
    #[serde(default)]
    pub completed_at: Option<DateTime<Utc>>,
}

impl RequestService {
    /// Create a new request service.
    #[must_use]
    pub const fn new(
        request_repo: RequestRepository,
        shortlist_repo: ShortlistRepository,
        match_repo: MatchRecordRepository,
        category_repo: CategoryRepository,
    ) -> Self {
        Self {
            request_repo,
            shortlist_repo,
            match_repo,
            category_repo,
        }
    }

    /// Create a new open request.
    pub async fn create(&self, input: CreateRequestInput) -> AppResult<request::Model> {
        input.validate()?;

        let category = self.category_repo.get_by_id(input.category_id).await?;
        if !category.is_active {
            return Err(AppError::BadRequest(format!(
                "category {} is not accepting requests",
                category.name
            )));
        }

        let model = request::ActiveModel {
            pin_id: Set(input.pin_id),
            category_id: Set(input.category_id),
            title: Set(input.title),
            description: Set(input.description),
            status: Set(STATUS_OPEN.to_string()),
            view_count: Set(0),
            shortlist_count: Set(0),
            created_at: Set(Utc::now()),
            closed_at: Set(None),
            ..Default::default()
        };

        self.request_repo.create(model).await
    }

    /// Get a request by ID.
    pub async fn get_by_id(&self, id: i32) -> AppResult<request::Model> {
        self.request_repo.get_by_id(id).await
    }

    /// List requests, newest first.
    pub async fn list(&self, limit: u64, offset: u64) -> AppResult<Vec<request::Model>> {
        self.request_repo.find_all(limit, offset).await
    }

    /// Record one view of a request.
    pub async fn record_view(&self, request_id: i32) -> AppResult<()> {
        self.request_repo.get_by_id(request_id).await?;
        self.request_repo.increment_view_count(request_id).await
    }

    /// Shortlist a request on behalf of a CSR.
    ///
    /// Inserts a shortlist row and bumps the request's denormalized counter.
    pub async fn shortlist(&self, request_id: i32, csr_id: i32) -> AppResult<shortlist::Model> {
        let req = self.request_repo.get_by_id(request_id).await?;
        if req.status == STATUS_CLOSED {
            return Err(AppError::BadRequest(format!(
                "request {request_id} is closed"
            )));
        }

        let entry = self
            .shortlist_repo
            .create(shortlist::ActiveModel {
                csr_id: Set(csr_id),
                request_id: Set(request_id),
                created_at: Set(Utc::now()),
                ..Default::default()
            })
            .await?;

        self.request_repo
            .increment_shortlist_count(request_id)
            .await?;

        Ok(entry)
    }

    /// Close a request and record the completed match.
    ///
    /// `closed_at` is set together with the status flip, and the match record
    /// keeps `completed_at >= matched_at >= created_at`.
    pub async fn complete(&self, input: CompleteRequestInput) -> AppResult<match_record::Model> {
        let req = self.request_repo.get_by_id(input.request_id).await?;
        if req.status == STATUS_CLOSED {
            return Err(AppError::Conflict(format!(
                "request {} is already closed",
                input.request_id
            )));
        }

        let now = Utc::now();
        let matched_at = input.matched_at.unwrap_or(now);
        let closed_at = input.closed_at.unwrap_or(now);
        let completed_at = input.completed_at.unwrap_or(closed_at);

        let mut closing: request::ActiveModel = req.clone().into();
        closing.status = Set(STATUS_CLOSED.to_string());
        closing.closed_at = Set(Some(closed_at));
        self.request_repo.update(closing).await?;

        self.match_repo
            .create(match_record::ActiveModel {
                request_id: Set(req.id),
                csr_id: Set(input.csr_id),
                pin_id: Set(req.pin_id),
                category_id: Set(req.category_id),
                status: Set(match_record::STATUS_COMPLETED.to_string()),
                matched_at: Set(matched_at),
                completed_at: Set(completed_at),
                ..Default::default()
            })
            .await
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use sea_orm::{DatabaseBackend, MockDatabase};
    use std::sync::Arc;

    fn service_with(db: Arc<sea_orm::DatabaseConnection>) -> RequestService {
        RequestService::new(
            RequestRepository::new(Arc::clone(&db)),
            ShortlistRepository::new(Arc::clone(&db)),
            MatchRecordRepository::new(Arc::clone(&db)),
            CategoryRepository::new(db),
        )
    }

    fn test_request(id: i32, status: &str) -> request::Model {
        request::Model {
            id,
            pin_id: 3,
            category_id: 1,
            title: "Transport to appointment".to_string(),
            description: "Wheelchair-friendly transport needed".to_string(),
            status: status.to_string(),
            view_count: 0,
            shortlist_count: 0,
            created_at: Utc::now(),
            closed_at: None,
        }
    }

    #[tokio::test]
    async fn test_shortlist_rejects_closed_request() {
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[test_request(1, STATUS_CLOSED)]])
                .into_connection(),
        );

        let service = service_with(db);
        let result = service.shortlist(1, 2).await;

        assert!(matches!(result, Err(AppError::BadRequest(_))));
    }

    #[tokio::test]
    async fn test_complete_rejects_already_closed_request() {
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[test_request(1, STATUS_CLOSED)]])
                .into_connection(),
        );

        let service = service_with(db);
        let result = service
            .complete(CompleteRequestInput {
                request_id: 1,
                csr_id: 2,
                matched_at: None,
                closed_at: None,
                completed_at: None,
            })
            .await;

        assert!(matches!(result, Err(AppError::Conflict(_))));
    }

    #[tokio::test]
    async fn test_create_rejects_inactive_category() {
        let inactive = carelink_db::entities::category::Model {
            id: 1,
            name: "Transportation".to_string(),
            description: "Transport assistance".to_string(),
            is_active: false,
            created_at: Utc::now(),
        };

        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[inactive]])
                .into_connection(),
        );

        let service = service_with(db);
        let result = service
            .create(CreateRequestInput {
                pin_id: 3,
                category_id: 1,
                title: "Transport to appointment".to_string(),
                description: "Wheelchair-friendly transport needed".to_string(),
            })
            .await;

        assert!(matches!(result, Err(AppError::BadRequest(_))));
    }
}

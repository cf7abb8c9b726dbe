//! Report endpoints.

use axum::{Json, Router, extract::State, routing::post};
use carelink_common::AppResult;
use carelink_db::entities::report;
use serde::{Deserialize, Serialize};

use crate::{middleware::AppState, response::ApiResponse};

// ==================== Request/Response Types ====================

/// Stored report response. `data` is returned as parsed JSON.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportResponse {
    pub id: i32,
    pub title: String,
    pub report_type: String,
    pub generated_by: i32,
    pub period: String,
    pub data: serde_json::Value,
    pub created_at: String,
}

impl From<report::Model> for ReportResponse {
    fn from(r: report::Model) -> Self {
        let data = serde_json::from_str(&r.data).unwrap_or(serde_json::Value::Null);
        Self {
            id: r.id,
            title: r.title,
            report_type: r.report_type,
            generated_by: r.generated_by,
            period: r.period,
            data,
            created_at: r.created_at.to_rfc3339(),
        }
    }
}

/// Generate report request.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateReportRequest {
    /// Platform manager generating the report.
    pub generated_by: i32,
    /// Period label: `YYYY-MM-DD`, `YYYY-Www` or `YYYY-MM` per endpoint.
    pub period: String,
}

/// Show report request.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShowReportRequest {
    pub report_id: i32,
}

/// List reports request.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListReportsRequest {
    #[serde(default = "default_limit")]
    pub limit: u64,
    #[serde(default)]
    pub offset: u64,
}

const fn default_limit() -> u64 {
    10
}

// ==================== Handlers ====================

/// Generate a daily report.
async fn generate_daily(
    State(state): State<AppState>,
    Json(req): Json<GenerateReportRequest>,
) -> AppResult<ApiResponse<ReportResponse>> {
    let report = state
        .report_service
        .generate_daily(req.generated_by, &req.period)
        .await?;

    Ok(ApiResponse::ok(report.into()))
}

/// Generate a weekly report.
async fn generate_weekly(
    State(state): State<AppState>,
    Json(req): Json<GenerateReportRequest>,
) -> AppResult<ApiResponse<ReportResponse>> {
    let report = state
        .report_service
        .generate_weekly(req.generated_by, &req.period)
        .await?;

    Ok(ApiResponse::ok(report.into()))
}

/// Generate a monthly report.
async fn generate_monthly(
    State(state): State<AppState>,
    Json(req): Json<GenerateReportRequest>,
) -> AppResult<ApiResponse<ReportResponse>> {
    let report = state
        .report_service
        .generate_monthly(req.generated_by, &req.period)
        .await?;

    Ok(ApiResponse::ok(report.into()))
}

/// Show a stored report.
async fn show(
    State(state): State<AppState>,
    Json(req): Json<ShowReportRequest>,
) -> AppResult<ApiResponse<ReportResponse>> {
    let report = state.report_service.get_by_id(req.report_id).await?;

    Ok(ApiResponse::ok(report.into()))
}

/// List stored reports, newest first.
async fn list(
    State(state): State<AppState>,
    Json(req): Json<ListReportsRequest>,
) -> AppResult<ApiResponse<Vec<ReportResponse>>> {
    let limit = req.limit.min(100);
    let reports = state.report_service.list(limit, req.offset).await?;

    Ok(ApiResponse::ok(
        reports.into_iter().map(Into::into).collect(),
    ))
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/generate/daily", post(generate_daily))
        .route("/generate/weekly", post(generate_weekly))
        .route("/generate/monthly", post(generate_monthly))
        .route("/show", post(show))
        .route("/list", post(list))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use axum::{
        body::Body,
        http::{Request, StatusCode, header},
    };
    use carelink_core::{
        AccountService, CategoryService, ReportService, RequestService,
    };
    use carelink_db::repositories::{
        CategoryRepository, MatchRecordRepository, ReportRepository, RequestRepository,
        ShortlistRepository, UserRepository,
    };
    use sea_orm::{DatabaseBackend, MockDatabase};
    use std::sync::Arc;
    use tower::util::ServiceExt;

    fn test_state() -> AppState {
        let db = Arc::new(MockDatabase::new(DatabaseBackend::Postgres).into_connection());
        AppState {
            account_service: AccountService::new(UserRepository::new(Arc::clone(&db))),
            category_service: CategoryService::new(CategoryRepository::new(Arc::clone(&db))),
            request_service: RequestService::new(
                RequestRepository::new(Arc::clone(&db)),
                ShortlistRepository::new(Arc::clone(&db)),
                MatchRecordRepository::new(Arc::clone(&db)),
                CategoryRepository::new(Arc::clone(&db)),
            ),
            report_service: ReportService::new(
                UserRepository::new(Arc::clone(&db)),
                RequestRepository::new(Arc::clone(&db)),
                MatchRecordRepository::new(Arc::clone(&db)),
                CategoryRepository::new(Arc::clone(&db)),
                ReportRepository::new(db),
            ),
        }
    }

    #[tokio::test]
    async fn test_generate_weekly_rejects_malformed_period_with_400() {
        let app = router().with_state(test_state());

        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/generate/weekly")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(
                        r#"{"generatedBy": 4, "period": "2025-WXX"}"#,
                    ))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}

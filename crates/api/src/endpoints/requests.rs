//! Assistance request endpoints.

use axum::{Json, Router, extract::State, routing::post};
use carelink_common::AppResult;
use carelink_core::{CompleteRequestInput, CreateRequestInput};
use carelink_db::entities::{match_record, request, shortlist};
use serde::{Deserialize, Serialize};

use crate::{middleware::AppState, response::ApiResponse};

// ==================== Request/Response Types ====================

/// Assistance request response.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestResponse {
    pub id: i32,
    pub pin_id: i32,
    pub category_id: i32,
    pub title: String,
    pub description: String,
    pub status: String,
    pub view_count: i32,
    pub shortlist_count: i32,
    pub created_at: String,
    pub closed_at: Option<String>,
}

impl From<request::Model> for RequestResponse {
    fn from(r: request::Model) -> Self {
        Self {
            id: r.id,
            pin_id: r.pin_id,
            category_id: r.category_id,
            title: r.title,
            description: r.description,
            status: r.status,
            view_count: r.view_count,
            shortlist_count: r.shortlist_count,
            created_at: r.created_at.to_rfc3339(),
            closed_at: r.closed_at.map(|dt| dt.to_rfc3339()),
        }
    }
}

/// Shortlist entry response.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ShortlistResponse {
    pub id: i32,
    pub csr_id: i32,
    pub request_id: i32,
    pub created_at: String,
}

impl From<shortlist::Model> for ShortlistResponse {
    fn from(s: shortlist::Model) -> Self {
        Self {
            id: s.id,
            csr_id: s.csr_id,
            request_id: s.request_id,
            created_at: s.created_at.to_rfc3339(),
        }
    }
}

/// Match record response.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchResponse {
    pub id: i32,
    pub request_id: i32,
    pub csr_id: i32,
    pub pin_id: i32,
    pub category_id: i32,
    pub status: String,
    pub matched_at: String,
    pub completed_at: String,
}

impl From<match_record::Model> for MatchResponse {
    fn from(m: match_record::Model) -> Self {
        Self {
            id: m.id,
            request_id: m.request_id,
            csr_id: m.csr_id,
            pin_id: m.pin_id,
            category_id: m.category_id,
            status: m.status,
            matched_at: m.matched_at.to_rfc3339(),
            completed_at: m.completed_at.to_rfc3339(),
        }
    }
}

/// Show/view request.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestIdRequest {
    pub request_id: i32,
}

/// List requests.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListRequestsRequest {
    #[serde(default = "default_limit")]
    pub limit: u64,
    #[serde(default)]
    pub offset: u64,
}

/// Shortlist request.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShortlistRequest {
    pub request_id: i32,
    pub csr_id: i32,
}

const fn default_limit() -> u64 {
    10
}

// ==================== Handlers ====================

/// Create a new assistance request.
async fn create(
    State(state): State<AppState>,
    Json(input): Json<CreateRequestInput>,
) -> AppResult<ApiResponse<RequestResponse>> {
    let request = state.request_service.create(input).await?;

    Ok(ApiResponse::ok(request.into()))
}

/// Show a request.
async fn show(
    State(state): State<AppState>,
    Json(req): Json<RequestIdRequest>,
) -> AppResult<ApiResponse<RequestResponse>> {
    let request = state.request_service.get_by_id(req.request_id).await?;

    Ok(ApiResponse::ok(request.into()))
}

/// List requests, newest first.
async fn list(
    State(state): State<AppState>,
    Json(req): Json<ListRequestsRequest>,
) -> AppResult<ApiResponse<Vec<RequestResponse>>> {
    let limit = req.limit.min(100);
    let requests = state.request_service.list(limit, req.offset).await?;

    Ok(ApiResponse::ok(
        requests.into_iter().map(Into::into).collect(),
    ))
}

/// Record one view of a request.
async fn view(
    State(state): State<AppState>,
    Json(req): Json<RequestIdRequest>,
) -> AppResult<ApiResponse<()>> {
    state.request_service.record_view(req.request_id).await?;

    Ok(ApiResponse::ok(()))
}

/// Shortlist a request for a CSR.
async fn shortlist(
    State(state): State<AppState>,
    Json(req): Json<ShortlistRequest>,
) -> AppResult<ApiResponse<ShortlistResponse>> {
    let entry = state
        .request_service
        .shortlist(req.request_id, req.csr_id)
        .await?;

    Ok(ApiResponse::ok(entry.into()))
}

/// Close a request with a completed match.
async fn complete(
    State(state): State<AppState>,
    Json(input): Json<CompleteRequestInput>,
) -> AppResult<ApiResponse<MatchResponse>> {
    let record = state.request_service.complete(input).await?;

    Ok(ApiResponse::ok(record.into()))
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/create", post(create))
        .route("/show", post(show))
        .route("/list", post(list))
        .route("/view", post(view))
        .route("/shortlist", post(shortlist))
        .route("/complete", post(complete))
}

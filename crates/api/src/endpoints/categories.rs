//! Category endpoints.

use axum::{Json, Router, extract::State, routing::post};
use carelink_common::AppResult;
use carelink_core::CreateCategoryInput;
use carelink_db::entities::category;
use serde::{Deserialize, Serialize};

use crate::{middleware::AppState, response::ApiResponse};

// ==================== Request/Response Types ====================

/// Category response.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryResponse {
    pub id: i32,
    pub name: String,
    pub description: String,
    pub is_active: bool,
    pub created_at: String,
}

impl From<category::Model> for CategoryResponse {
    fn from(c: category::Model) -> Self {
        Self {
            id: c.id,
            name: c.name,
            description: c.description,
            is_active: c.is_active,
            created_at: c.created_at.to_rfc3339(),
        }
    }
}

/// List categories request.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListCategoriesRequest {
    #[serde(default)]
    pub active_only: bool,
}

/// Show/deactivate category request.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryIdRequest {
    pub category_id: i32,
}

// ==================== Handlers ====================

/// Create a new category.
async fn create(
    State(state): State<AppState>,
    Json(input): Json<CreateCategoryInput>,
) -> AppResult<ApiResponse<CategoryResponse>> {
    let category = state.category_service.create(input).await?;

    Ok(ApiResponse::ok(category.into()))
}

/// List categories.
async fn list(
    State(state): State<AppState>,
    Json(req): Json<ListCategoriesRequest>,
) -> AppResult<ApiResponse<Vec<CategoryResponse>>> {
    let categories = if req.active_only {
        state.category_service.list_active().await?
    } else {
        state.category_service.list_all().await?
    };

    Ok(ApiResponse::ok(
        categories.into_iter().map(Into::into).collect(),
    ))
}

/// Show a category.
async fn show(
    State(state): State<AppState>,
    Json(req): Json<CategoryIdRequest>,
) -> AppResult<ApiResponse<CategoryResponse>> {
    let category = state.category_service.get_by_id(req.category_id).await?;

    Ok(ApiResponse::ok(category.into()))
}

/// Deactivate a category.
async fn deactivate(
    State(state): State<AppState>,
    Json(req): Json<CategoryIdRequest>,
) -> AppResult<ApiResponse<CategoryResponse>> {
    let category = state.category_service.deactivate(req.category_id).await?;

    Ok(ApiResponse::ok(category.into()))
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/create", post(create))
        .route("/list", post(list))
        .route("/show", post(show))
        .route("/deactivate", post(deactivate))
}

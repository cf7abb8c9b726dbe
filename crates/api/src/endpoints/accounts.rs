//! Account endpoints.

use axum::{Json, Router, extract::State, routing::post};
use carelink_common::AppResult;
use carelink_core::RegisterAccountInput;
use carelink_db::entities::user_account;
use serde::{Deserialize, Serialize};

use crate::{middleware::AppState, response::ApiResponse};

// ==================== Request/Response Types ====================

/// Account response. The password hash never leaves the service layer.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountResponse {
    pub id: i32,
    pub name: String,
    pub email: String,
    pub profile_id: i32,
    pub phone_number: String,
    pub age: i32,
    pub is_active: bool,
    pub created_at: String,
}

impl From<user_account::Model> for AccountResponse {
    fn from(u: user_account::Model) -> Self {
        Self {
            id: u.id,
            name: u.name,
            email: u.email,
            profile_id: u.profile_id,
            phone_number: u.phone_number,
            age: u.age,
            is_active: u.is_active,
            created_at: u.created_at.to_rfc3339(),
        }
    }
}

/// Login request.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

// ==================== Handlers ====================

/// Register a new account.
async fn register(
    State(state): State<AppState>,
    Json(input): Json<RegisterAccountInput>,
) -> AppResult<ApiResponse<AccountResponse>> {
    let account = state.account_service.register(input).await?;

    Ok(ApiResponse::ok(account.into()))
}

/// Check credentials and return the account.
async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> AppResult<ApiResponse<AccountResponse>> {
    let account = state
        .account_service
        .authenticate(&req.email, &req.password)
        .await?;

    Ok(ApiResponse::ok(account.into()))
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
}

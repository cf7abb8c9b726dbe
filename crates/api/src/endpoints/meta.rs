//! Meta endpoints.

use axum::{Json, Router, routing::post};
use serde::Serialize;

use crate::middleware::AppState;

/// Server metadata response.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MetaResponse {
    pub version: String,
    pub name: String,
    pub description: String,
}

/// Get server metadata.
async fn meta() -> Json<MetaResponse> {
    Json(MetaResponse {
        version: env!("CARGO_PKG_VERSION").to_string(),
        name: "carelink".to_string(),
        description: "Community assistance platform".to_string(),
    })
}

pub fn router() -> Router<AppState> {
    Router::new().route("/", post(meta))
}

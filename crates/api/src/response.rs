//! API response types.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;

/// Standard success envelope.
///
/// Error bodies are produced by `AppError::into_response`, which emits the
/// matching `{"error": {"code", "message"}}` shape.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub data: T,
}

impl<T: Serialize> ApiResponse<T> {
    /// Create a success response.
    pub const fn ok(data: T) -> Self {
        Self { data }
    }
}

impl<T: Serialize> IntoResponse for ApiResponse<T> {
    fn into_response(self) -> Response {
        (StatusCode::OK, Json(self)).into_response()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn success_envelope_wraps_the_payload_in_data() {
        let json = serde_json::to_string(&ApiResponse::ok(42)).unwrap();
        assert_eq!(json, r#"{"data":42}"#);
    }
}

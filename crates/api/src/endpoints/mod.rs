//! API endpoints.

mod accounts;
mod categories;
mod meta;
mod reports;
mod requests;

use axum::Router;

use crate::middleware::AppState;

/// Create the API router.
pub fn router() -> Router<AppState> {
    Router::new()
        .nest("/meta", meta::router())
        .nest("/accounts", accounts::router())
        .nest("/categories", categories::router())
        .nest("/requests", requests::router())
        .nest("/reports", reports::router())
}

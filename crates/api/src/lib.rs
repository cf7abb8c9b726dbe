//! HTTP API layer for carelink.
//!
//! Thin axum routers over the core services:
//!
//! - **Endpoints**: accounts, categories, requests, reports, meta
//! - **Middleware**: shared application state
//! - **Response**: uniform JSON envelope
//!
//! Built on Axum 0.8 with Tower middleware stack.

pub mod endpoints;
pub mod middleware;
pub mod response;

pub use endpoints::router;
pub use middleware::AppState;

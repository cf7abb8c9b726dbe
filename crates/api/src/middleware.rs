//! API middleware.

use carelink_core::{AccountService, CategoryService, ReportService, RequestService};

/// Application state shared across all endpoint handlers.
#[derive(Clone)]
pub struct AppState {
    pub account_service: AccountService,
    pub category_service: CategoryService,
    pub request_service: RequestService,
    pub report_service: ReportService,
}

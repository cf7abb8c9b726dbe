//! Core business logic for carelink.

pub mod period;
pub mod services;

pub use period::ReportPeriod;
pub use services::*;

//! Business logic services.

pub mod account;
pub mod category;
pub mod report;
pub mod request;
pub mod seed;

pub use account::{AccountService, RegisterAccountInput};
pub use category::{CategoryService, CreateCategoryInput};
pub use report::{CategoryBreakdown, ReportData, ReportService, ReportSummary};
pub use request::{CompleteRequestInput, CreateRequestInput, RequestService};
pub use seed::{SeedService, SeedSummary};

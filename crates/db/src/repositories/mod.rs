//! Database repositories.

pub mod category;
pub mod match_record;
pub mod report;
pub mod request;
pub mod shortlist;
pub mod user;

pub use category::CategoryRepository;
pub use match_record::MatchRecordRepository;
pub use report::ReportRepository;
pub use request::{CategoryStatusCount, RequestRepository};
pub use shortlist::ShortlistRepository;
pub use user::UserRepository;

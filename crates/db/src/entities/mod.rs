//! Database entities.

pub mod category;
pub mod match_record;
pub mod report;
pub mod request;
pub mod shortlist;
pub mod user_account;
pub mod user_profile;

pub use category::Entity as Category;
pub use match_record::Entity as MatchRecord;
pub use report::Entity as Report;
pub use request::Entity as Request;
pub use shortlist::Entity as Shortlist;
pub use user_account::Entity as UserAccount;
pub use user_profile::Entity as UserProfile;

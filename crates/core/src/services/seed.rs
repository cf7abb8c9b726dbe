//! Deterministic demo-data seeder.
//!
//! Resets the schema and repopulates it with a fixed demo dataset: four
//! fixed logins, twenty extra accounts, three categories, thirty generated
//! requests plus two hand-authored reference requests, and matching
//! shortlist / match-record / report rows. All derivation rules are pure
//! functions of the running request index, so repeated runs produce the
//! same content.

use std::sync::Arc;

use carelink_common::AppResult;
use carelink_db::{
    entities::{
        category, match_record, report, request, shortlist, user_account, user_profile,
        user_profile::{
            PROFILE_CSR_REP, PROFILE_PERSON_IN_NEED, PROFILE_PLATFORM_MANAGER, PROFILE_USER_ADMIN,
        },
    },
    repositories::{
        CategoryRepository, MatchRecordRepository, ReportRepository, RequestRepository,
        ShortlistRepository, UserRepository,
    },
};
use chrono::{DateTime, Duration, Utc};
use sea_orm::{DatabaseConnection, Set};
use tracing::info;

/// Shared demo password for every seeded account.
const DEMO_PASSWORD: &str = "1234";

/// Requests generated per category.
const REQUESTS_PER_CATEGORY: i64 = 10;

/// Extra CSR / PIN accounts created on top of the fixed logins.
const EXTRA_USERS_PER_ROLE: i64 = 10;

/// Row counts produced by a seed run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeedSummary {
    pub users: u64,
    pub categories: u64,
    pub requests: u64,
    pub open_requests: u64,
    pub closed_requests: u64,
    pub shortlists: u64,
    pub match_records: u64,
    pub reports: u64,
}

/// Service that wipes and reseeds the database with demo data.
///
/// Destroys all existing data; intended for dev and demo environments only.
#[derive(Clone)]
pub struct SeedService {
    db: Arc<DatabaseConnection>,
}

impl SeedService {
    /// Create a new seed service.
    #[must_use]
    pub const fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Reset the schema and insert the demo dataset.
    pub async fn run(&self) -> AppResult<SeedSummary> {
        info!("Resetting database schema");
        carelink_db::reset(&self.db).await?;

        let user_repo = UserRepository::new(Arc::clone(&self.db));
        let category_repo = CategoryRepository::new(Arc::clone(&self.db));
        let request_repo = RequestRepository::new(Arc::clone(&self.db));
        let shortlist_repo = ShortlistRepository::new(Arc::clone(&self.db));
        let match_repo = MatchRecordRepository::new(Arc::clone(&self.db));
        let report_repo = ReportRepository::new(Arc::clone(&self.db));

        let now = Utc::now();
        // Every demo account shares the same password, so hash it once.
        let password_hash = super::account::hash_password(DEMO_PASSWORD)?;

        // Role profiles
        let p_admin = user_repo
            .create_profile(profile(PROFILE_USER_ADMIN, "Manages users and profiles"))
            .await?;
        let p_csr = user_repo
            .create_profile(profile(
                PROFILE_CSR_REP,
                "Corporate Social Responsibility representative",
            ))
            .await?;
        let p_pin = user_repo
            .create_profile(profile(PROFILE_PERSON_IN_NEED, "Person in Need"))
            .await?;
        let p_pm = user_repo
            .create_profile(profile(
                PROFILE_PLATFORM_MANAGER,
                "Manages categories and reports",
            ))
            .await?;

        // Fixed logins
        let _admin = user_repo
            .create(account(
                "Admin User",
                "admin@test.com",
                p_admin.id,
                1,
                35,
                &password_hash,
                now,
            ))
            .await?;
        let csr = user_repo
            .create(account(
                "CSR User",
                "csr@test.com",
                p_csr.id,
                2,
                32,
                &password_hash,
                now,
            ))
            .await?;
        let pin = user_repo
            .create(account(
                "PIN User",
                "pin@test.com",
                p_pin.id,
                3,
                66,
                &password_hash,
                now,
            ))
            .await?;
        let pm = user_repo
            .create(account(
                "PM User",
                "pm@test.com",
                p_pm.id,
                4,
                40,
                &password_hash,
                now,
            ))
            .await?;

        // Extra CSR and PIN accounts
        let mut extra_csrs = Vec::with_capacity(EXTRA_USERS_PER_ROLE as usize);
        for i in 1..=EXTRA_USERS_PER_ROLE {
            extra_csrs.push(
                user_repo
                    .create(account(
                        &format!("CSR Rep {i:02}"),
                        &format!("csr+{i:02}@test.com"),
                        p_csr.id,
                        100 + i,
                        extra_csr_age(i),
                        &password_hash,
                        now,
                    ))
                    .await?,
            );
        }

        let mut extra_pins = Vec::with_capacity(EXTRA_USERS_PER_ROLE as usize);
        for i in 1..=EXTRA_USERS_PER_ROLE {
            extra_pins.push(
                user_repo
                    .create(account(
                        &format!("PIN Person {i:02}"),
                        &format!("pin+{i:02}@test.com"),
                        p_pin.id,
                        200 + i,
                        extra_pin_age(i),
                        &password_hash,
                        now,
                    ))
                    .await?,
            );
        }

        let users = 4 + 2 * EXTRA_USERS_PER_ROLE as u64;

        // Categories, with a fixed title/description pair each
        let category_specs: [(&str, &str, &str, &str); 3] = [
            (
                "Transportation",
                "Transport assistance",
                "Transport to appointment",
                "Wheelchair-friendly transport needed",
            ),
            (
                "Medical Aid",
                "Medical support",
                "Medical supply support",
                "Request for basic medical items",
            ),
            (
                "Food Support",
                "Food & groceries",
                "Groceries delivery assistance",
                "Weekly groceries delivery preferred",
            ),
        ];

        let mut categories = Vec::with_capacity(category_specs.len());
        for (name, description, _, _) in &category_specs {
            categories.push(
                category_repo
                    .create(category::ActiveModel {
                        name: Set((*name).to_string()),
                        description: Set((*description).to_string()),
                        is_active: Set(true),
                        created_at: Set(now),
                        ..Default::default()
                    })
                    .await?,
            );
        }

        // Generated requests: 10 per category, spread over the last 14 days.
        // Even indexes get a shortlist, every third index closes with a
        // completed match record.
        let mut open_requests = 0u64;
        let mut closed_requests = 0u64;
        let mut shortlists = 0u64;
        let mut match_records = 0u64;

        let mut req_index: i64 = 0;
        for (cat_slot, cat) in categories.iter().enumerate() {
            let (_, _, title, description) = category_specs[cat_slot];
            for _ in 0..REQUESTS_PER_CATEGORY {
                req_index += 1;
                let i = req_index;

                let created = now - Duration::days(request_age_days(i));
                let pin_id = match extra_pin_slot(i) {
                    Some(slot) => extra_pins[slot].id,
                    None => pin.id,
                };
                let closed_at = request_closes(i).then(|| created + Duration::days(closure_delay_days(i)));
                let is_shortlisted = request_is_shortlisted(i);

                let status = if closed_at.is_some() {
                    request::STATUS_CLOSED
                } else {
                    request::STATUS_OPEN
                };

                let stored = request_repo
                    .create(request::ActiveModel {
                        pin_id: Set(pin_id),
                        category_id: Set(cat.id),
                        title: Set(title.to_string()),
                        description: Set(description.to_string()),
                        status: Set(status.to_string()),
                        view_count: Set(request_view_count(i)),
                        shortlist_count: Set(i32::from(is_shortlisted)),
                        created_at: Set(created),
                        closed_at: Set(closed_at),
                        ..Default::default()
                    })
                    .await?;

                let rotating_csr_id = match rotating_csr_slot(i) {
                    Some(slot) => extra_csrs[slot].id,
                    None => csr.id,
                };

                if is_shortlisted {
                    shortlist_repo
                        .create(shortlist::ActiveModel {
                            csr_id: Set(rotating_csr_id),
                            request_id: Set(stored.id),
                            created_at: Set(now),
                            ..Default::default()
                        })
                        .await?;
                    shortlists += 1;
                }

                if let Some(closed) = closed_at {
                    match_repo
                        .create(match_record::ActiveModel {
                            request_id: Set(stored.id),
                            csr_id: Set(rotating_csr_id),
                            pin_id: Set(pin_id),
                            category_id: Set(cat.id),
                            status: Set(match_record::STATUS_COMPLETED.to_string()),
                            matched_at: Set(created + Duration::hours(6)),
                            completed_at: Set(completion_timestamp(closed, i)),
                            ..Default::default()
                        })
                        .await?;
                    match_records += 1;
                    closed_requests += 1;
                } else {
                    open_requests += 1;
                }
            }
        }

        // Two hand-authored reference requests
        let r1 = request_repo
            .create(request::ActiveModel {
                pin_id: Set(pin.id),
                category_id: Set(categories[0].id),
                title: Set("Wheelchair-friendly transport needed".to_string()),
                description: Set("Pickup to hospital appointment".to_string()),
                status: Set(request::STATUS_CLOSED.to_string()),
                view_count: Set(3),
                shortlist_count: Set(1),
                created_at: Set(now - Duration::days(5)),
                closed_at: Set(Some(now - Duration::days(3))),
                ..Default::default()
            })
            .await?;
        closed_requests += 1;

        request_repo
            .create(request::ActiveModel {
                pin_id: Set(pin.id),
                category_id: Set(categories[2].id),
                title: Set("Groceries delivery assistance".to_string()),
                description: Set("Weekly delivery preferred".to_string()),
                status: Set(request::STATUS_OPEN.to_string()),
                view_count: Set(1),
                shortlist_count: Set(0),
                created_at: Set(now - Duration::days(2)),
                closed_at: Set(None),
                ..Default::default()
            })
            .await?;
        open_requests += 1;

        shortlist_repo
            .create(shortlist::ActiveModel {
                csr_id: Set(csr.id),
                request_id: Set(r1.id),
                created_at: Set(now),
                ..Default::default()
            })
            .await?;
        shortlists += 1;

        match_repo
            .create(match_record::ActiveModel {
                request_id: Set(r1.id),
                csr_id: Set(csr.id),
                pin_id: Set(pin.id),
                category_id: Set(categories[0].id),
                status: Set(match_record::STATUS_COMPLETED.to_string()),
                matched_at: Set(now - Duration::days(4) - Duration::hours(2)),
                completed_at: Set(now - Duration::days(3) - Duration::hours(1)),
                ..Default::default()
            })
            .await?;
        match_records += 1;

        // Placeholder reports for the platform manager
        let placeholders: [(&str, &str, String, &str); 3] = [
            (
                "Daily System Report - Demo",
                report::TYPE_DAILY,
                (now - Duration::days(1)).format("%Y-%m-%d").to_string(),
                r#"{"summary": {"note":"daily demo data"}}"#,
            ),
            (
                "Weekly System Report - Demo",
                report::TYPE_WEEKLY,
                (now - Duration::days(7)).format("%Y-W%U").to_string(),
                r#"{"summary": {"note":"weekly demo data"}}"#,
            ),
            (
                "Monthly System Report - Demo",
                report::TYPE_MONTHLY,
                now.format("%Y-%m").to_string(),
                r#"{"summary": {"note":"monthly demo data"}}"#,
            ),
        ];

        let reports = placeholders.len() as u64;
        for (title, report_type, period, data) in placeholders {
            report_repo
                .create(report::ActiveModel {
                    title: Set(title.to_string()),
                    report_type: Set(report_type.to_string()),
                    generated_by: Set(pm.id),
                    period: Set(period),
                    data: Set(data.to_string()),
                    created_at: Set(now),
                    ..Default::default()
                })
                .await?;
        }

        let summary = SeedSummary {
            users,
            categories: categories.len() as u64,
            requests: open_requests + closed_requests,
            open_requests,
            closed_requests,
            shortlists,
            match_records,
            reports,
        };

        info!(
            users = summary.users,
            requests = summary.requests,
            match_records = summary.match_records,
            "Seed complete"
        );

        Ok(summary)
    }
}

fn profile(name: &str, description: &str) -> user_profile::ActiveModel {
    user_profile::ActiveModel {
        name: Set(name.to_string()),
        description: Set(description.to_string()),
        ..Default::default()
    }
}

#[allow(clippy::too_many_arguments)]
fn account(
    name: &str,
    email: &str,
    profile_id: i32,
    phone_idx: i64,
    age: i32,
    password_hash: &str,
    created_at: DateTime<Utc>,
) -> user_account::ActiveModel {
    user_account::ActiveModel {
        name: Set(name.to_string()),
        email: Set(email.to_string()),
        password_hash: Set(password_hash.to_string()),
        profile_id: Set(profile_id),
        phone_number: Set(demo_phone(phone_idx)),
        age: Set(age),
        is_active: Set(true),
        created_at: Set(created_at),
        ..Default::default()
    }
}

/// Deterministic Singapore-style 8-digit phone number.
fn demo_phone(idx: i64) -> String {
    (81_230_000 + idx).to_string()
}

fn extra_csr_age(i: i64) -> i32 {
    (28 + i % 10) as i32
}

fn extra_pin_age(i: i64) -> i32 {
    (55 + i % 15) as i32
}

/// Days in the past the i-th request was created (1 to 12).
fn request_age_days(i: i64) -> i64 {
    i % 12 + 1
}

fn request_view_count(i: i64) -> i32 {
    (i % 5 + 1) as i32
}

/// Requester of the i-th request: `None` means the fixed PIN login,
/// `Some(slot)` indexes into the ten extra PIN accounts.
fn extra_pin_slot(i: i64) -> Option<usize> {
    if i % 11 == 0 {
        None
    } else {
        Some(((i - 1) % EXTRA_USERS_PER_ROLE) as usize)
    }
}

/// Shortlisting CSR of the i-th request: `None` means the fixed CSR login,
/// `Some(slot)` indexes into the ten extra CSR accounts. The rotation pool
/// is the fixed CSR followed by the ten extras, cycled by `i % 11`.
fn rotating_csr_slot(i: i64) -> Option<usize> {
    let pool_slot = i % (EXTRA_USERS_PER_ROLE + 1);
    if pool_slot == 0 {
        None
    } else {
        Some((pool_slot - 1) as usize)
    }
}

fn request_is_shortlisted(i: i64) -> bool {
    i % 2 == 0
}

fn request_closes(i: i64) -> bool {
    i % 3 == 0
}

/// Days between creation and closure (1 to 4).
fn closure_delay_days(i: i64) -> i64 {
    1 + i % 4
}

/// Completion wall-clock time of the i-th request.
fn completion_clock(i: i64) -> (u32, u32) {
    (((8 + i) % 20) as u32, ((5 * i) % 60) as u32)
}

/// The completion timestamp: the closure date with the deterministic
/// wall-clock time applied.
fn completion_timestamp(closed_at: DateTime<Utc>, i: i64) -> DateTime<Utc> {
    let (hour, minute) = completion_clock(i);
    closed_at
        .date_naive()
        .and_hms_opt(hour, minute, 0)
        .unwrap_or_else(|| closed_at.naive_utc())
        .and_utc()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_demo_phone_is_deterministic() {
        assert_eq!(demo_phone(1), "81230001");
        assert_eq!(demo_phone(204), "81230204");
    }

    #[test]
    fn test_extra_ages_follow_the_rotation() {
        assert_eq!(extra_csr_age(1), 29);
        assert_eq!(extra_csr_age(10), 28);
        assert_eq!(extra_pin_age(1), 56);
        assert_eq!(extra_pin_age(10), 65);
    }

    #[test]
    fn test_fixed_pin_takes_every_eleventh_request() {
        assert_eq!(extra_pin_slot(11), None);
        assert_eq!(extra_pin_slot(22), None);
        assert_eq!(extra_pin_slot(1), Some(0));
        assert_eq!(extra_pin_slot(12), Some(1));
        assert_eq!(extra_pin_slot(30), Some(9));
    }

    #[test]
    fn test_csr_rotation_cycles_through_the_pool_of_eleven() {
        assert_eq!(rotating_csr_slot(11), None);
        assert_eq!(rotating_csr_slot(1), Some(0));
        assert_eq!(rotating_csr_slot(10), Some(9));
        assert_eq!(rotating_csr_slot(12), Some(0));
    }

    #[test]
    fn test_completion_clock_stays_in_range() {
        for i in 1..=30 {
            let (hour, minute) = completion_clock(i);
            assert!(hour < 20, "hour {hour} out of range for i={i}");
            assert!(minute < 60, "minute {minute} out of range for i={i}");
        }
        assert_eq!(completion_clock(9), (17, 45));
        assert_eq!(completion_clock(12), (0, 0));
    }

    #[test]
    fn test_completion_timestamp_keeps_the_closure_date() {
        let closed = Utc::now() + Duration::days(2);
        let completed = completion_timestamp(closed, 7);

        assert_eq!(completed.date_naive(), closed.date_naive());
        let (hour, minute) = completion_clock(7);
        assert_eq!(
            completed.format("%H:%M:%S").to_string(),
            format!("{hour:02}:{minute:02}:00")
        );
    }

    /// Simulates the generated-request loop and pins the documented totals:
    /// 30 generated + 2 reference = 32 requests, 21 open / 11 closed,
    /// 16 shortlists and 11 match records after the reference rows.
    #[test]
    fn test_seed_rules_produce_the_documented_totals() {
        let mut shortlists = 0u64;
        let mut closed = 0u64;

        for i in 1..=3 * REQUESTS_PER_CATEGORY {
            if request_is_shortlisted(i) {
                shortlists += 1;
            }
            if request_closes(i) {
                closed += 1;
            }
        }

        assert_eq!(shortlists, 15);
        assert_eq!(closed, 10);

        // Reference rows add one closed+matched request and one open one.
        assert_eq!(shortlists + 1, 16);
        assert_eq!(closed + 1, 11);
        let total = 3 * REQUESTS_PER_CATEGORY as u64 + 2;
        assert_eq!(total, 32);
        assert_eq!(total - (closed + 1), 21);
    }

    #[tokio::test]
    async fn test_run_resets_the_schema_before_inserting_anything() {
        use sea_orm::{DatabaseBackend, MockDatabase};

        // An unprepared mock fails on the first statement it sees. Since the
        // schema reset issues the first statements, the run aborts there and
        // no demo row may reach the transaction log.
        let db = Arc::new(MockDatabase::new(DatabaseBackend::Postgres).into_connection());

        let service = SeedService::new(Arc::clone(&db));
        let result = service.run().await;
        assert!(result.is_err());

        drop(service);
        let Ok(conn) = Arc::try_unwrap(db) else {
            panic!("connection still shared");
        };
        let log = format!("{:?}", conn.into_transaction_log());
        assert!(
            !log.contains("INSERT"),
            "no insert may run before the schema reset, got: {log}"
        );
    }

    #[test]
    fn test_match_timestamps_are_ordered() {
        let now = Utc::now();
        for i in (3..=30).step_by(3) {
            let created = now - Duration::days(request_age_days(i));
            let matched = created + Duration::hours(6);
            let closed = created + Duration::days(closure_delay_days(i));
            let completed = completion_timestamp(closed, i);

            assert!(matched > created);
            assert!(closed > matched);
            // Completion keeps the closure date even after the clock rewrite
            assert_eq!(completed.date_naive(), closed.date_naive());
        }
    }
}

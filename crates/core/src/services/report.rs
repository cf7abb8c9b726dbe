//! Report generation service.
//!
//! Produces daily, weekly and monthly reports: an aggregate snapshot of
//! platform statistics serialized to JSON and persisted as an immutable
//! report row.

use std::collections::BTreeMap;

use carelink_common::{AppError, AppResult};
use carelink_db::{
    entities::{
        category, report,
        report::{TYPE_DAILY, TYPE_MONTHLY, TYPE_WEEKLY},
        request::{STATUS_CLOSED, STATUS_OPEN},
    },
    repositories::{
        CategoryRepository, CategoryStatusCount, MatchRecordRepository, ReportRepository,
        RequestRepository, UserRepository,
    },
};
use chrono::{Duration, Utc};
use sea_orm::Set;
use serde::{Deserialize, Serialize};
use tracing::info;

/// How far back the "recent matches" counter looks, in days.
const RECENT_MATCH_WINDOW_DAYS: i64 = 30;

/// Global aggregate counters of the platform.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportSummary {
    /// Total registered accounts.
    pub total_users: u64,
    /// Total requests ever filed.
    pub total_requests: u64,
    /// Requests currently open.
    pub open_requests: u64,
    /// Requests closed.
    pub closed_requests: u64,
    /// Total match records.
    pub total_matches: u64,
    /// Matches completed within the trailing 30-day window, measured from
    /// generation time (closed lower bound).
    pub recent_matches_30_days: u64,
}

/// Per-category request counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryBreakdown {
    /// Requests filed under the category.
    pub total_requests: u64,
    /// Of those, currently open.
    pub open_requests: u64,
    /// Of those, closed.
    pub closed_requests: u64,
}

/// The JSON document stored in a report's data column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportData {
    /// Global counters.
    pub summary: ReportSummary,
    /// One entry per category, keyed by category name.
    pub category_breakdown: BTreeMap<String, CategoryBreakdown>,
}

/// Service that generates and reads stored reports.
#[derive(Clone)]
pub struct ReportService {
    user_repo: UserRepository,
    request_repo: RequestRepository,
    match_repo: MatchRecordRepository,
    category_repo: CategoryRepository,
    report_repo: ReportRepository,
}

impl ReportService {
    /// Create a new report service.
    #[must_use]
    pub const fn new(
        user_repo: UserRepository,
        request_repo: RequestRepository,
        match_repo: MatchRecordRepository,
        category_repo: CategoryRepository,
        report_repo: ReportRepository,
    ) -> Self {
        Self {
            user_repo,
            request_repo,
            match_repo,
            category_repo,
            report_repo,
        }
    }

    /// Generate and persist a daily report for `YYYY-MM-DD`.
    pub async fn generate_daily(&self, manager_id: i32, label: &str) -> AppResult<report::Model> {
        crate::period::ReportPeriod::parse_daily(label)?;
        self.generate(manager_id, label, TYPE_DAILY, "Daily").await
    }

    /// Generate and persist a weekly report for `YYYY-Www`.
    ///
    /// The label's ISO week resolves to a Monday-anchored window, but the
    /// aggregate counts are global, all-time values; the window only
    /// validates the label. Changing this to window-scoped counts would
    /// change every stored report, so the behavior is pinned by tests.
    pub async fn generate_weekly(&self, manager_id: i32, label: &str) -> AppResult<report::Model> {
        crate::period::ReportPeriod::parse_weekly(label)?;
        self.generate(manager_id, label, TYPE_WEEKLY, "Weekly").await
    }

    /// Generate and persist a monthly report for `YYYY-MM`.
    pub async fn generate_monthly(&self, manager_id: i32, label: &str) -> AppResult<report::Model> {
        crate::period::ReportPeriod::parse_monthly(label)?;
        self.generate(manager_id, label, TYPE_MONTHLY, "Monthly")
            .await
    }

    /// Get a stored report by ID.
    pub async fn get_by_id(&self, id: i32) -> AppResult<report::Model> {
        self.report_repo.get_by_id(id).await
    }

    /// List stored reports, newest first.
    pub async fn list(&self, limit: u64, offset: u64) -> AppResult<Vec<report::Model>> {
        self.report_repo.find_all(limit, offset).await
    }

    /// Compute the current global aggregate snapshot.
    pub async fn snapshot(&self) -> AppResult<ReportData> {
        let total_users = self.user_repo.count().await?;
        let total_requests = self.request_repo.count().await?;
        let open_requests = self.request_repo.count_by_status(STATUS_OPEN).await?;
        let closed_requests = self.request_repo.count_by_status(STATUS_CLOSED).await?;
        let total_matches = self.match_repo.count().await?;

        let cutoff = Utc::now() - Duration::days(RECENT_MATCH_WINDOW_DAYS);
        let recent_matches_30_days = self.match_repo.count_completed_since(cutoff).await?;

        let categories = self.category_repo.find_all().await?;
        let rows = self.request_repo.count_by_category_and_status().await?;

        Ok(ReportData {
            summary: ReportSummary {
                total_users,
                total_requests,
                open_requests,
                closed_requests,
                total_matches,
                recent_matches_30_days,
            },
            category_breakdown: build_breakdown(&categories, &rows),
        })
    }

    async fn generate(
        &self,
        manager_id: i32,
        label: &str,
        report_type: &str,
        title_prefix: &str,
    ) -> AppResult<report::Model> {
        let data = self.snapshot().await?;
        let json = serde_json::to_string(&data)
            .map_err(|e| AppError::Internal(format!("Failed to serialize report data: {e}")))?;

        let stored = self
            .report_repo
            .create(report::ActiveModel {
                title: Set(format!("{title_prefix} Report - {label}")),
                report_type: Set(report_type.to_string()),
                generated_by: Set(manager_id),
                period: Set(label.to_string()),
                data: Set(json),
                created_at: Set(Utc::now()),
                ..Default::default()
            })
            .await?;

        info!(
            report_id = stored.id,
            report_type,
            period = label,
            "Generated report"
        );

        Ok(stored)
    }
}

/// Build the per-category breakdown from the grouped aggregate rows.
///
/// Every category present in the category table gets exactly one entry,
/// keyed by name and zero-filled when it has no requests.
fn build_breakdown(
    categories: &[category::Model],
    rows: &[CategoryStatusCount],
) -> BTreeMap<String, CategoryBreakdown> {
    let mut breakdown: BTreeMap<String, CategoryBreakdown> = categories
        .iter()
        .map(|c| (c.name.clone(), CategoryBreakdown::default()))
        .collect();

    for row in rows {
        let Some(name) = categories
            .iter()
            .find(|c| c.id == row.category_id)
            .map(|c| c.name.as_str())
        else {
            continue;
        };
        let Some(entry) = breakdown.get_mut(name) else {
            continue;
        };

        let count = row.count.max(0) as u64;
        entry.total_requests += count;
        match row.status.as_str() {
            STATUS_OPEN => entry.open_requests += count,
            STATUS_CLOSED => entry.closed_requests += count,
            _ => {}
        }
    }

    breakdown
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use chrono::Utc;
    use sea_orm::{DatabaseBackend, MockDatabase, MockExecResult};
    use std::sync::Arc;

    fn test_category(id: i32, name: &str) -> category::Model {
        category::Model {
            id,
            name: name.to_string(),
            description: "Test".to_string(),
            is_active: true,
            created_at: Utc::now(),
        }
    }

    fn count_row(n: i64) -> std::collections::BTreeMap<&'static str, sea_orm::Value> {
        maplit::btreemap! {
            "num_items" => sea_orm::Value::BigInt(Some(n))
        }
    }

    fn grouped_row(
        category_id: i32,
        status: &str,
        count: i64,
    ) -> std::collections::BTreeMap<&'static str, sea_orm::Value> {
        maplit::btreemap! {
            "category_id" => sea_orm::Value::Int(Some(category_id)),
            "status" => sea_orm::Value::String(Some(Box::new(status.to_string()))),
            "count" => sea_orm::Value::BigInt(Some(count)),
        }
    }

    fn service_with(db: Arc<sea_orm::DatabaseConnection>) -> ReportService {
        ReportService::new(
            UserRepository::new(Arc::clone(&db)),
            RequestRepository::new(Arc::clone(&db)),
            MatchRecordRepository::new(Arc::clone(&db)),
            CategoryRepository::new(Arc::clone(&db)),
            ReportRepository::new(db),
        )
    }

    #[test]
    fn breakdown_has_exactly_one_entry_per_category() {
        let categories = vec![
            test_category(1, "Transportation"),
            test_category(2, "Medical Aid"),
            test_category(3, "Food Support"),
        ];
        let rows = vec![
            CategoryStatusCount {
                category_id: 1,
                status: STATUS_OPEN.to_string(),
                count: 7,
            },
            CategoryStatusCount {
                category_id: 1,
                status: STATUS_CLOSED.to_string(),
                count: 3,
            },
            CategoryStatusCount {
                category_id: 2,
                status: STATUS_OPEN.to_string(),
                count: 10,
            },
        ];

        let breakdown = build_breakdown(&categories, &rows);

        assert_eq!(breakdown.len(), 3);
        assert_eq!(breakdown["Transportation"].total_requests, 10);
        assert_eq!(breakdown["Transportation"].open_requests, 7);
        assert_eq!(breakdown["Transportation"].closed_requests, 3);
        assert_eq!(breakdown["Medical Aid"].total_requests, 10);
        // No requests: present and zero-filled
        assert_eq!(breakdown["Food Support"], CategoryBreakdown::default());
    }

    #[test]
    fn breakdown_open_plus_closed_equals_total() {
        let categories = vec![test_category(1, "Transportation")];
        let rows = vec![
            CategoryStatusCount {
                category_id: 1,
                status: STATUS_OPEN.to_string(),
                count: 7,
            },
            CategoryStatusCount {
                category_id: 1,
                status: STATUS_CLOSED.to_string(),
                count: 3,
            },
        ];

        let breakdown = build_breakdown(&categories, &rows);

        for entry in breakdown.values() {
            assert_eq!(
                entry.open_requests + entry.closed_requests,
                entry.total_requests
            );
        }
    }

    #[test]
    fn breakdown_ignores_rows_for_unknown_categories() {
        let categories = vec![test_category(1, "Transportation")];
        let rows = vec![CategoryStatusCount {
            category_id: 99,
            status: STATUS_OPEN.to_string(),
            count: 4,
        }];

        let breakdown = build_breakdown(&categories, &rows);

        assert_eq!(breakdown.len(), 1);
        assert_eq!(breakdown["Transportation"].total_requests, 0);
    }

    #[test]
    fn report_data_serializes_with_expected_shape() {
        let data = ReportData {
            summary: ReportSummary {
                total_users: 24,
                total_requests: 32,
                open_requests: 21,
                closed_requests: 11,
                total_matches: 11,
                recent_matches_30_days: 11,
            },
            category_breakdown: BTreeMap::new(),
        };

        let value: serde_json::Value =
            serde_json::from_str(&serde_json::to_string(&data).unwrap()).unwrap();

        assert_eq!(value["summary"]["total_requests"], 32);
        assert_eq!(value["summary"]["recent_matches_30_days"], 11);
        assert!(value["category_breakdown"].is_object());
    }

    /// Mocked query results in the order `snapshot` issues its queries.
    fn snapshot_query_results(db: MockDatabase) -> MockDatabase {
        db.append_query_results([vec![count_row(24)]]) // users
            .append_query_results([vec![count_row(32)]]) // total requests
            .append_query_results([vec![count_row(21)]]) // open
            .append_query_results([vec![count_row(11)]]) // closed
            .append_query_results([vec![count_row(11)]]) // matches
            .append_query_results([vec![count_row(11)]]) // recent matches
            .append_query_results([vec![
                test_category(1, "Transportation"),
                test_category(2, "Medical Aid"),
                test_category(3, "Food Support"),
            ]])
            .append_query_results([vec![
                grouped_row(1, STATUS_OPEN, 7),
                grouped_row(1, STATUS_CLOSED, 4),
                grouped_row(2, STATUS_OPEN, 7),
                grouped_row(2, STATUS_CLOSED, 3),
                grouped_row(3, STATUS_OPEN, 7),
                grouped_row(3, STATUS_CLOSED, 4),
            ]])
    }

    #[tokio::test]
    async fn snapshot_reports_global_counts() {
        let db = Arc::new(
            snapshot_query_results(MockDatabase::new(DatabaseBackend::Postgres))
                .into_connection(),
        );

        let service = service_with(db);
        let data = service.snapshot().await.unwrap();

        assert_eq!(data.summary.total_users, 24);
        assert_eq!(data.summary.total_requests, 32);
        assert_eq!(
            data.summary.open_requests + data.summary.closed_requests,
            data.summary.total_requests
        );
        assert_eq!(data.category_breakdown.len(), 3);

        let breakdown_total: u64 = data
            .category_breakdown
            .values()
            .map(|e| e.total_requests)
            .sum();
        assert_eq!(breakdown_total, data.summary.total_requests);
    }

    #[tokio::test]
    async fn generate_weekly_persists_period_verbatim() {
        let stored = report::Model {
            id: 1,
            title: "Weekly Report - 2025-W43".to_string(),
            report_type: TYPE_WEEKLY.to_string(),
            generated_by: 4,
            period: "2025-W43".to_string(),
            data: "{}".to_string(),
            created_at: Utc::now(),
        };

        let db = Arc::new(
            snapshot_query_results(MockDatabase::new(DatabaseBackend::Postgres))
                .append_query_results([[stored]])
                .append_exec_results([MockExecResult {
                    last_insert_id: 1,
                    rows_affected: 1,
                }])
                .into_connection(),
        );

        let service = service_with(db);
        let report = service.generate_weekly(4, "2025-W43").await.unwrap();

        assert_eq!(report.period, "2025-W43");
        assert_eq!(report.report_type, TYPE_WEEKLY);
        assert_eq!(report.title, "Weekly Report - 2025-W43");
    }

    #[tokio::test]
    async fn generate_weekly_rejects_malformed_label_before_touching_storage() {
        // No mocked results: any query would fail the test, proving the
        // label is rejected before partial state can be written.
        let db = Arc::new(MockDatabase::new(DatabaseBackend::Postgres).into_connection());

        let service = service_with(db);
        for label in ["not-a-week", "2025-WXX", "2025-W99", "25-W10"] {
            let result = service.generate_weekly(4, label).await;
            assert!(
                matches!(result, Err(AppError::InvalidPeriodFormat(_))),
                "label {label:?} should be rejected"
            );
        }
    }

    #[tokio::test]
    async fn generate_daily_and_monthly_validate_their_labels() {
        let db = Arc::new(MockDatabase::new(DatabaseBackend::Postgres).into_connection());
        let service = service_with(db);

        let daily = service.generate_daily(4, "2025-13-40").await;
        assert!(matches!(daily, Err(AppError::InvalidPeriodFormat(_))));

        let monthly = service.generate_monthly(4, "2025-13").await;
        assert!(matches!(monthly, Err(AppError::InvalidPeriodFormat(_))));
    }
}

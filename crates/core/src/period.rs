//! Report period parsing.
//!
//! Period labels come in three granularities: `YYYY-MM-DD` (daily),
//! `YYYY-Www` (ISO week, e.g. `2025-W43`) and `YYYY-MM` (monthly). Malformed
//! labels fail with [`AppError::InvalidPeriodFormat`] so the calling boundary
//! can return a user-facing validation message instead of a 500.

use carelink_common::{AppError, AppResult};
use chrono::{DateTime, Months, NaiveDate, NaiveTime, Utc, Weekday};

/// A validated report period.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportPeriod {
    /// A single calendar day.
    Daily(NaiveDate),
    /// An ISO week, anchored at its Monday.
    Weekly {
        /// ISO week-numbering year.
        year: i32,
        /// ISO week number (1-53).
        week: u32,
        /// Monday of the week.
        monday: NaiveDate,
    },
    /// A calendar month, anchored at its first day.
    Monthly {
        /// Calendar year.
        year: i32,
        /// Month number (1-12).
        month: u32,
        /// First day of the month.
        first_day: NaiveDate,
    },
}

impl ReportPeriod {
    /// Parse a daily period label (`YYYY-MM-DD`).
    pub fn parse_daily(label: &str) -> AppResult<Self> {
        if label.len() != 10 {
            return Err(invalid(label, "expected YYYY-MM-DD"));
        }
        let date = NaiveDate::parse_from_str(label, "%Y-%m-%d")
            .map_err(|_| invalid(label, "expected YYYY-MM-DD"))?;
        Ok(Self::Daily(date))
    }

    /// Parse a weekly period label (`YYYY-Www`).
    ///
    /// The year must be 4 digits and the week 1-2 digits; week numbers past
    /// the end of the ISO year (e.g. `2025-W99`) are rejected.
    pub fn parse_weekly(label: &str) -> AppResult<Self> {
        let (year_part, week_part) = label
            .split_once("-W")
            .ok_or_else(|| invalid(label, "expected YYYY-Www"))?;

        if year_part.len() != 4 || !year_part.chars().all(|c| c.is_ascii_digit()) {
            return Err(invalid(label, "expected a 4-digit year"));
        }
        if week_part.is_empty()
            || week_part.len() > 2
            || !week_part.chars().all(|c| c.is_ascii_digit())
        {
            return Err(invalid(label, "expected a 1-2 digit week number"));
        }

        let year: i32 = year_part
            .parse()
            .map_err(|_| invalid(label, "expected a 4-digit year"))?;
        let week: u32 = week_part
            .parse()
            .map_err(|_| invalid(label, "expected a 1-2 digit week number"))?;

        let monday = NaiveDate::from_isoywd_opt(year, week, Weekday::Mon)
            .ok_or_else(|| invalid(label, "week number out of range for year"))?;

        Ok(Self::Weekly { year, week, monday })
    }

    /// Parse a monthly period label (`YYYY-MM`).
    pub fn parse_monthly(label: &str) -> AppResult<Self> {
        let (year_part, month_part) = label
            .split_once('-')
            .ok_or_else(|| invalid(label, "expected YYYY-MM"))?;

        if year_part.len() != 4 || !year_part.chars().all(|c| c.is_ascii_digit()) {
            return Err(invalid(label, "expected a 4-digit year"));
        }
        if month_part.len() != 2 || !month_part.chars().all(|c| c.is_ascii_digit()) {
            return Err(invalid(label, "expected a 2-digit month"));
        }

        let year: i32 = year_part
            .parse()
            .map_err(|_| invalid(label, "expected a 4-digit year"))?;
        let month: u32 = month_part
            .parse()
            .map_err(|_| invalid(label, "expected a 2-digit month"))?;

        let first_day = NaiveDate::from_ymd_opt(year, month, 1)
            .ok_or_else(|| invalid(label, "month out of range"))?;

        Ok(Self::Monthly {
            year,
            month,
            first_day,
        })
    }

    /// The nominal half-open window `[start, end)` the period labels.
    ///
    /// The aggregate snapshot does not filter by this window (see the report
    /// service); it exists for the period's own bookkeeping.
    #[must_use]
    pub fn window(&self) -> (DateTime<Utc>, DateTime<Utc>) {
        let (start, end) = match *self {
            Self::Daily(date) => (date, date + chrono::Days::new(1)),
            Self::Weekly { monday, .. } => (monday, monday + chrono::Days::new(7)),
            Self::Monthly { first_day, .. } => (first_day, first_day + Months::new(1)),
        };
        (
            start.and_time(NaiveTime::MIN).and_utc(),
            end.and_time(NaiveTime::MIN).and_utc(),
        )
    }
}

fn invalid(label: &str, hint: &str) -> AppError {
    AppError::InvalidPeriodFormat(format!("{label:?}: {hint}"))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use chrono::Datelike;

    #[test]
    fn parses_valid_week_label() {
        let period = ReportPeriod::parse_weekly("2025-W43").unwrap();
        match period {
            ReportPeriod::Weekly { year, week, monday } => {
                assert_eq!(year, 2025);
                assert_eq!(week, 43);
                assert_eq!(monday, NaiveDate::from_ymd_opt(2025, 10, 20).unwrap());
                assert_eq!(monday.weekday(), Weekday::Mon);
            }
            other => panic!("expected weekly period, got {other:?}"),
        }
    }

    #[test]
    fn parses_single_digit_week() {
        let period = ReportPeriod::parse_weekly("2025-W1").unwrap();
        match period {
            ReportPeriod::Weekly { week, monday, .. } => {
                assert_eq!(week, 1);
                assert_eq!(monday.weekday(), Weekday::Mon);
            }
            other => panic!("expected weekly period, got {other:?}"),
        }
    }

    #[test]
    fn rejects_garbage_week_label() {
        let err = ReportPeriod::parse_weekly("not-a-week").unwrap_err();
        assert!(matches!(err, AppError::InvalidPeriodFormat(_)));
    }

    #[test]
    fn rejects_non_numeric_week() {
        let err = ReportPeriod::parse_weekly("2025-WXX").unwrap_err();
        assert!(matches!(err, AppError::InvalidPeriodFormat(_)));
    }

    #[test]
    fn rejects_week_out_of_range() {
        // 2025 has 52 ISO weeks
        let err = ReportPeriod::parse_weekly("2025-W99").unwrap_err();
        assert!(matches!(err, AppError::InvalidPeriodFormat(_)));
    }

    #[test]
    fn accepts_week_53_only_in_long_years() {
        // 2020 is a 53-week ISO year, 2025 is not
        assert!(ReportPeriod::parse_weekly("2020-W53").is_ok());
        assert!(ReportPeriod::parse_weekly("2025-W53").is_err());
    }

    #[test]
    fn rejects_short_year() {
        let err = ReportPeriod::parse_weekly("25-W10").unwrap_err();
        assert!(matches!(err, AppError::InvalidPeriodFormat(_)));
    }

    #[test]
    fn rejects_week_zero() {
        let err = ReportPeriod::parse_weekly("2025-W0").unwrap_err();
        assert!(matches!(err, AppError::InvalidPeriodFormat(_)));
    }

    #[test]
    fn weekly_window_spans_seven_days() {
        let period = ReportPeriod::parse_weekly("2025-W43").unwrap();
        let (start, end) = period.window();
        assert_eq!(end - start, chrono::Duration::days(7));
    }

    #[test]
    fn parses_valid_daily_label() {
        let period = ReportPeriod::parse_daily("2025-10-22").unwrap();
        assert_eq!(
            period,
            ReportPeriod::Daily(NaiveDate::from_ymd_opt(2025, 10, 22).unwrap())
        );
    }

    #[test]
    fn rejects_impossible_date() {
        let err = ReportPeriod::parse_daily("2025-02-30").unwrap_err();
        assert!(matches!(err, AppError::InvalidPeriodFormat(_)));
    }

    #[test]
    fn rejects_daily_with_wrong_shape() {
        assert!(ReportPeriod::parse_daily("2025-10").is_err());
        assert!(ReportPeriod::parse_daily("22-10-2025").is_err());
    }

    #[test]
    fn parses_valid_monthly_label() {
        let period = ReportPeriod::parse_monthly("2025-10").unwrap();
        match period {
            ReportPeriod::Monthly { year, month, .. } => {
                assert_eq!(year, 2025);
                assert_eq!(month, 10);
            }
            other => panic!("expected monthly period, got {other:?}"),
        }
    }

    #[test]
    fn rejects_month_out_of_range() {
        let err = ReportPeriod::parse_monthly("2025-13").unwrap_err();
        assert!(matches!(err, AppError::InvalidPeriodFormat(_)));
    }

    #[test]
    fn monthly_window_covers_the_month() {
        let period = ReportPeriod::parse_monthly("2025-02").unwrap();
        let (start, end) = period.window();
        assert_eq!(end - start, chrono::Duration::days(28));
    }
}

//! Admin dashboard aggregation over recharge records.
use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone};
use serde::Serialize;

use crate::history::RechargeRecord;
use crate::numbers::{i64_to_f64, round_f64_to_i64, usize_to_f64};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DashboardStats {
    pub today_count: usize,
    pub today_amount: i64,
    pub total_count: usize,
    pub total_amount: i64,
    pub average_amount: i64,
}

/// Calendar date of a stored timestamp, seen from `tz`.
///
/// Accepts RFC 3339 timestamps, naive `YYYY-MM-DDTHH:MM:SS` stamps and plain
/// `YYYY-MM-DD` dates. Blank or unparseable values yield `None`.
#[must_use]
pub fn normalize_date<Tz: TimeZone>(value: &str, tz: &Tz) -> Option<NaiveDate> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }
    if let Ok(ts) = DateTime::parse_from_rfc3339(value) {
        return Some(ts.with_timezone(tz).date_naive());
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(naive.date());
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d").ok()
}

/// Average rounded to the nearest rupee; 0 when there are no records.
#[must_use]
pub fn average_amount(total: i64, count: usize) -> i64 {
    if count == 0 {
        return 0;
    }
    round_f64_to_i64(i64_to_f64(total) / usize_to_f64(count))
}

/// Aggregate `records` for the dashboard cards.
///
/// `today` and `tz` come from the caller so the result is reproducible.
#[must_use]
pub fn compute<Tz: TimeZone>(records: &[RechargeRecord], today: NaiveDate, tz: &Tz) -> DashboardStats {
    let (today_count, today_amount) = records
        .iter()
        .filter(|r| normalize_date(&r.date, tz) == Some(today))
        .fold((0usize, 0i64), |(n, sum), r| (n + 1, sum.saturating_add(r.amount)));
    let total_amount = records
        .iter()
        .fold(0i64, |sum, r| sum.saturating_add(r.amount));
    let total_count = records.len();
    DashboardStats {
        today_count,
        today_amount,
        total_count,
        total_amount,
        average_amount: average_amount(total_amount, total_count),
    }
}

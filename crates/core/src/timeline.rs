//! Date handling for the feed: the "last updated" stamp and newest-first
//! ordering.

use std::cmp::Reverse;

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

use crate::types::NormalizedRecord;

/// Parse the date shapes the pipeline writes.
///
/// Accepts RFC 3339 (`2024-03-05T00:00:00Z`), a naive date-time taken as UTC
/// and a bare date taken as UTC midnight.
pub fn parse_timestamp(value: &str) -> Option<DateTime<Utc>> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(naive.and_utc());
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

/// Pick the newest of several `generated_at` stamps.
///
/// Absent and unparseable candidates are left out of the comparison. The
/// winning candidate is returned as written; an empty string means no
/// candidate parsed.
pub fn latest_generated_at(candidates: &[Option<&str>]) -> String {
    candidates
        .iter()
        .flatten()
        .filter_map(|raw| parse_timestamp(raw).map(|at| (at, *raw)))
        .max_by_key(|(at, _)| *at)
        .map(|(_, raw)| raw.to_string())
        .unwrap_or_default()
}

/// Newest release first. Records without a usable date sort as the epoch,
/// so they end up last. The sort is stable.
pub fn sort_by_release_date_desc(mut items: Vec<NormalizedRecord>) -> Vec<NormalizedRecord> {
    items.sort_by_key(|item| Reverse(release_millis(item)));
    items
}

fn release_millis(item: &NormalizedRecord) -> i64 {
    item.release_date
        .as_deref()
        .and_then(parse_timestamp)
        .map(|at| at.timestamp_millis())
        .unwrap_or(0)
}

//! Time utilities for month filtering
//!
//! Month constraints are calendar months in the store's configured time zone;
//! the store itself compares UTC instants.

use crate::errors::{AppError, AppResult};
use crate::types::YearMonth;
use chrono::{DateTime, Duration, NaiveDate, NaiveDateTime, TimeZone, Utc};
use chrono_tz::Tz;

/// Parse an IANA time zone name such as `Europe/Berlin`
pub fn parse_timezone(name: &str) -> AppResult<Tz> {
    name.trim()
        .parse::<Tz>()
        .map_err(|e| AppError::Config(format!("Invalid store time zone {:?}: {}", name, e)))
}

/// First instant of the given local date-time, resolved in `tz`
///
/// Ambiguous times take the earlier instant; a time skipped by a DST jump
/// resolves to the first valid instant after it.
fn resolve_local(tz: Tz, local: NaiveDateTime) -> Option<DateTime<Utc>> {
    (0..=3).find_map(|hours| {
        tz.from_local_datetime(&(local + Duration::hours(hours)))
            .earliest()
            .map(|dt| dt.with_timezone(&Utc))
    })
}

/// Half-open UTC range `[start, end)` covering a calendar month in `tz`
///
/// # Examples
/// ```
/// use origin_filter::types::YearMonth;
/// use origin_filter::utils::time::month_bounds;
///
/// let (start, end) = month_bounds(YearMonth::new(2024, 1).unwrap(), chrono_tz::UTC).unwrap();
/// assert_eq!(start.to_rfc3339(), "2024-01-01T00:00:00+00:00");
/// assert_eq!(end.to_rfc3339(), "2024-02-01T00:00:00+00:00");
/// ```
pub fn month_bounds(year_month: YearMonth, tz: Tz) -> Option<(DateTime<Utc>, DateTime<Utc>)> {
    let start_date = NaiveDate::from_ymd_opt(year_month.year(), year_month.month(), 1)?;
    let end_date = match year_month.next() {
        Some(next) => NaiveDate::from_ymd_opt(next.year(), next.month(), 1)?,
        None => NaiveDate::from_ymd_opt(year_month.year() + 1, 1, 1)?,
    };

    let start = resolve_local(tz, start_date.and_hms_opt(0, 0, 0)?)?;
    let end = resolve_local(tz, end_date.and_hms_opt(0, 0, 0)?)?;
    Some((start, end))
}

/// Parse an order creation timestamp from import data
///
/// Accepts RFC 3339, `YYYY-MM-DD HH:MM:SS` (taken as UTC) or Unix seconds.
pub fn parse_order_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S") {
        return Some(naive.and_utc());
    }
    raw.parse::<i64>()
        .ok()
        .and_then(|secs| Utc.timestamp_opt(secs, 0).single())
}

/// Convert Unix timestamp to ISO 8601 date string (YYYY-MM-DD)
///
/// Returns "1970-01-01" for invalid timestamps.
///
/// # Examples
/// ```
/// use origin_filter::utils::time::timestamp_to_iso;
/// assert_eq!(timestamp_to_iso(0), "1970-01-01");
/// assert_eq!(timestamp_to_iso(1704067200), "2024-01-01");
/// ```
pub fn timestamp_to_iso(timestamp: i64) -> String {
    Utc.timestamp_opt(timestamp, 0)
        .single()
        .map(|dt| dt.format("%Y-%m-%d").to_string())
        .unwrap_or_else(|| "1970-01-01".to_string())
}

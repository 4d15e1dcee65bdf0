//! Shared helpers for report formatting

use crate::errors::AppResult;
use crate::utils::currency::group_thousands;
use serde::Serialize;

/// Format a count with comma thousand separators
///
/// # Examples
///
/// ```
/// # use origin_filter::analysis::reports::utils::format_count;
/// assert_eq!(format_count(7), "7");
/// assert_eq!(format_count(1234567), "1,234,567");
/// ```
pub fn format_count(n: u64) -> String {
    group_thousands(&n.to_string(), ",")
}

/// Pretty-printed JSON for any report payload
pub fn export_json<T: Serialize>(data: &T) -> AppResult<String> {
    Ok(serde_json::to_string_pretty(data)?)
}

/// Console section heading with an underline rule
pub fn heading(title: &str) -> String {
    format!("\n{}\n{}\n", title, "━".repeat(48))
}

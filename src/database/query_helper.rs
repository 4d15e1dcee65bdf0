//! Query helper utilities for common database patterns
//!
//! Consolidates the prepare() + query_map() + collect() pattern and simple
//! row counting used by the order store.

use crate::errors::StoreResult;
use rusqlite::{Connection, Params, Row};

/// Helper trait for common database query patterns
///
/// Implemented for `rusqlite::Connection`.
///
/// ```ignore
/// use crate::database::QueryHelper;
///
/// let total = conn.count_rows("orders", None)?;
/// let values: Vec<String> = conn.query_collect(
///     "SELECT value FROM order_attributes WHERE name = ?1",
///     ["attribution_source"],
///     |row| row.get(0),
/// )?;
/// ```
pub trait QueryHelper {
    /// Query a COUNT(*) result for any table
    ///
    /// `where_clause` must not contain user input; it is inlined.
    fn count_rows(&self, table: &str, where_clause: Option<&str>) -> StoreResult<i64>;

    /// Execute query returning multiple rows, collecting into Vec
    fn query_collect<T, P, F>(&self, sql: &str, params: P, mapper: F) -> StoreResult<Vec<T>>
    where
        P: Params,
        F: FnMut(&Row) -> rusqlite::Result<T>;
}

impl QueryHelper for Connection {
    fn count_rows(&self, table: &str, where_clause: Option<&str>) -> StoreResult<i64> {
        let sql = if let Some(where_part) = where_clause {
            format!("SELECT COUNT(*) FROM {} WHERE {}", table, where_part)
        } else {
            format!("SELECT COUNT(*) FROM {}", table)
        };

        self.query_row(&sql, [], |row| row.get(0))
            .map_err(Into::into)
    }

    fn query_collect<T, P, F>(&self, sql: &str, params: P, mut mapper: F) -> StoreResult<Vec<T>>
    where
        P: Params,
        F: FnMut(&Row) -> rusqlite::Result<T>,
    {
        let mut stmt = self.prepare_cached(sql)?;
        let results = stmt
            .query_map(params, &mut mapper)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(results)
    }
}

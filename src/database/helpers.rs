//! Shared database helper functions for order queries
//!
//! Every value that originates from a filter is bound as a parameter; the
//! SQL text only ever contains placeholders.

use super::traits::OrderQuery;
use crate::errors::{AppError, AppResult, StoreError, StoreResult};
use crate::types::{Order, OrderStatus};
use chrono::{TimeZone, Utc};
use rusqlite::types::Value;
use rusqlite::Row;
use rust_decimal::Decimal;
use std::collections::BTreeMap;
use std::str::FromStr;

/// Standard SELECT columns for order queries
///
/// Use with `order_row_from_row`, which expects this column order.
pub const ORDER_SELECT_COLUMNS: &str = "o.id, o.status, o.total, o.created_at";

/// Order row as stored, before decimal and timestamp decoding
#[derive(Debug, Clone)]
pub struct OrderRow {
    pub id: i64,
    pub status: String,
    pub total: String,
    pub created_at: i64,
}

/// Order id as stored in the INTEGER primary key
///
/// Ids above `i64::MAX` cannot be stored without wrapping and are rejected.
pub fn stored_order_id(id: u64) -> AppResult<i64> {
    i64::try_from(id).map_err(|_| AppError::InvalidData(format!("order id {} out of range", id)))
}

/// Construct an `OrderRow` from a database row
///
/// Expects columns in this order:
/// 0. id (INTEGER)
/// 1. status (TEXT)
/// 2. total (TEXT)
/// 3. created_at (INTEGER, Unix seconds)
pub fn order_row_from_row(row: &Row) -> rusqlite::Result<OrderRow> {
    Ok(OrderRow {
        id: row.get(0)?,
        status: row.get(1)?,
        total: row.get(2)?,
        created_at: row.get(3)?,
    })
}

impl OrderRow {
    /// Decode into an `Order`, attaching its attributes
    pub fn into_order(self, attributes: BTreeMap<String, String>) -> StoreResult<Order> {
        let id = u64::try_from(self.id)
            .map_err(|_| StoreError::CorruptRow(format!("negative order id {}", self.id)))?;
        let total = Decimal::from_str(self.total.trim()).map_err(|e| {
            StoreError::CorruptRow(format!("order {} total {:?}: {}", id, self.total, e))
        })?;
        let created_at = Utc
            .timestamp_opt(self.created_at, 0)
            .single()
            .ok_or_else(|| {
                StoreError::CorruptRow(format!(
                    "order {} created_at {} out of range",
                    id, self.created_at
                ))
            })?;

        Ok(Order {
            id,
            status: OrderStatus::from(self.status),
            total,
            attributes,
            created_at,
        })
    }
}

/// Build the WHERE clause (over alias `o`) and bound parameters for a query
///
/// Returns `None` when the query can match nothing (an empty status list).
pub fn order_where_clause(query: &OrderQuery) -> Option<(String, Vec<Value>)> {
    let mut conditions: Vec<String> = Vec::new();
    let mut params: Vec<Value> = Vec::new();

    for (key, value) in &query.equals {
        params.push(Value::Text(key.clone()));
        let key_idx = params.len();
        params.push(Value::Text(value.clone()));
        let value_idx = params.len();
        conditions.push(format!(
            "EXISTS (SELECT 1 FROM order_attributes a \
             WHERE a.order_id = o.id AND a.name = ?{} AND a.value = ?{})",
            key_idx, value_idx
        ));
    }

    if let Some(statuses) = &query.statuses {
        if statuses.is_empty() {
            return None;
        }
        let mut placeholders = Vec::with_capacity(statuses.len());
        for status in statuses {
            params.push(Value::Text(status.as_str().to_string()));
            placeholders.push(format!("?{}", params.len()));
        }
        conditions.push(format!("o.status IN ({})", placeholders.join(", ")));
    }

    if let Some((start, end)) = &query.created_range {
        params.push(Value::Integer(start.timestamp()));
        let start_idx = params.len();
        params.push(Value::Integer(end.timestamp()));
        let end_idx = params.len();
        conditions.push(format!(
            "o.created_at >= ?{} AND o.created_at < ?{}",
            start_idx, end_idx
        ));
    }

    let clause = if conditions.is_empty() {
        "1 = 1".to_string()
    } else {
        conditions.join(" AND ")
    };

    Some((clause, params))
}

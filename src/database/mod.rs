//! SQLite-backed order store.
//!
//! ## Architecture
//!
//! The `Database` struct implements the store traits:
//! - `OrderStore` - read access used by the filter core
//! - `OrderWriteOperations` - loading orders (CSV import, test seeding)
//!
//! Every failure crossing this boundary is a `StoreError`; the filter core
//! turns those into `AppError::StoreUnavailable`.

pub mod helpers;
pub mod query_helper;
pub mod schema;
pub mod traits;

pub use helpers::{
    order_row_from_row, order_where_clause, stored_order_id, OrderRow, ORDER_SELECT_COLUMNS,
};
pub use query_helper::QueryHelper;
pub use schema::setup_schema;
pub use traits::{OrderQuery, OrderStore, OrderWriteOperations};

use crate::errors::{AppResult, StoreError, StoreResult};
use crate::types::Order;
use crate::utils::text::sanitize_text_field;
use rusqlite::{params, params_from_iter, Connection, OpenFlags};
use std::collections::{BTreeMap, HashMap};
use std::time::Duration;
use tracing::{debug, info};

/// Default wait on a busy/locked database before a query fails
pub const DEFAULT_BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// The main order store interface.
///
/// Holds a SQLite connection with a bounded busy timeout so no store call
/// can hang indefinitely.
pub struct Database {
    connection: Connection,
}

impl Database {
    /// Open (creating if needed) a database with the default busy timeout
    pub fn new(database_path: &str) -> AppResult<Self> {
        Self::open(database_path, DEFAULT_BUSY_TIMEOUT)
    }

    /// Open (creating if needed) a database and initialise the schema
    pub fn open(database_path: &str, busy_timeout: Duration) -> AppResult<Self> {
        let connection = Connection::open(database_path)
            .map_err(|e| StoreError::Unavailable(format!("{}: {}", database_path, e)))?;
        let database = Self::from_connection(connection, busy_timeout)?;
        setup_schema(&database.connection)?;

        info!("Order store opened at: {}", database_path);
        Ok(database)
    }

    /// Open an existing database read-only; the schema must already exist
    pub fn open_read_only(database_path: &str, busy_timeout: Duration) -> AppResult<Self> {
        let connection = Connection::open_with_flags(
            database_path,
            OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX,
        )
        .map_err(|e| StoreError::Unavailable(format!("{}: {}", database_path, e)))?;

        info!("Order store opened read-only at: {}", database_path);
        Self::from_connection(connection, busy_timeout)
    }

    fn from_connection(connection: Connection, busy_timeout: Duration) -> AppResult<Self> {
        connection.busy_timeout(busy_timeout)?;
        debug!("Store busy timeout: {:?}", busy_timeout);
        Ok(Self { connection })
    }

    /// Get a reference to the underlying connection
    pub fn connection(&self) -> &Connection {
        &self.connection
    }

    /// Execute a function within a database transaction
    pub fn execute_transaction<F, R>(&mut self, f: F) -> AppResult<R>
    where
        F: FnOnce(&rusqlite::Transaction) -> AppResult<R>,
    {
        let tx = self.connection.transaction()?;
        let result = f(&tx)?;
        tx.commit()?;
        Ok(result)
    }

    /// Number of orders in the store
    pub fn order_count(&self) -> AppResult<u64> {
        Ok(self.connection.count_rows("orders", None)? as u64)
    }

    /// Attributes for every order matched by `clause`, keyed by order id
    fn attributes_for(
        &self,
        clause: &str,
        params: &[rusqlite::types::Value],
    ) -> StoreResult<HashMap<i64, BTreeMap<String, String>>> {
        let sql = format!(
            "SELECT a.order_id, a.name, a.value FROM order_attributes a \
             WHERE a.order_id IN (SELECT o.id FROM orders o WHERE {})",
            clause
        );
        let rows: Vec<(i64, String, String)> =
            self.connection
                .query_collect(&sql, params_from_iter(params.iter()), |row| {
                    Ok((row.get(0)?, row.get(1)?, row.get(2)?))
                })?;

        let mut by_order: HashMap<i64, BTreeMap<String, String>> = HashMap::new();
        for (order_id, name, value) in rows {
            by_order.entry(order_id).or_default().insert(name, value);
        }
        Ok(by_order)
    }
}

impl OrderStore for Database {
    fn distinct_attribute_values(&self, key: &str) -> StoreResult<Vec<String>> {
        let values = self.connection.query_collect(
            "SELECT DISTINCT a.value
             FROM order_attributes a
             INNER JOIN orders o ON o.id = a.order_id
             WHERE a.name = ?1
             AND a.value != ''
             ORDER BY a.value",
            params![key],
            |row| row.get::<_, String>(0),
        )?;

        debug!("Store returned {} values for {}", values.len(), key);
        Ok(values)
    }

    fn query_orders(&self, query: &OrderQuery) -> StoreResult<Vec<Order>> {
        let Some((clause, params)) = order_where_clause(query) else {
            return Ok(Vec::new());
        };

        let sql = format!(
            "SELECT {} FROM orders o WHERE {} ORDER BY o.id",
            ORDER_SELECT_COLUMNS, clause
        );
        let rows = self.connection.query_collect(
            &sql,
            params_from_iter(params.iter()),
            order_row_from_row,
        )?;

        if rows.is_empty() {
            return Ok(Vec::new());
        }

        let mut attributes = self.attributes_for(&clause, &params)?;
        rows.into_iter()
            .map(|row| {
                let attrs = attributes.remove(&row.id).unwrap_or_default();
                row.into_order(attrs)
            })
            .collect()
    }
}

impl OrderWriteOperations for Database {
    fn insert_orders_batch(&mut self, orders: &[Order]) -> AppResult<usize> {
        let inserted = self.execute_transaction(|tx| {
            let mut order_stmt = tx.prepare_cached(
                "INSERT OR REPLACE INTO orders (id, status, total, created_at)
                 VALUES (?1, ?2, ?3, ?4)",
            )?;
            let mut clear_stmt =
                tx.prepare_cached("DELETE FROM order_attributes WHERE order_id = ?1")?;
            let mut attr_stmt = tx.prepare_cached(
                "INSERT INTO order_attributes (order_id, name, value) VALUES (?1, ?2, ?3)",
            )?;

            for order in orders {
                let id = stored_order_id(order.id)?;
                order_stmt.execute(params![
                    id,
                    order.status.as_str(),
                    order.total.to_string(),
                    order.created_at.timestamp()
                ])?;
                clear_stmt.execute(params![id])?;

                for (name, value) in &order.attributes {
                    let value = sanitize_text_field(value);
                    if value.is_empty() {
                        continue;
                    }
                    attr_stmt.execute(params![id, name, value])?;
                }
            }

            Ok(orders.len())
        })?;

        debug!("Inserted {} orders", inserted);
        Ok(inserted)
    }

    fn record_attribute(&mut self, order_id: u64, key: &str, value: &str) -> AppResult<bool> {
        let id = stored_order_id(order_id)?;
        let value = sanitize_text_field(value);
        if value.is_empty() {
            debug!("Skipping empty {} for order {}", key, order_id);
            return Ok(false);
        }

        self.connection.execute(
            "INSERT OR REPLACE INTO order_attributes (order_id, name, value) VALUES (?1, ?2, ?3)",
            params![id, key, value],
        )?;
        Ok(true)
    }
}

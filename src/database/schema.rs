//! Order store schema
//!
//! - `orders`: one row per order; `total` is decimal TEXT so sums stay exact,
//!   `created_at` is Unix seconds (UTC)
//! - `order_attributes`: key/value attributes per order (origin, gateway, ...)

use crate::errors::AppResult;
use rusqlite::Connection;
use tracing::debug;

pub const SCHEMA_VERSION: i64 = 1;

/// Create tables and indexes if they do not exist yet
pub fn setup_schema(connection: &Connection) -> AppResult<()> {
    connection.execute_batch(
        r#"
        PRAGMA foreign_keys = ON;

        CREATE TABLE IF NOT EXISTS orders (
            id INTEGER PRIMARY KEY,
            status TEXT NOT NULL,
            total TEXT NOT NULL,
            created_at INTEGER NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_orders_status_created
            ON orders (status, created_at);

        CREATE TABLE IF NOT EXISTS order_attributes (
            order_id INTEGER NOT NULL REFERENCES orders (id) ON DELETE CASCADE,
            name TEXT NOT NULL,
            value TEXT NOT NULL,
            PRIMARY KEY (order_id, name)
        );

        CREATE INDEX IF NOT EXISTS idx_order_attributes_name_value
            ON order_attributes (name, value);
        "#,
    )?;

    connection.pragma_update(None, "user_version", SCHEMA_VERSION)?;

    debug!("Order store schema v{} ready", SCHEMA_VERSION);
    Ok(())
}

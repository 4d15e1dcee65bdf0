//! Order store trait abstractions.
//!
//! The filter core only ever reads through `OrderStore`; the write traits
//! exist for the import path and for seeding test stores.

use crate::errors::{AppResult, StoreResult};
use crate::types::{Order, OrderStatus};
use chrono::{DateTime, Utc};

/// Query accepted by an order store
///
/// Every equality pair must match the order's attribute exactly, the status
/// must be listed (when `statuses` is `Some`), and `created_at` must fall in
/// the half-open range (when `created_range` is `Some`).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OrderQuery {
    pub equals: Vec<(String, String)>,
    pub statuses: Option<Vec<OrderStatus>>,
    pub created_range: Option<(DateTime<Utc>, DateTime<Utc>)>,
}

/// Read access to the external system of record for orders
pub trait OrderStore {
    /// Values of `key` across all orders that carry a non-empty value for it
    ///
    /// Implementations may or may not deduplicate; callers must not rely on it.
    fn distinct_attribute_values(&self, key: &str) -> StoreResult<Vec<String>>;

    /// Orders matching `query`, ordered by id ascending
    fn query_orders(&self, query: &OrderQuery) -> StoreResult<Vec<Order>>;
}

/// Write operations used to load orders into the local store
pub trait OrderWriteOperations {
    /// Insert or replace a batch of orders with their attributes
    fn insert_orders_batch(&mut self, orders: &[Order]) -> AppResult<usize>;

    /// Record one attribute on an existing order
    ///
    /// Empty values (after sanitising) are not recorded; returns whether a
    /// value was written.
    fn record_attribute(&mut self, order_id: u64, key: &str, value: &str) -> AppResult<bool>;
}

impl<S: OrderStore + ?Sized> OrderStore for &S {
    fn distinct_attribute_values(&self, key: &str) -> StoreResult<Vec<String>> {
        (**self).distinct_attribute_values(key)
    }

    fn query_orders(&self, query: &OrderQuery) -> StoreResult<Vec<Order>> {
        (**self).query_orders(query)
    }
}

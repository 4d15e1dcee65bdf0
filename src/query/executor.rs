//! Order Query Executor
//!
//! Applies a `FilterSpecification` and a status set to an order store.
//! Month constraints are resolved to a UTC range in the store's time zone
//! before the store sees them.

use crate::database::{OrderQuery, OrderStore};
use crate::errors::AppResult;
use crate::types::{FilterSpecification, Order, OrderStatus};
use crate::utils::time::month_bounds;
use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use tracing::{debug, warn};

/// Read-only filter over an order store
pub struct OrderQueryExecutor<S> {
    store: S,
    timezone: Tz,
}

impl<S: OrderStore> OrderQueryExecutor<S> {
    pub fn new(store: S, timezone: Tz) -> Self {
        Self { store, timezone }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn timezone(&self) -> Tz {
        self.timezone
    }

    /// Orders matching every constraint in `filter` whose status is in `statuses`
    ///
    /// Sorted by id ascending. An empty status set matches nothing; an empty
    /// `filter` matches every order with an allowed status.
    pub fn execute(
        &self,
        filter: &FilterSpecification,
        statuses: &[OrderStatus],
    ) -> AppResult<Vec<Order>> {
        if statuses.is_empty() {
            debug!("No statuses allowed, skipping store query");
            return Ok(Vec::new());
        }
        self.run(filter, Some(statuses))
    }

    /// Orders matching `filter` regardless of status (the plain list view)
    pub fn execute_any_status(&self, filter: &FilterSpecification) -> AppResult<Vec<Order>> {
        self.run(filter, None)
    }

    fn run(
        &self,
        filter: &FilterSpecification,
        statuses: Option<&[OrderStatus]>,
    ) -> AppResult<Vec<Order>> {
        let created_range = match filter.year_month() {
            Some(ym) => match month_bounds(ym, self.timezone) {
                Some(range) => Some(range),
                None => {
                    warn!("Month {} has no representable range in {}", ym, self.timezone);
                    return Ok(Vec::new());
                }
            },
            None => None,
        };

        let query = OrderQuery {
            equals: filter
                .constraints()
                .iter()
                .map(|c| (c.attribute().key().to_string(), c.value().to_string()))
                .collect(),
            statuses: statuses.map(<[OrderStatus]>::to_vec),
            created_range,
        };

        let fetched = self.store.query_orders(&query)?;
        let fetched_count = fetched.len();

        // Re-check every row; a store may over-match
        let mut orders: Vec<Order> = fetched
            .into_iter()
            .filter(|order| order_matches(order, filter, statuses, created_range))
            .collect();
        if orders.len() != fetched_count {
            warn!(
                "Store returned {} orders outside the filter",
                fetched_count - orders.len()
            );
        }

        orders.sort_by_key(|o| o.id);
        orders.dedup_by_key(|o| o.id);

        debug!("Filter [{}] matched {} orders", filter.label(), orders.len());
        Ok(orders)
    }
}

/// In-memory form of the store's matching rule
pub fn order_matches(
    order: &Order,
    filter: &FilterSpecification,
    statuses: Option<&[OrderStatus]>,
    created_range: Option<(DateTime<Utc>, DateTime<Utc>)>,
) -> bool {
    let attributes_match = filter
        .constraints()
        .iter()
        .all(|c| order.attribute(c.attribute().key()) == Some(c.value()));

    let status_allowed = statuses.map_or(true, |allowed| allowed.contains(&order.status));

    let in_range = created_range
        .map_or(true, |(start, end)| order.created_at >= start && order.created_at < end);

    attributes_match && status_allowed && in_range
}

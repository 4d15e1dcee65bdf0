//! Count and total over a filtered order set

use crate::types::{AggregateResult, Order};
use rust_decimal::Decimal;
use tracing::warn;

/// Aggregator for filtered orders
pub struct Aggregator;

impl Aggregator {
    /// Number of orders and the exact sum of their totals
    ///
    /// An empty slice yields `{count: 0, total: 0}`.
    ///
    /// # Examples
    /// ```
    /// use origin_filter::analysis::Aggregator;
    ///
    /// let result = Aggregator::aggregate(&[]);
    /// assert_eq!(result.count, 0);
    /// assert!(result.total.is_zero());
    /// ```
    pub fn aggregate(orders: &[Order]) -> AggregateResult {
        let mut total = Decimal::ZERO;
        for order in orders {
            match total.checked_add(order.total) {
                Some(sum) => total = sum,
                None => {
                    warn!("Order total overflow at order {}, saturating", order.id);
                    total = total.saturating_add(order.total);
                }
            }
        }

        AggregateResult {
            count: orders.len() as u64,
            total,
        }
    }
}

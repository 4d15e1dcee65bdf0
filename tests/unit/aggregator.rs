//! Aggregation over fixture orders

use crate::common::fixtures::{google_scenario, order};
use origin_filter::analysis::Aggregator;
use rust_decimal::dec;

#[test]
fn test_aggregate_google_counted_orders() {
    let orders: Vec<_> = google_scenario()
        .into_iter()
        .filter(|o| o.attribute("attribution_source") == Some("google"))
        .filter(|o| o.status.as_str() != "cancelled")
        .collect();

    let result = Aggregator::aggregate(&orders);
    assert_eq!(result.count, 3);
    assert_eq!(result.total, dec!(35.00));
}

#[test]
fn test_aggregate_many_small_amounts_is_exact() {
    let orders: Vec<_> = (1..=1000).map(|id| order(id).total("0.01").build()).collect();
    let result = Aggregator::aggregate(&orders);
    assert_eq!(result.count, 1000);
    assert_eq!(result.total, dec!(10.00));
}

#[test]
fn test_aggregate_empty() {
    let result = Aggregator::aggregate(&[]);
    assert_eq!(result.count, 0);
    assert!(result.total.is_zero());
    assert!(result.is_empty());
}

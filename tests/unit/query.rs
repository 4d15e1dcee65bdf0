//! Order query executor against the SQLite store

use crate::common::database::TestDatabase;
use crate::common::fixtures::{google_scenario, order};
use crate::common::stores::FailingStore;
use chrono::{TimeZone, Utc};
use origin_filter::errors::AppError;
use origin_filter::query::OrderQueryExecutor;
use origin_filter::types::{
    AttributeConstraint, FilterAttribute, FilterSpecification, OrderStatus, YearMonth,
};

fn filter_for(origin: Option<&str>, gateway: Option<&str>) -> FilterSpecification {
    let mut filter = FilterSpecification::new();
    if let Some(value) = origin {
        filter = filter.with_constraint(
            AttributeConstraint::new(FilterAttribute::AttributionSource, value).unwrap(),
        );
    }
    if let Some(value) = gateway {
        filter = filter.with_constraint(
            AttributeConstraint::new(FilterAttribute::PaymentGatewayTitle, value).unwrap(),
        );
    }
    filter
}

fn ids(orders: &[origin_filter::types::Order]) -> Vec<u64> {
    orders.iter().map(|o| o.id).collect()
}

#[test]
fn test_execute_matches_constraints_and_statuses() {
    let test_db = TestDatabase::seeded("executor_statuses", &google_scenario()).unwrap();
    let executor = OrderQueryExecutor::new(test_db.database(), chrono_tz::UTC);

    let orders = executor
        .execute(&filter_for(Some("google"), None), &OrderStatus::COUNTED)
        .unwrap();
    assert_eq!(ids(&orders), vec![1, 2, 3]);
}

#[test]
fn test_execute_requires_every_constraint() {
    let test_db = TestDatabase::seeded("executor_and", &google_scenario()).unwrap();
    let executor = OrderQueryExecutor::new(test_db.database(), chrono_tz::UTC);

    let orders = executor
        .execute(&filter_for(Some("google"), Some("Stripe")), &OrderStatus::COUNTED)
        .unwrap();
    assert_eq!(ids(&orders), vec![1, 3]);

    let by_gateway = executor
        .execute(&filter_for(None, Some("Stripe")), &OrderStatus::COUNTED)
        .unwrap();
    assert_eq!(ids(&by_gateway), vec![1, 3, 5]);
}

#[test]
fn test_values_are_compared_exactly() {
    let test_db = TestDatabase::seeded(
        "executor_exact",
        &[
            order(1).origin("Google").build(),
            order(2).origin("google ").build(),
            order(3).origin("google").build(),
        ],
    )
    .unwrap();
    let executor = OrderQueryExecutor::new(test_db.database(), chrono_tz::UTC);

    // Stored values are sanitised on write, so "google " became "google"
    let orders = executor
        .execute(&filter_for(Some("google"), None), &OrderStatus::COUNTED)
        .unwrap();
    assert_eq!(ids(&orders), vec![2, 3]);
}

#[test]
fn test_month_range_is_half_open() {
    let test_db = TestDatabase::seeded(
        "executor_month",
        &[
            order(1)
                .origin("google")
                .created_at(Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap())
                .build(),
            order(2)
                .origin("google")
                .created_at(Utc.with_ymd_and_hms(2024, 1, 31, 23, 59, 59).unwrap())
                .build(),
            order(3)
                .origin("google")
                .created_at(Utc.with_ymd_and_hms(2024, 2, 1, 0, 0, 0).unwrap())
                .build(),
            order(4)
                .origin("google")
                .created_at(Utc.with_ymd_and_hms(2023, 12, 31, 23, 59, 59).unwrap())
                .build(),
        ],
    )
    .unwrap();
    let executor = OrderQueryExecutor::new(test_db.database(), chrono_tz::UTC);

    let january = filter_for(Some("google"), None).with_year_month(YearMonth::new(2024, 1).unwrap());
    let orders = executor.execute(&january, &OrderStatus::COUNTED).unwrap();
    assert_eq!(ids(&orders), vec![1, 2]);
}

#[test]
fn test_empty_status_set_returns_nothing() {
    let test_db = TestDatabase::seeded("executor_no_status", &google_scenario()).unwrap();
    let executor = OrderQueryExecutor::new(test_db.database(), chrono_tz::UTC);
    assert!(executor
        .execute(&filter_for(Some("google"), None), &[])
        .unwrap()
        .is_empty());
}

#[test]
fn test_empty_spec_matches_all_counted_orders() {
    let test_db = TestDatabase::seeded("executor_empty_filter", &google_scenario()).unwrap();
    let executor = OrderQueryExecutor::new(test_db.database(), chrono_tz::UTC);

    let orders = executor
        .execute(&FilterSpecification::new(), &OrderStatus::COUNTED)
        .unwrap();
    assert_eq!(ids(&orders), vec![1, 2, 3, 5, 6]);

    let everything = executor
        .execute_any_status(&FilterSpecification::new())
        .unwrap();
    assert_eq!(everything.len(), 6);
}

#[test]
fn test_execute_is_idempotent() {
    let test_db = TestDatabase::seeded("executor_idempotent", &google_scenario()).unwrap();
    let executor = OrderQueryExecutor::new(test_db.database(), chrono_tz::UTC);
    let filter = filter_for(Some("google"), None);

    let first = executor.execute(&filter, &OrderStatus::COUNTED).unwrap();
    let second = executor.execute(&filter, &OrderStatus::COUNTED).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_failing_store_is_unavailable() {
    let executor = OrderQueryExecutor::new(FailingStore, chrono_tz::UTC);
    let result = executor.execute(&filter_for(Some("google"), None), &OrderStatus::COUNTED);
    assert!(matches!(result, Err(AppError::StoreUnavailable(_))));
}

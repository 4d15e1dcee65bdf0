//! Sales filter service end-to-end over in-memory and SQLite stores

use crate::common::database::TestDatabase;
use crate::common::fixtures::{google_scenario, order};
use crate::common::params;
use crate::common::stores::{FailingStore, InMemoryStore};
use origin_filter::analysis::{OutputFormat, ReportFormatter, SalesFilterService};
use origin_filter::cache::{AttributeValueCache, ManualClock};
use origin_filter::config::{AppConfig, CurrencyConfig};
use origin_filter::errors::AppError;
use origin_filter::filter::FilterCriteriaBuilder;
use origin_filter::types::{FilterAttribute, SalesNotice};
use rust_decimal::dec;
use std::sync::Arc;
use std::time::Duration;

fn service<S: origin_filter::database::OrderStore>(store: S) -> SalesFilterService<S> {
    SalesFilterService::new(
        store,
        AttributeValueCache::default(),
        FilterCriteriaBuilder::new(),
        chrono_tz::UTC,
    )
}

#[test]
fn test_google_orders_total() {
    let test_db = TestDatabase::seeded("service_google", &google_scenario()).unwrap();
    let service = service(test_db.database());

    let summary = service
        .summarize(&params(&[("attribution_source", "google")]))
        .unwrap()
        .expect("attribute filter present");
    assert_eq!(summary.result.count, 3);
    assert_eq!(summary.result.total, dec!(35.00));

    let output =
        ReportFormatter::format_summary(&summary, &CurrencyConfig::default(), &OutputFormat::Console)
            .unwrap();
    assert!(output.starts_with("Origin Filter applied successfully. Total of google: $35.00"));
}

#[test]
fn test_unknown_origin_reports_no_orders() {
    let test_db = TestDatabase::seeded("service_bing", &google_scenario()).unwrap();
    let service = service(test_db.database());

    let summary = service
        .summarize(&params(&[("attribution_source", "bing")]))
        .unwrap()
        .unwrap();
    assert_eq!(summary.result.count, 0);
    assert!(summary.result.total.is_zero());
    assert_eq!(
        summary.notice(),
        SalesNotice::NoMatches {
            label: "bing".to_string()
        }
    );

    let output =
        ReportFormatter::format_summary(&summary, &CurrencyConfig::default(), &OutputFormat::Console)
            .unwrap();
    assert_eq!(output.trim_end(), "No orders found for bing");
}

#[test]
fn test_invalid_month_ignored_in_summary() {
    let test_db = TestDatabase::seeded("service_bad_month", &google_scenario()).unwrap();
    let service = service(test_db.database());

    let summary = service
        .summarize(&params(&[
            ("attribution_source", "google"),
            ("yearmonth", "202413"),
        ]))
        .unwrap()
        .unwrap();
    assert_eq!(summary.filter.year_month(), None);
    assert_eq!(summary.result.total, dec!(35.00));
}

#[test]
fn test_summary_is_idempotent() {
    let test_db = TestDatabase::seeded("service_idempotent", &google_scenario()).unwrap();
    let service = service(test_db.database());
    let raw = params(&[("attribution_source", "google"), ("m", "202401")]);

    let first = service.summarize(&raw).unwrap();
    let second = service.summarize(&raw).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_choices_refresh_after_ttl() {
    let store = InMemoryStore::new(vec![
        order(1).origin("google").build(),
        order(2).origin("facebook").build(),
    ]);
    let clock = Arc::new(ManualClock::new(chrono::Utc::now()));
    let cache = AttributeValueCache::with_clock(Duration::from_secs(12 * 3600), clock.clone());
    let service = SalesFilterService::new(&store, cache, FilterCriteriaBuilder::new(), chrono_tz::UTC);

    let before = service.filter_choices(FilterAttribute::AttributionSource);
    assert_eq!(before.values, vec!["facebook", "google"]);

    store.push(order(3).origin("tiktok").build());
    let still_cached = service.filter_choices(FilterAttribute::AttributionSource);
    assert_eq!(still_cached.values, vec!["facebook", "google"]);

    clock.advance(chrono::Duration::hours(12));
    let after = service.filter_choices(FilterAttribute::AttributionSource);
    assert_eq!(after.values, vec!["facebook", "google", "tiktok"]);
}

#[test]
fn test_choices_degrade_when_store_fails() {
    let service = service(FailingStore);
    for choices in service.all_filter_choices() {
        assert!(choices.unavailable);
        assert!(choices.values.is_empty());
    }
}

#[test]
fn test_summary_fails_when_store_fails() {
    let service = service(FailingStore);
    let result = service.summarize(&params(&[("attribution_source", "google")]));
    assert!(matches!(result, Err(AppError::StoreUnavailable(_))));
}

#[test]
fn test_from_config_uses_configured_statuses() {
    let test_db = TestDatabase::seeded("service_config", &google_scenario()).unwrap();
    let mut config = AppConfig::default();
    config.filters.counted_statuses = vec!["wc-cancelled".to_string()];

    let service = SalesFilterService::from_config(test_db.database(), &config).unwrap();
    let summary = service
        .summarize(&params(&[("attribution_source", "google")]))
        .unwrap()
        .unwrap();
    assert_eq!(summary.result.count, 1);
    assert_eq!(summary.result.total, dec!(100.00));
}

#[test]
fn test_from_config_rejects_bad_time_zone() {
    let mut config = AppConfig::default();
    config.store.timezone = "Mars/Olympus".to_string();
    let result = SalesFilterService::from_config(FailingStore, &config);
    assert!(matches!(result, Err(AppError::Config(_))));
}

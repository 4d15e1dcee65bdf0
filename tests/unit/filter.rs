//! Filter criteria builder through the public API

use crate::common::params;
use origin_filter::errors::AppError;
use origin_filter::filter::{FilterCriteriaBuilder, YearMonthParam};
use origin_filter::types::{FilterAttribute, YearMonth};

#[test]
fn test_out_of_range_month_is_dropped() {
    let filter = FilterCriteriaBuilder::new().build(&params(&[
        ("attribution_source", "google"),
        ("yearmonth", "202413"),
    ]));

    assert_eq!(filter.year_month(), None);
    assert_eq!(filter.constraints().len(), 1);
    assert_eq!(filter.label(), "google");
}

#[test]
fn test_full_request_builds_all_constraints() {
    let filter = FilterCriteriaBuilder::new().build(&params(&[
        ("order_origin", "google"),
        ("payment_gateway_title", "Stripe"),
        ("m", "202401"),
        ("post_type", "shop_order"),
    ]));

    assert_eq!(
        filter.constraint_for(FilterAttribute::AttributionSource)
            .map(|c| c.value()),
        Some("google")
    );
    assert_eq!(
        filter.constraint_for(FilterAttribute::PaymentGatewayTitle)
            .map(|c| c.value()),
        Some("Stripe")
    );
    assert_eq!(filter.year_month(), YearMonth::new(2024, 1));
    assert_eq!(filter.label(), "google, Stripe, 2024-01");
}

#[test]
fn test_month_only_request_has_no_attribute_constraints() {
    let filter = FilterCriteriaBuilder::new().build(&params(&[("yearmonth", "202401")]));
    assert!(!filter.has_attribute_constraints());
    assert!(!filter.is_empty());
}

#[test]
fn test_build_is_pure() {
    let raw = params(&[("attribution_source", " google "), ("yearmonth", "202312")]);
    let builder = FilterCriteriaBuilder::new();
    let first = builder.build(&raw);
    for _ in 0..5 {
        assert_eq!(builder.build(&raw), first);
    }
}

#[test]
fn test_read_yearmonth_classifies_values() {
    assert_eq!(
        FilterCriteriaBuilder::read_yearmonth(&params(&[])),
        YearMonthParam::Absent
    );
    assert_eq!(
        FilterCriteriaBuilder::read_yearmonth(&params(&[("m", "202402")])),
        YearMonthParam::Valid(YearMonth::new(2024, 2).unwrap())
    );
    assert_eq!(
        FilterCriteriaBuilder::read_yearmonth(&params(&[("yearmonth", "2024-02")])),
        YearMonthParam::Malformed("2024-02".to_string())
    );
}

#[test]
fn test_strict_builder_rejects_out_of_range_month() {
    let result = FilterCriteriaBuilder::strict().try_build(&params(&[("yearmonth", "202400")]));
    match result {
        Err(AppError::InvalidFilterShape { parameter, value }) => {
            assert_eq!(parameter, "yearmonth");
            assert_eq!(value, "202400");
        }
        other => panic!("expected InvalidFilterShape, got {:?}", other),
    }
}

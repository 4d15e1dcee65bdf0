//! Sales filter service
//!
//! Wires the value cache, the criteria builder, the query executor and the
//! aggregator around a single order store.

use super::aggregator::Aggregator;
use crate::cache::AttributeValueCache;
use crate::config::AppConfig;
use crate::database::OrderStore;
use crate::errors::AppResult;
use crate::filter::FilterCriteriaBuilder;
use crate::query::OrderQueryExecutor;
use crate::types::{
    FilterAttribute, FilterChoices, FilterSpecification, Order, OrderStatus, SalesSummary,
};
use chrono_tz::Tz;
use std::collections::HashMap;
use tracing::{info, warn};

/// Filter-and-total operations for the order list screen
pub struct SalesFilterService<S> {
    executor: OrderQueryExecutor<S>,
    cache: AttributeValueCache,
    builder: FilterCriteriaBuilder,
    counted_statuses: Vec<OrderStatus>,
}

impl<S: OrderStore> SalesFilterService<S> {
    /// Create a service counting completed and processing orders
    ///
    /// The cache is shared with any clone of it held elsewhere.
    pub fn new(
        store: S,
        cache: AttributeValueCache,
        builder: FilterCriteriaBuilder,
        timezone: Tz,
    ) -> Self {
        Self {
            executor: OrderQueryExecutor::new(store, timezone),
            cache,
            builder,
            counted_statuses: OrderStatus::COUNTED.to_vec(),
        }
    }

    /// Create a service with cache TTL, strictness, time zone and counted
    /// statuses taken from configuration
    pub fn from_config(store: S, config: &AppConfig) -> AppResult<Self> {
        let service = Self::new(
            store,
            AttributeValueCache::new(config.cache.ttl()),
            FilterCriteriaBuilder::from_config(&config.filters),
            config.store.tz()?,
        )
        .with_counted_statuses(config.filters.counted_statuses());
        Ok(service)
    }

    pub fn with_counted_statuses(mut self, statuses: Vec<OrderStatus>) -> Self {
        self.counted_statuses = statuses;
        self
    }

    pub fn counted_statuses(&self) -> &[OrderStatus] {
        &self.counted_statuses
    }

    pub fn cache(&self) -> &AttributeValueCache {
        &self.cache
    }

    pub fn store(&self) -> &S {
        self.executor.store()
    }

    /// Dropdown values for one attribute
    ///
    /// A store outage degrades to an empty list flagged `unavailable`.
    pub fn filter_choices(&self, attribute: FilterAttribute) -> FilterChoices {
        match self.cache.get_distinct_values(self.store(), attribute) {
            Ok(values) => FilterChoices {
                attribute,
                values: values.into_iter().collect(),
                unavailable: false,
            },
            Err(e) => {
                warn!("{} choices unavailable: {}", attribute.display_name(), e);
                FilterChoices {
                    attribute,
                    values: Vec::new(),
                    unavailable: true,
                }
            }
        }
    }

    /// Dropdown values for every filterable attribute
    pub fn all_filter_choices(&self) -> Vec<FilterChoices> {
        FilterAttribute::ALL
            .iter()
            .map(|attribute| self.filter_choices(*attribute))
            .collect()
    }

    /// Validate raw request parameters into a filter
    ///
    /// Fails only in strict mode, on a malformed month selector.
    pub fn build_filter(&self, raw: &HashMap<String, String>) -> AppResult<FilterSpecification> {
        self.builder.try_build(raw)
    }

    /// Total of counted orders for the requested filter
    ///
    /// Returns `Ok(None)` when no attribute constraint was requested; a month
    /// selector on its own does not produce a total.
    pub fn summarize(&self, raw: &HashMap<String, String>) -> AppResult<Option<SalesSummary>> {
        let filter = self.build_filter(raw)?;
        if !filter.has_attribute_constraints() {
            return Ok(None);
        }
        self.summarize_filter(filter).map(Some)
    }

    /// Total of counted orders for an already validated filter
    pub fn summarize_filter(&self, filter: FilterSpecification) -> AppResult<SalesSummary> {
        let orders = self.executor.execute(&filter, &self.counted_statuses)?;
        let result = Aggregator::aggregate(&orders);
        info!(
            "Filter [{}]: {} orders, total {}",
            filter.label(),
            result.count,
            result.total
        );
        Ok(SalesSummary { filter, result })
    }

    /// Orders of any status matching the requested filter
    pub fn list_orders(&self, raw: &HashMap<String, String>) -> AppResult<Vec<Order>> {
        let filter = self.build_filter(raw)?;
        self.list_orders_for(&filter)
    }

    pub fn list_orders_for(&self, filter: &FilterSpecification) -> AppResult<Vec<Order>> {
        self.executor.execute_any_status(filter)
    }
}

impl<S> std::fmt::Debug for SalesFilterService<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SalesFilterService")
            .field("builder", &self.builder)
            .field("counted_statuses", &self.counted_statuses)
            .field("cache_ttl", &self.cache.ttl())
            .finish_non_exhaustive()
    }
}

//! Sales analysis over filtered orders
//!
//! ## Overview
//!
//! The module is organised around [`SalesFilterService`], which composes the
//! attribute value cache, the filter criteria builder, the order query
//! executor and the [`Aggregator`]:
//!
//! - **Filter choices** - distinct dropdown values per attribute, cached
//! - **Summaries** - count and exact total of counted orders for a filter
//! - **Order lists** - every order matching a filter, any status
//! - **Report generation** - console, JSON and HTML output
//!
//! ## Usage
//!
//! ```rust
//! use origin_filter::analysis::SalesFilterService;
//! use origin_filter::cache::AttributeValueCache;
//! use origin_filter::database::Database;
//! use origin_filter::errors::AppResult;
//! use origin_filter::filter::FilterCriteriaBuilder;
//! use std::collections::HashMap;
//!
//! fn example() -> AppResult<()> {
//!     let database = Database::new(":memory:")?;
//!     let service = SalesFilterService::new(
//!         database,
//!         AttributeValueCache::default(),
//!         FilterCriteriaBuilder::new(),
//!         chrono_tz::UTC,
//!     );
//!
//!     let mut raw = HashMap::new();
//!     raw.insert("attribution_source".to_string(), "google".to_string());
//!     let summary = service.summarize(&raw)?;
//!     assert_eq!(summary.map(|s| s.result.count), Some(0));
//!     Ok(())
//! }
//! # example().unwrap();
//! ```

pub mod aggregator;
pub mod reports;
pub mod sales_filter;

pub use aggregator::Aggregator;
pub use reports::{OutputFormat, ReportFormatter};
pub use sales_filter::SalesFilterService;

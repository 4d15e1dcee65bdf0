//! Order Origin Filter - Type System
//!
//! - `order`: Orders, statuses and the filterable attribute keys
//! - `filter`: Validated filter specification (attribute equality + month)
//! - `summary`: Aggregate results, sales notices and dropdown choices

pub mod filter;
pub mod order;
pub mod summary;

pub use filter::{AttributeConstraint, FilterSpecification, YearMonth};
pub use order::{FilterAttribute, Order, OrderStatus};
pub use summary::{AggregateResult, FilterChoices, SalesNotice, SalesSummary};

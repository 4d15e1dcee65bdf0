//! Aggregate results and the notices derived from them

use super::filter::FilterSpecification;
use super::order::FilterAttribute;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Count and monetary total over a filtered order set
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AggregateResult {
    pub count: u64,
    pub total: Decimal,
}

impl AggregateResult {
    /// No orders matched; rendered as a distinct "no orders found" outcome
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }
}

/// Outcome shown to staff after filtering
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SalesNotice {
    Success { label: String, total: Decimal },
    NoMatches { label: String },
}

/// Aggregate for one filter request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SalesSummary {
    pub filter: FilterSpecification,
    pub result: AggregateResult,
}

impl SalesSummary {
    pub fn notice(&self) -> SalesNotice {
        let label = self.filter.label();
        if self.result.is_empty() {
            SalesNotice::NoMatches { label }
        } else {
            SalesNotice::Success {
                label,
                total: self.result.total,
            }
        }
    }
}

/// Distinct values offered in a filter dropdown
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterChoices {
    pub attribute: FilterAttribute,
    pub values: Vec<String>,
    /// Set when the store could not be queried and the list is empty for that reason
    pub unavailable: bool,
}

//! Order records as read from the external order store

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Order lifecycle status
///
/// Only `Completed` and `Processing` are counted towards sales totals by
/// default. Statuses the host invents are kept verbatim in `Other`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum OrderStatus {
    Completed,
    Processing,
    Pending,
    OnHold,
    Cancelled,
    Refunded,
    Failed,
    Other(String),
}

impl OrderStatus {
    /// Statuses counted as sales when no configuration overrides them
    pub const COUNTED: [OrderStatus; 2] = [OrderStatus::Completed, OrderStatus::Processing];

    pub fn as_str(&self) -> &str {
        match self {
            OrderStatus::Completed => "completed",
            OrderStatus::Processing => "processing",
            OrderStatus::Pending => "pending",
            OrderStatus::OnHold => "on-hold",
            OrderStatus::Cancelled => "cancelled",
            OrderStatus::Refunded => "refunded",
            OrderStatus::Failed => "failed",
            OrderStatus::Other(s) => s.as_str(),
        }
    }
}

impl From<&str> for OrderStatus {
    /// Accepts both bare names and the host's `wc-` prefixed post statuses
    fn from(s: &str) -> Self {
        let normalised = s.trim().to_ascii_lowercase();
        let bare = normalised.strip_prefix("wc-").unwrap_or(&normalised);
        match bare {
            "completed" => OrderStatus::Completed,
            "processing" => OrderStatus::Processing,
            "pending" => OrderStatus::Pending,
            "on-hold" => OrderStatus::OnHold,
            "cancelled" => OrderStatus::Cancelled,
            "refunded" => OrderStatus::Refunded,
            "failed" => OrderStatus::Failed,
            other => OrderStatus::Other(other.to_string()),
        }
    }
}

impl From<String> for OrderStatus {
    fn from(s: String) -> Self {
        OrderStatus::from(s.as_str())
    }
}

impl From<OrderStatus> for String {
    fn from(status: OrderStatus) -> Self {
        status.as_str().to_string()
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Order attributes that can be filtered on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FilterAttribute {
    /// Marketing origin recorded at checkout (UTM source)
    AttributionSource,
    /// Display title of the payment gateway used
    PaymentGatewayTitle,
}

impl FilterAttribute {
    /// Every filterable attribute, in the order constraints are emitted
    pub const ALL: [FilterAttribute; 2] = [
        FilterAttribute::AttributionSource,
        FilterAttribute::PaymentGatewayTitle,
    ];

    /// Attribute key as stored on orders and used as request parameter name
    pub fn key(&self) -> &'static str {
        match self {
            FilterAttribute::AttributionSource => "attribution_source",
            FilterAttribute::PaymentGatewayTitle => "payment_gateway_title",
        }
    }

    /// Legacy request parameter accepted in place of `key()`
    pub fn alias(&self) -> Option<&'static str> {
        match self {
            FilterAttribute::AttributionSource => Some("order_origin"),
            FilterAttribute::PaymentGatewayTitle => None,
        }
    }

    /// Human readable name for dropdown placeholders and reports
    pub fn display_name(&self) -> &'static str {
        match self {
            FilterAttribute::AttributionSource => "Origin",
            FilterAttribute::PaymentGatewayTitle => "Payment Gateway",
        }
    }
}

impl FromStr for FilterAttribute {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "attribution_source" | "order_origin" | "origin" => {
                Ok(FilterAttribute::AttributionSource)
            }
            "payment_gateway_title" | "gateway" => Ok(FilterAttribute::PaymentGatewayTitle),
            _ => Err(format!("Unknown filter attribute: {}", s)),
        }
    }
}

impl fmt::Display for FilterAttribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// A single order, owned by the external store
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub id: u64,
    pub status: OrderStatus,
    pub total: Decimal,
    pub attributes: BTreeMap<String, String>,
    pub created_at: DateTime<Utc>,
}

impl Order {
    /// Look up an attribute value by key
    pub fn attribute(&self, key: &str) -> Option<&str> {
        self.attributes.get(key).map(String::as_str)
    }
}

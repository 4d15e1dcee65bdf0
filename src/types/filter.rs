//! Typed filter specification produced from raw request parameters

use super::order::FilterAttribute;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Equality constraint on one order attribute
///
/// The value is always non-empty and trimmed; there is no way to build a
/// constraint that matches the empty string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawConstraint")]
pub struct AttributeConstraint {
    attribute: FilterAttribute,
    value: String,
}

impl AttributeConstraint {
    /// Returns `None` when the value is empty after trimming
    pub fn new(attribute: FilterAttribute, value: &str) -> Option<Self> {
        let value = value.trim();
        if value.is_empty() {
            return None;
        }
        Some(Self {
            attribute,
            value: value.to_string(),
        })
    }

    pub fn attribute(&self) -> FilterAttribute {
        self.attribute
    }

    pub fn value(&self) -> &str {
        &self.value
    }
}

#[derive(Deserialize)]
struct RawConstraint {
    attribute: FilterAttribute,
    value: String,
}

impl TryFrom<RawConstraint> for AttributeConstraint {
    type Error = String;

    fn try_from(raw: RawConstraint) -> Result<Self, Self::Error> {
        Self::new(raw.attribute, &raw.value)
            .ok_or_else(|| format!("empty value for {}", raw.attribute.key()))
    }
}

/// Calendar month constraint (year 1..=9999, month 1..=12)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "RawYearMonth")]
pub struct YearMonth {
    year: i32,
    month: u32,
}

impl YearMonth {
    pub fn new(year: i32, month: u32) -> Option<Self> {
        if !(1..=9999).contains(&year) || !(1..=12).contains(&month) {
            return None;
        }
        Some(Self { year, month })
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    /// The month that follows this one, rolling over the year
    pub fn next(&self) -> Option<Self> {
        if self.month == 12 {
            Self::new(self.year + 1, 1)
        } else {
            Self::new(self.year, self.month + 1)
        }
    }
}

#[derive(Deserialize)]
struct RawYearMonth {
    year: i32,
    month: u32,
}

impl TryFrom<RawYearMonth> for YearMonth {
    type Error = String;

    fn try_from(raw: RawYearMonth) -> Result<Self, Self::Error> {
        Self::new(raw.year, raw.month)
            .ok_or_else(|| format!("invalid year/month {}/{}", raw.year, raw.month))
    }
}

impl fmt::Display for YearMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

/// Validated description of which orders to include
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "RawFilter")]
pub struct FilterSpecification {
    constraints: Vec<AttributeConstraint>,
    year_month: Option<YearMonth>,
}

#[derive(Deserialize)]
struct RawFilter {
    #[serde(default)]
    constraints: Vec<AttributeConstraint>,
    #[serde(default)]
    year_month: Option<YearMonth>,
}

// Later constraints on the same attribute replace earlier ones
impl From<RawFilter> for FilterSpecification {
    fn from(raw: RawFilter) -> Self {
        let filter = raw
            .constraints
            .into_iter()
            .fold(Self::new(), |filter, c| filter.with_constraint(c));
        match raw.year_month {
            Some(year_month) => filter.with_year_month(year_month),
            None => filter,
        }
    }
}

impl FilterSpecification {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add (or replace) the equality constraint for its attribute
    pub fn with_constraint(mut self, constraint: AttributeConstraint) -> Self {
        match self
            .constraints
            .iter_mut()
            .find(|c| c.attribute == constraint.attribute)
        {
            Some(existing) => *existing = constraint,
            None => self.constraints.push(constraint),
        }
        self
    }

    pub fn with_year_month(mut self, year_month: YearMonth) -> Self {
        self.year_month = Some(year_month);
        self
    }

    pub fn constraints(&self) -> &[AttributeConstraint] {
        &self.constraints
    }

    pub fn year_month(&self) -> Option<YearMonth> {
        self.year_month
    }

    pub fn constraint_for(&self, attribute: FilterAttribute) -> Option<&AttributeConstraint> {
        self.constraints.iter().find(|c| c.attribute == attribute)
    }

    /// Totals are only shown when the user deliberately filtered on an attribute
    pub fn has_attribute_constraints(&self) -> bool {
        !self.constraints.is_empty()
    }

    pub fn is_empty(&self) -> bool {
        self.constraints.is_empty() && self.year_month.is_none()
    }

    /// Plain-text label naming the active filter, e.g. `google, 2024-01`
    pub fn label(&self) -> String {
        let mut parts: Vec<String> = self
            .constraints
            .iter()
            .map(|c| c.value.clone())
            .collect();
        if let Some(ym) = self.year_month {
            parts.push(ym.to_string());
        }
        parts.join(", ")
    }
}

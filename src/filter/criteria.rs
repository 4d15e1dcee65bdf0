//! Filter Criteria Builder
//!
//! Turns untrusted request parameters into a `FilterSpecification`. Absent,
//! blank and malformed values never become constraints.

use crate::config::FiltersConfig;
use crate::errors::{AppError, AppResult};
use crate::types::{AttributeConstraint, FilterAttribute, FilterSpecification, YearMonth};
use crate::utils::text::sanitize_text_field;
use lazy_static::lazy_static;
use regex::Regex;
use std::collections::HashMap;
use tracing::debug;

/// Request parameter carrying a `YYYYMM` month selector
pub const YEARMONTH_PARAM: &str = "yearmonth";

/// Legacy name of the month selector on the host's order list screen
pub const YEARMONTH_ALIAS: &str = "m";

lazy_static! {
    // ASCII only; `\d` would also accept other Unicode digits
    static ref YEARMONTH_RE: Regex = Regex::new(r"^[0-9]{6}$").expect("valid yearmonth pattern");
}

/// Outcome of reading the month selector
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum YearMonthParam {
    Absent,
    Valid(YearMonth),
    Malformed(String),
}

/// Parse a `YYYYMM` string such as `202401`
///
/// # Examples
/// ```
/// use origin_filter::filter::parse_yearmonth;
///
/// assert!(parse_yearmonth("202401").is_some());
/// assert!(parse_yearmonth("202413").is_none());
/// assert!(parse_yearmonth("2024-01").is_none());
/// ```
pub fn parse_yearmonth(value: &str) -> Option<YearMonth> {
    if !YEARMONTH_RE.is_match(value) {
        return None;
    }
    let year: i32 = value[..4].parse().ok()?;
    let month: u32 = value[4..].parse().ok()?;
    YearMonth::new(year, month)
}

/// Builds validated filter specifications from raw parameters
///
/// Pure: equal inputs always produce equal specifications.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FilterCriteriaBuilder {
    strict_yearmonth: bool,
}

impl FilterCriteriaBuilder {
    /// Lenient builder: malformed month selectors are ignored
    pub fn new() -> Self {
        Self::default()
    }

    /// Strict builder: `try_build` rejects malformed month selectors
    pub fn strict() -> Self {
        Self {
            strict_yearmonth: true,
        }
    }

    pub fn from_config(config: &FiltersConfig) -> Self {
        Self {
            strict_yearmonth: config.strict_yearmonth,
        }
    }

    pub fn is_strict(&self) -> bool {
        self.strict_yearmonth
    }

    /// Build a specification, dropping anything that does not validate
    pub fn build(&self, raw: &HashMap<String, String>) -> FilterSpecification {
        let mut filter = Self::attribute_constraints(raw);
        if let YearMonthParam::Valid(ym) = Self::read_yearmonth(raw) {
            filter = filter.with_year_month(ym);
        }
        filter
    }

    /// Build a specification, failing on a malformed month in strict mode
    ///
    /// In lenient mode this never fails and equals `build`.
    pub fn try_build(&self, raw: &HashMap<String, String>) -> AppResult<FilterSpecification> {
        let filter = Self::attribute_constraints(raw);
        match Self::read_yearmonth(raw) {
            YearMonthParam::Valid(ym) => Ok(filter.with_year_month(ym)),
            YearMonthParam::Malformed(value) if self.strict_yearmonth => {
                Err(AppError::InvalidFilterShape {
                    parameter: YEARMONTH_PARAM.to_string(),
                    value,
                })
            }
            YearMonthParam::Absent | YearMonthParam::Malformed(_) => Ok(filter),
        }
    }

    fn attribute_constraints(raw: &HashMap<String, String>) -> FilterSpecification {
        FilterAttribute::ALL
            .iter()
            .filter_map(|attribute| {
                let value = raw_param(raw, attribute.key(), attribute.alias())?;
                AttributeConstraint::new(*attribute, &value)
            })
            .fold(FilterSpecification::new(), |filter, constraint| {
                filter.with_constraint(constraint)
            })
    }

    /// Read and classify the month selector
    pub fn read_yearmonth(raw: &HashMap<String, String>) -> YearMonthParam {
        let Some(value) = raw_param(raw, YEARMONTH_PARAM, Some(YEARMONTH_ALIAS)) else {
            return YearMonthParam::Absent;
        };

        match parse_yearmonth(&value) {
            Some(ym) => YearMonthParam::Valid(ym),
            None => {
                debug!("Ignoring malformed {} value {:?}", YEARMONTH_PARAM, value);
                YearMonthParam::Malformed(value)
            }
        }
    }
}

/// Sanitised canonical parameter first, then its alias; values that are
/// blank after sanitising fall through to the alias
fn raw_param(raw: &HashMap<String, String>, name: &str, alias: Option<&str>) -> Option<String> {
    non_blank(raw, name).or_else(|| alias.and_then(|a| non_blank(raw, a)))
}

fn non_blank(raw: &HashMap<String, String>, key: &str) -> Option<String> {
    raw.get(key)
        .map(|v| sanitize_text_field(v))
        .filter(|v| !v.is_empty())
}

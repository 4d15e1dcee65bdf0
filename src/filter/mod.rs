//! Request parameter handling for order filters

pub mod criteria;

pub use criteria::{
    parse_yearmonth, FilterCriteriaBuilder, YearMonthParam, YEARMONTH_ALIAS, YEARMONTH_PARAM,
};

//! Report formatting and output generation
//!
//! Provides formatting for filter results via the [`ReportFormatter`] facade.
//! Supports Console, JSON, and HTML output formats.

pub mod sales;
pub mod utils;

use crate::config::CurrencyConfig;
use crate::errors::AppResult;
use crate::types::{FilterChoices, Order, SalesSummary};
use std::str::FromStr;

/// Output format options for reports
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    #[default]
    Console,
    Json,
    /// Admin-screen markup (notice box, select, order table)
    Html,
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "console" | "text" => Ok(OutputFormat::Console),
            "json" => Ok(OutputFormat::Json),
            "html" => Ok(OutputFormat::Html),
            other => Err(format!(
                "unknown output format '{}' (expected console, json or html)",
                other
            )),
        }
    }
}

/// Facade for all report formatting operations
pub struct ReportFormatter;

impl ReportFormatter {
    pub fn format_count(n: u64) -> String {
        utils::format_count(n)
    }

    pub fn format_summary(
        summary: &SalesSummary,
        currency: &CurrencyConfig,
        f: &OutputFormat,
    ) -> AppResult<String> {
        sales::format_summary(summary, currency, f)
    }

    pub fn format_choices(
        choices: &FilterChoices,
        selected: Option<&str>,
        f: &OutputFormat,
    ) -> AppResult<String> {
        sales::format_choices(choices, selected, f)
    }

    pub fn format_orders(
        label: &str,
        orders: &[Order],
        currency: &CurrencyConfig,
        f: &OutputFormat,
    ) -> AppResult<String> {
        sales::format_orders(label, orders, currency, f)
    }
}

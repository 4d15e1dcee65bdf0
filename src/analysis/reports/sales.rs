//! Sales notice, dropdown and order list formatters

use super::utils::{export_json, format_count, heading};
use super::OutputFormat;
use crate::config::CurrencyConfig;
use crate::errors::AppResult;
use crate::types::{FilterAttribute, FilterChoices, Order, SalesNotice, SalesSummary};
use crate::utils::currency::format_price;
use crate::utils::text::escape_html;
use rust_decimal::Decimal;
use serde::Serialize;

pub const SUCCESS_MESSAGE: &str = "Origin Filter applied successfully. Total of";
pub const NO_MATCHES_MESSAGE: &str = "No orders found for";

/// One-line notice text, e.g. `Origin Filter applied successfully. Total of google: $35.00`
pub fn notice_text(notice: &SalesNotice, currency: &CurrencyConfig) -> String {
    match notice {
        SalesNotice::Success { label, total } => {
            format!("{} {}: {}", SUCCESS_MESSAGE, label, format_price(*total, currency))
        }
        SalesNotice::NoMatches { label } => format!("{} {}", NO_MATCHES_MESSAGE, label),
    }
}

#[derive(Serialize)]
struct SummaryExport {
    filter: String,
    year_month: Option<String>,
    count: u64,
    total: Decimal,
    formatted_total: String,
    notice: SalesNotice,
    message: String,
}

pub fn format_summary(
    summary: &SalesSummary,
    currency: &CurrencyConfig,
    format: &OutputFormat,
) -> AppResult<String> {
    let notice = summary.notice();
    match format {
        OutputFormat::Json => export_json(&SummaryExport {
            filter: summary.filter.label(),
            year_month: summary.filter.year_month().map(|ym| ym.to_string()),
            count: summary.result.count,
            total: summary.result.total,
            formatted_total: format_price(summary.result.total, currency),
            message: notice_text(&notice, currency),
            notice,
        }),
        OutputFormat::Html => Ok(match &notice {
            SalesNotice::Success { label, total } => format!(
                "<div class=\"notice notice-success is-dismissible\"><p>{} {}: <b>{}</b></p></div>\n",
                SUCCESS_MESSAGE,
                escape_html(label),
                escape_html(&format_price(*total, currency))
            ),
            SalesNotice::NoMatches { label } => format!(
                "<div class=\"notice notice-error is-dismissible\"><p>{} {}</p></div>\n",
                NO_MATCHES_MESSAGE,
                escape_html(label)
            ),
        }),
        OutputFormat::Console => {
            let mut output = String::new();
            output.push_str(&notice_text(&notice, currency));
            output.push('\n');
            if !summary.result.is_empty() {
                output.push_str(&format!(
                    "  └─ Orders counted: {}\n",
                    format_count(summary.result.count)
                ));
            }
            Ok(output)
        }
    }
}

pub fn format_choices(
    choices: &FilterChoices,
    selected: Option<&str>,
    format: &OutputFormat,
) -> AppResult<String> {
    match format {
        OutputFormat::Json => export_json(choices),
        OutputFormat::Html => {
            let name = choices.attribute.key();
            let mut output = format!("<select name=\"{}\" id=\"filter-by-{}\">\n", name, name);
            output.push_str(&format!(
                "  <option value=\"\">All {}s</option>\n",
                escape_html(choices.attribute.display_name())
            ));
            for value in &choices.values {
                let selected_attr = if selected == Some(value.as_str()) {
                    " selected=\"selected\""
                } else {
                    ""
                };
                output.push_str(&format!(
                    "  <option value=\"{}\"{}>{}</option>\n",
                    escape_html(value),
                    selected_attr,
                    escape_html(value)
                ));
            }
            output.push_str("</select>\n");
            Ok(output)
        }
        OutputFormat::Console => {
            let mut output = heading(&format!("📋 {} values", choices.attribute.display_name()));
            if choices.unavailable {
                output.push_str("Values unavailable: the order store could not be queried\n");
                return Ok(output);
            }
            if choices.values.is_empty() {
                output.push_str("No values recorded\n");
                return Ok(output);
            }
            for value in &choices.values {
                let marker = if selected == Some(value.as_str()) { "*" } else { " " };
                output.push_str(&format!(" {} {}\n", marker, value));
            }
            output.push_str(&format!(
                "\nTotal: {}\n",
                format_count(choices.values.len() as u64)
            ));
            Ok(output)
        }
    }
}

pub fn format_orders(
    label: &str,
    orders: &[Order],
    currency: &CurrencyConfig,
    format: &OutputFormat,
) -> AppResult<String> {
    let source = FilterAttribute::AttributionSource.key();
    let gateway = FilterAttribute::PaymentGatewayTitle.key();

    match format {
        OutputFormat::Json => export_json(&orders),
        OutputFormat::Html => {
            let mut output = String::from(
                "<table class=\"wp-list-table widefat striped orders\">\n  <thead><tr>\
                 <th>Order</th><th>Date</th><th>Status</th><th>Total</th><th>Origin</th><th>Payment Gateway</th>\
                 </tr></thead>\n  <tbody>\n",
            );
            for order in orders {
                output.push_str(&format!(
                    "    <tr><td>#{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>\n",
                    order.id,
                    order.created_at.format("%Y-%m-%d %H:%M"),
                    escape_html(order.status.as_str()),
                    escape_html(&format_price(order.total, currency)),
                    escape_html(order.attribute(source).unwrap_or("")),
                    escape_html(order.attribute(gateway).unwrap_or(""))
                ));
            }
            output.push_str("  </tbody>\n</table>\n");
            Ok(output)
        }
        OutputFormat::Console => {
            let title = if label.is_empty() {
                "🧾 All orders".to_string()
            } else {
                format!("🧾 Orders for {}", label)
            };
            let mut output = heading(&title);
            if orders.is_empty() {
                output.push_str("No orders found\n");
                return Ok(output);
            }
            output.push_str(&format!(
                "{:<8} {:<17} {:<11} {:>12}  {:<16} {}\n",
                "Order", "Date (UTC)", "Status", "Total", "Origin", "Gateway"
            ));
            for order in orders {
                output.push_str(&format!(
                    "{:<8} {:<17} {:<11} {:>12}  {:<16} {}\n",
                    format!("#{}", order.id),
                    order.created_at.format("%Y-%m-%d %H:%M").to_string(),
                    order.status.as_str(),
                    format_price(order.total, currency),
                    order.attribute(source).unwrap_or("-"),
                    order.attribute(gateway).unwrap_or("-")
                ));
            }
            output.push_str(&format!(
                "\nTotal orders: {}\n",
                format_count(orders.len() as u64)
            ));
            Ok(output)
        }
    }
}

//! Currency formatting for sales totals
//!
//! Totals are exact decimals; formatting rounds half away from zero to the
//! configured number of decimals and groups thousands.

use crate::config::CurrencyConfig;
use rust_decimal::{Decimal, RoundingStrategy};

/// Format a monetary amount for display, e.g. `$1,234.50`
///
/// # Examples
/// ```
/// use origin_filter::config::CurrencyConfig;
/// use origin_filter::utils::currency::format_price;
/// use rust_decimal::Decimal;
///
/// let usd = CurrencyConfig::default();
/// assert_eq!(format_price(Decimal::new(123450, 2), &usd), "$1,234.50");
/// assert_eq!(format_price(Decimal::ZERO, &usd), "$0.00");
/// ```
pub fn format_price(amount: Decimal, currency: &CurrencyConfig) -> String {
    let rounded =
        amount.round_dp_with_strategy(currency.decimals, RoundingStrategy::MidpointAwayFromZero);
    let sign = if rounded.is_sign_negative() && !rounded.is_zero() {
        "-"
    } else {
        ""
    };

    let digits = format!("{:.*}", currency.decimals as usize, rounded.abs());
    let (integer_part, fraction_part) = match digits.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (digits.as_str(), None),
    };

    let mut body = group_thousands(integer_part, &currency.thousands_separator);
    if let Some(fraction) = fraction_part {
        body.push_str(&currency.decimal_separator);
        body.push_str(fraction);
    }

    format!("{}{}{}", sign, currency.symbol, body)
}

/// Insert `separator` between groups of three digits
pub fn group_thousands(digits: &str, separator: &str) -> String {
    let chars: Vec<char> = digits.chars().collect();
    let mut result = String::with_capacity(digits.len() + digits.len() / 3);

    for (i, c) in chars.iter().enumerate() {
        if i > 0 && (chars.len() - i) % 3 == 0 {
            result.push_str(separator);
        }
        result.push(*c);
    }

    result
}

//! Currency formatting for monetary amounts.

use rust_decimal::{Decimal, RoundingStrategy};

/// Formats an amount as currency: two decimal places (midpoint rounded away
/// from zero), thousands separators, and the sign ahead of the symbol.
///
/// # Example
///
/// ```
/// use super_recon::report::format_currency;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// assert_eq!(format_currency(Decimal::from_str("1234567.891").unwrap(), "$"), "$1,234,567.89");
/// assert_eq!(format_currency(Decimal::from_str("-5").unwrap(), "$"), "-$5.00");
/// ```
pub fn format_currency(amount: Decimal, symbol: &str) -> String {
    let rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    let negative = rounded < Decimal::ZERO;

    let mut magnitude = rounded.abs();
    magnitude.rescale(2);
    let digits = magnitude.to_string();
    let (whole, fraction) = digits.split_once('.').unwrap_or((digits.as_str(), "00"));

    format!(
        "{}{}{}.{}",
        if negative { "-" } else { "" },
        symbol,
        group_thousands(whole),
        fraction
    )
}

fn group_thousands(whole: &str) -> String {
    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, ch) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}

//! Currency and quantity normalization.

use rust_decimal::Decimal;
use std::str::FromStr;

use super::patterns::QUANTITY;

/// Parse a currency cell such as "$1,234.56" or "(12.50)".
///
/// Everything except digits, `-` and `.` is discarded. A value wrapped in
/// parentheses is negative (accounting notation). Returns `None` when no
/// digit is left, so unknown prices never turn into zero.
pub fn parse_currency(text: &str) -> Option<Decimal> {
    let trimmed = text.trim();
    let negative = trimmed.starts_with('(') && trimmed.ends_with(')');

    let cleaned: String = trimmed
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '-' || *c == '.')
        .collect();

    if !cleaned.chars().any(|c| c.is_ascii_digit()) {
        return None;
    }

    let value = Decimal::from_str(cleaned.trim_end_matches('.')).ok()?;
    Some(if negative { -value.abs() } else { value })
}

/// Parse a quantity cell such as "3" or "3 units".
///
/// Returns the first integer in the text, or `None` if there is no digit.
pub fn parse_quantity(text: &str) -> Option<u32> {
    QUANTITY.find(text)?.as_str().parse().ok()
}

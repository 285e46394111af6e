use rust_decimal::Decimal;
use std::str::FromStr;

const CURRENCY_SYMBOLS: [char; 4] = ['$', '€', '£', '¥'];

/// Canonicalize a statement amount to a signed decimal.
///
/// Currency symbols, thousands separators and whitespace are ignored. An
/// amount is negative when written in accounting parentheses `(12.00)` or with
/// a leading minus. Anything that is not a plain number after cleanup is
/// rejected.
pub fn parse_amount(raw: &str) -> Option<Decimal> {
    let cleaned: String = raw
        .chars()
        .filter(|c| !CURRENCY_SYMBOLS.contains(c) && *c != ',' && !c.is_whitespace())
        .collect();

    let negative = cleaned.contains('(') || cleaned.starts_with('-');
    let numeric: String = cleaned.chars().filter(|c| !matches!(c, '(' | ')')).collect();
    if numeric.is_empty()
        || !numeric
            .chars()
            .all(|c| c.is_ascii_digit() || matches!(c, '.' | '-' | '+'))
    {
        return None;
    }

    let value = Decimal::from_str(&numeric).ok()?;
    Some(if negative { -value.abs() } else { value })
}

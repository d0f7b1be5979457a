//! Cell-formatting helpers used by the export transform and the CLI.
//!
//! The export side works over already-accumulated amounts, so these helpers
//! take plain (code, amount) pairs rather than engine types; the compute
//! crate does the unwrapping.

use rust_decimal::Decimal;

/// Marker rendered for a cell with no value (no entry, no carried value).
pub const EMPTY_CELL: &str = "-";

/// Separator between currencies when one cell holds several.
pub const CURRENCY_SEPARATOR: &str = ", ";

/// Formats a single-currency amount.
pub fn format_scalar(amount: Decimal) -> String {
    amount.normalize().to_string()
}

/// Formats a multi-currency cell as `"<amount> <code>"` pairs joined by
/// [`CURRENCY_SEPARATOR`], e.g. `"100 TRY, 10 USD"`.
pub fn format_currency_pairs<'a, I>(pairs: I) -> String
where
    I: IntoIterator<Item = (&'a str, Decimal)>,
{
    let parts: Vec<String> = pairs
        .into_iter()
        .map(|(code, amount)| format!("{} {}", amount.normalize(), code))
        .collect();

    if parts.is_empty() {
        EMPTY_CELL.to_string()
    } else {
        parts.join(CURRENCY_SEPARATOR)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_scalar_trims_trailing_zeros() {
        assert_eq!(format_scalar(Decimal::new(125000, 2)), "1250");
        assert_eq!(format_scalar(Decimal::new(125075, 2)), "1250.75");
    }

    #[test]
    fn test_format_currency_pairs() {
        let formatted = format_currency_pairs(vec![
            ("TRY", Decimal::new(100, 0)),
            ("USD", Decimal::new(10, 0)),
        ]);
        assert_eq!(formatted, "100 TRY, 10 USD");
    }

    #[test]
    fn test_format_no_pairs_is_empty_marker() {
        assert_eq!(format_currency_pairs(Vec::new()), EMPTY_CELL);
    }
}

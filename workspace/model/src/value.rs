use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A single observed or aggregated amount.
///
/// Bank-balance, credit-card-limit and KMH-risk subjects record a plain
/// scalar in their single currency; income/expense records carry one amount
/// per ISO 4217 code. The serialized form is either a bare number or a
/// `{"TRY": 100, "USD": 10}` map.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CellValue {
    /// Single-currency amount.
    Scalar(Decimal),
    /// Per-currency amounts, keyed by ISO 4217 code.
    Multi(BTreeMap<String, Decimal>),
}

impl CellValue {
    /// Creates a single-currency amount.
    pub fn scalar(amount: Decimal) -> Self {
        CellValue::Scalar(amount)
    }

    /// Creates a one-entry currency map.
    pub fn of_currency(code: impl Into<String>, amount: Decimal) -> Self {
        let mut map = BTreeMap::new();
        map.insert(code.into(), amount);
        CellValue::Multi(map)
    }

    /// Returns the scalar amount, if this is a single-currency value.
    pub fn as_scalar(&self) -> Option<Decimal> {
        match self {
            CellValue::Scalar(amount) => Some(*amount),
            CellValue::Multi(_) => None,
        }
    }

    /// Returns the currency map, if this is a multi-currency value.
    pub fn currencies(&self) -> Option<&BTreeMap<String, Decimal>> {
        match self {
            CellValue::Scalar(_) => None,
            CellValue::Multi(map) => Some(map),
        }
    }

    /// True when the value carries no amount at all.
    ///
    /// A map whose every entry is zero counts as zero: omitted currencies
    /// and zero-valued currencies are the same thing in the sparse
    /// representation.
    pub fn is_zero(&self) -> bool {
        match self {
            CellValue::Scalar(amount) => amount.is_zero(),
            CellValue::Multi(map) => map.values().all(|amount| amount.is_zero()),
        }
    }

    /// Drops zero-amount currencies from a map value.
    pub fn prune_zeros(self) -> Self {
        match self {
            CellValue::Scalar(amount) => CellValue::Scalar(amount),
            CellValue::Multi(map) => {
                CellValue::Multi(map.into_iter().filter(|(_, amount)| !amount.is_zero()).collect())
            }
        }
    }
}

impl From<Decimal> for CellValue {
    fn from(amount: Decimal) -> Self {
        CellValue::Scalar(amount)
    }
}

/// Checks a currency code against the ISO 4217 tables.
///
/// Unknown codes are a data-quality problem in the upstream records, not a
/// fatal condition; callers warn and carry on.
pub fn is_known_currency(code: &str) -> bool {
    rusty_money::iso::find(code).is_some()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scalar_deserializes_from_bare_number() {
        let value: CellValue = serde_json::from_str("1250.75").unwrap();
        assert_eq!(value, CellValue::Scalar(Decimal::new(125075, 2)));
    }

    #[test]
    fn test_multi_deserializes_from_map() {
        let value: CellValue = serde_json::from_str(r#"{"TRY": 100, "USD": 10}"#).unwrap();
        let map = value.currencies().unwrap();
        assert_eq!(map.get("TRY"), Some(&Decimal::new(100, 0)));
        assert_eq!(map.get("USD"), Some(&Decimal::new(10, 0)));
    }

    #[test]
    fn test_zero_map_counts_as_zero() {
        let value = CellValue::of_currency("TRY", Decimal::ZERO);
        assert!(value.is_zero());
        assert!(CellValue::Multi(BTreeMap::new()).is_zero());
    }

    #[test]
    fn test_prune_zeros_drops_empty_currencies() {
        let mut map = BTreeMap::new();
        map.insert("TRY".to_string(), Decimal::new(100, 0));
        map.insert("USD".to_string(), Decimal::ZERO);
        let pruned = CellValue::Multi(map).prune_zeros();
        let currencies = pruned.currencies().unwrap();
        assert_eq!(currencies.len(), 1);
        assert!(currencies.contains_key("TRY"));
    }

    #[test]
    fn test_known_currency_codes() {
        assert!(is_known_currency("TRY"));
        assert!(is_known_currency("USD"));
        assert!(!is_known_currency("ZZZ"));
    }
}

//! Currency-safe addition of cell values.
//!
//! Every sum in the pivot (row totals, column roll-ups, grand totals) goes
//! through [`accumulate`], so the whole hierarchy stays consistent: scalars
//! add numerically, currency maps add per-code, and the two kinds never mix.

use std::collections::BTreeMap;

use model::value::CellValue;
use rust_decimal::Decimal;

use crate::error::{EngineError, Result};

/// Adds two optional cell values.
///
/// `None` is the identity. Scalar + Scalar is a numeric sum; Multi + Multi
/// sums per currency, treating an absent code as zero and pruning zero
/// results. Scalar + Multi is [`EngineError::InvalidOperandKind`]: a bare
/// number in a multi-currency context must not coerce to a default currency.
///
/// Associative and commutative, so repeated folds over many rows are
/// order-independent.
pub fn accumulate(a: Option<&CellValue>, b: Option<&CellValue>) -> Result<Option<CellValue>> {
    match (a, b) {
        (None, None) => Ok(None),
        (Some(value), None) | (None, Some(value)) => Ok(Some(value.clone().prune_zeros())),
        (Some(CellValue::Scalar(left)), Some(CellValue::Scalar(right))) => {
            Ok(Some(CellValue::Scalar(left + right)))
        }
        (Some(CellValue::Multi(left)), Some(CellValue::Multi(right))) => {
            let mut sum: BTreeMap<String, Decimal> = left.clone();
            for (code, amount) in right {
                *sum.entry(code.clone()).or_insert(Decimal::ZERO) += amount;
            }
            Ok(Some(CellValue::Multi(sum).prune_zeros()))
        }
        (Some(_), Some(_)) => Err(EngineError::InvalidOperandKind(
            "cannot add a bare number and a currency map".to_string(),
        )),
    }
}

/// Folds [`accumulate`] over any number of values.
pub fn accumulate_all<'a, I>(values: I) -> Result<Option<CellValue>>
where
    I: IntoIterator<Item = Option<&'a CellValue>>,
{
    let mut sum: Option<CellValue> = None;
    for value in values {
        sum = accumulate(sum.as_ref(), value)?;
    }
    Ok(sum)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dec(n: i64) -> Decimal {
        Decimal::new(n, 0)
    }

    #[test]
    fn test_scalar_sum() {
        let sum = accumulate(
            Some(&CellValue::Scalar(dec(50))),
            Some(&CellValue::Scalar(dec(150))),
        )
        .unwrap();
        assert_eq!(sum, Some(CellValue::Scalar(dec(200))));
    }

    #[test]
    fn test_none_is_identity() {
        let value = CellValue::of_currency("TRY", dec(100));
        assert_eq!(accumulate(Some(&value), None).unwrap(), Some(value.clone()));
        assert_eq!(accumulate(None, Some(&value)).unwrap(), Some(value));
        assert_eq!(accumulate(None, None).unwrap(), None);
    }

    #[test]
    fn test_disjoint_currencies_union() {
        let lira = CellValue::of_currency("TRY", dec(100));
        let dollars = CellValue::of_currency("USD", dec(10));
        let sum = accumulate(Some(&lira), Some(&dollars)).unwrap().unwrap();
        let map = sum.currencies().unwrap();
        assert_eq!(map.get("TRY"), Some(&dec(100)));
        assert_eq!(map.get("USD"), Some(&dec(10)));
        // never a conflated 110
        assert_eq!(sum.as_scalar(), None);
    }

    #[test]
    fn test_commutative_and_associative() {
        let a = CellValue::of_currency("TRY", dec(100));
        let b = CellValue::of_currency("USD", dec(10));
        let c = CellValue::of_currency("TRY", dec(7));

        let left = accumulate(
            accumulate(Some(&a), Some(&b)).unwrap().as_ref(),
            Some(&c),
        )
        .unwrap();
        let right = accumulate(
            Some(&a),
            accumulate(Some(&b), Some(&c)).unwrap().as_ref(),
        )
        .unwrap();
        let swapped = accumulate(
            accumulate(Some(&c), Some(&b)).unwrap().as_ref(),
            Some(&a),
        )
        .unwrap();

        assert_eq!(left, right);
        assert_eq!(left, swapped);
    }

    #[test]
    fn test_zero_results_pruned() {
        let credit = CellValue::of_currency("USD", dec(10));
        let debit = CellValue::of_currency("USD", dec(-10));
        let sum = accumulate(Some(&credit), Some(&debit)).unwrap().unwrap();
        assert!(sum.currencies().unwrap().is_empty());
        assert!(sum.is_zero());
    }

    #[test]
    fn test_mixed_kinds_is_an_error() {
        let scalar = CellValue::Scalar(dec(100));
        let map = CellValue::of_currency("TRY", dec(100));
        let result = accumulate(Some(&scalar), Some(&map));
        assert!(matches!(result, Err(EngineError::InvalidOperandKind(_))));
    }

    #[test]
    fn test_accumulate_all_empty_is_none() {
        assert_eq!(accumulate_all(Vec::new()).unwrap(), None);
    }
}

//! Heat-mapping of cell magnitudes.
//!
//! Intensity is always relative to the largest value in the currently
//! visible slice, so switching granularity or applying a text filter
//! rescales the whole view.

use model::value::CellValue;
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;

use crate::pivot::{PivotRow, RowKind};

/// Maps a raw cell magnitude to a highlight intensity in `[0, 1]`.
///
/// Non-positive values and a non-positive maximum yield no highlight.
pub fn scale(value: Decimal, max_in_view: Decimal) -> f64 {
    if value <= Decimal::ZERO || max_in_view <= Decimal::ZERO {
        return 0.0;
    }
    (value / max_in_view).to_f64().map_or(0.0, |ratio| ratio.min(1.0))
}

/// The magnitude a cell contributes to heat computation.
///
/// Multi-currency cells contribute their largest single-currency component;
/// intensity is purely visual, so amounts are never summed across codes.
pub fn heat_basis(value: &CellValue) -> Decimal {
    match value {
        CellValue::Scalar(amount) => *amount,
        CellValue::Multi(map) => map.values().copied().max().unwrap_or(Decimal::ZERO),
    }
}

/// The maximum cell magnitude over the leaf rows of a rendered pivot.
///
/// Parent, subtotal and grand-total rows are excluded so roll-ups do not
/// skew the scale.
pub fn max_in_view(rows: &[PivotRow]) -> Decimal {
    let mut max = Decimal::ZERO;
    for row in rows {
        for leaf in row.children.iter().chain(std::iter::once(row)) {
            if leaf.kind != RowKind::Leaf {
                continue;
            }
            for value in leaf.columns.values() {
                max = max.max(heat_basis(value));
            }
        }
    }
    max
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dec(n: i64) -> Decimal {
        Decimal::new(n, 0)
    }

    #[test]
    fn test_scale_boundaries() {
        assert_eq!(scale(dec(0), dec(1000)), 0.0);
        assert_eq!(scale(dec(1000), dec(1000)), 1.0);
        assert_eq!(scale(dec(-5), dec(1000)), 0.0);
        assert_eq!(scale(dec(42), dec(0)), 0.0);
    }

    #[test]
    fn test_scale_clamps_above_max() {
        assert_eq!(scale(dec(2000), dec(1000)), 1.0);
    }

    #[test]
    fn test_scale_ratio() {
        assert!((scale(dec(250), dec(1000)) - 0.25).abs() < 1e-9);
    }

    #[test]
    fn test_heat_basis_takes_largest_component() {
        let mut value = CellValue::of_currency("TRY", dec(100));
        if let CellValue::Multi(map) = &mut value {
            map.insert("USD".to_string(), dec(400));
        }
        assert_eq!(heat_basis(&value), dec(400));
    }

    #[test]
    fn test_max_in_view_ignores_rollup_rows() {
        let mut leaf = PivotRow::new("Vadesiz", RowKind::Leaf);
        leaf.columns.insert(1, CellValue::Scalar(dec(300)));

        let mut subtotal = PivotRow::new("Subtotal", RowKind::Subtotal);
        subtotal.columns.insert(1, CellValue::Scalar(dec(300)));

        let mut parent = PivotRow::new("Garanti", RowKind::Parent);
        parent.columns.insert(1, CellValue::Scalar(dec(300)));
        parent.children.push(leaf);
        parent.children.push(subtotal);

        assert_eq!(max_in_view(&[parent]), dec(300));
    }

    #[test]
    fn test_max_in_view_empty_rows() {
        assert_eq!(max_in_view(&[]), Decimal::ZERO);
    }
}

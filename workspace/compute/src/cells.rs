//! Per-cell presentation glue: text rendering, edit locking and heat.

use chrono::NaiveDate;
use common::CellMeta;
use common::converters::{EMPTY_CELL, format_currency_pairs, format_scalar};
use model::entities::status_period::StatusPeriod;
use model::value::CellValue;
use rust_decimal::Decimal;

use crate::editability::is_editable;
use crate::heatmap::{heat_basis, scale};

/// Renders one cell as text: `"-"` when nothing is known, the plain amount
/// for scalars, `"<amount> <code>"` pairs for currency maps.
pub fn format_cell(value: Option<&CellValue>) -> String {
    match value {
        None => EMPTY_CELL.to_string(),
        Some(CellValue::Scalar(amount)) => format_scalar(*amount),
        Some(CellValue::Multi(map)) => {
            format_currency_pairs(map.iter().map(|(code, amount)| (code.as_str(), *amount)))
        }
    }
}

/// Derives the presentation attributes for one rendered cell.
pub fn cell_meta(
    date: NaiveDate,
    periods: &[StatusPeriod],
    today: NaiveDate,
    value: Option<&CellValue>,
    max_in_view: Decimal,
) -> CellMeta {
    CellMeta {
        editable: is_editable(date, periods, today),
        heat_intensity: value
            .map(|value| scale(heat_basis(value), max_in_view))
            .unwrap_or(0.0),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use model::entities::status_period::SubjectStatus;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_format_cell_variants() {
        assert_eq!(format_cell(None), "-");
        assert_eq!(
            format_cell(Some(&CellValue::Scalar(Decimal::new(125075, 2)))),
            "1250.75"
        );

        let mut multi = CellValue::of_currency("TRY", Decimal::new(100, 0));
        if let CellValue::Multi(map) = &mut multi {
            map.insert("USD".to_string(), Decimal::new(10, 0));
        }
        assert_eq!(format_cell(Some(&multi)), "100 TRY, 10 USD");
    }

    #[test]
    fn test_cell_meta_combines_lock_and_heat() {
        let today = date(2025, 3, 15);
        let blocked = [StatusPeriod {
            subject_id: 1,
            status: SubjectStatus::Bloke,
            start_date: date(2025, 3, 10),
            end_date: None,
        }];
        let value = CellValue::Scalar(Decimal::new(500, 0));

        let meta = cell_meta(
            date(2025, 3, 12),
            &blocked,
            today,
            Some(&value),
            Decimal::new(1000, 0),
        );
        assert!(!meta.editable);
        assert!((meta.heat_intensity - 0.5).abs() < 1e-9);

        let open = cell_meta(date(2025, 3, 9), &blocked, today, None, Decimal::new(1000, 0));
        assert!(open.editable);
        assert_eq!(open.heat_intensity, 0.0);
    }
}

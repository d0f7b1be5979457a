//! Flattening a pivot into a spreadsheet-ready sheet.

use common::ExportSheet;
use tracing::{debug, instrument};

use crate::cells::format_cell;
use crate::error::Result;
use crate::pivot::{PivotRow, RowKind, grand_total};
use crate::window::ViewWindow;

/// Flattens pivot rows into one header row plus data rows: one row per
/// leaf, the parent name only on its first child, and a trailing
/// grand-total row. Cells are already formatted as text, so the sheet is
/// ready for spreadsheet serialization.
#[instrument(skip(rows, window), fields(num_rows = rows.len()))]
pub fn flatten(rows: &[PivotRow], window: &ViewWindow) -> Result<ExportSheet> {
    let keys = window.column_keys();
    let mut headers = vec!["Group".to_string(), "Item".to_string()];
    headers.extend(keys.iter().map(|key| window.column_label(*key)));
    headers.push("Total".to_string());

    let mut sheet = ExportSheet::new(headers);

    for parent in rows.iter().filter(|row| row.kind == RowKind::Parent) {
        for (index, child) in parent.children.iter().enumerate() {
            let mut row = Vec::with_capacity(sheet.width());
            row.push(if index == 0 {
                parent.label.clone()
            } else {
                String::new()
            });
            row.push(child.label.clone());
            for key in &keys {
                row.push(format_cell(child.cell(*key)));
            }
            row.push(format_cell(child.total.as_ref()));
            sheet.push_row(row);
        }
    }

    // Reuse the pivot's grand-total row when the view already built one;
    // otherwise fold it here the same way.
    let grand = match rows.iter().find(|row| row.kind == RowKind::GrandTotal) {
        Some(row) => Some(row.clone()),
        None => grand_total(rows)?,
    };
    if let Some(grand) = grand {
        let mut row = Vec::with_capacity(sheet.width());
        row.push(grand.label.clone());
        row.push(String::new());
        for key in &keys {
            row.push(format_cell(grand.cell(*key)));
        }
        row.push(format_cell(grand.total.as_ref()));
        sheet.push_row(row);
    }

    debug!(rows = sheet.rows.len(), "sheet flattened");
    Ok(sheet)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pivot::{GRAND_TOTAL_LABEL, PivotAggregator};
    use chrono::NaiveDate;
    use common::ViewRequest;
    use model::entities::prelude::*;
    use model::value::CellValue;
    use rust_decimal::Decimal;

    fn date(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, d).unwrap()
    }

    fn sample_rows(window: &ViewWindow) -> Vec<PivotRow> {
        let records = vec![
            TransactionRecord::new(
                "Marmara",
                "Kasa",
                "Kira",
                date(7),
                CellValue::of_currency("TRY", Decimal::new(500, 0)),
            ),
            TransactionRecord::new(
                "Marmara",
                "Kasa",
                "Elektrik",
                date(9),
                CellValue::of_currency("USD", Decimal::new(10, 0)),
            ),
            TransactionRecord::new(
                "Ege",
                "Banka",
                "Kira",
                date(7),
                CellValue::of_currency("TRY", Decimal::new(300, 0)),
            ),
        ];
        PivotAggregator::new()
            .aggregate_transactions(&records, window, None)
            .unwrap()
    }

    #[test]
    fn test_parent_name_only_on_first_child() {
        let window = ViewWindow::from_request(&ViewRequest::monthly(2025, 3)).unwrap();
        let sheet = flatten(&sample_rows(&window), &window).unwrap();

        assert_eq!(sheet.rows[0][0], "Marmara");
        assert_eq!(sheet.rows[1][0], "");
        assert_eq!(sheet.rows[2][0], "Ege");
    }

    #[test]
    fn test_trailing_grand_total_row() {
        let window = ViewWindow::from_request(&ViewRequest::monthly(2025, 3)).unwrap();
        let sheet = flatten(&sample_rows(&window), &window).unwrap();

        let last = sheet.rows.last().unwrap();
        assert_eq!(last[0], GRAND_TOTAL_LABEL);
        // day 7 header offset: Group, Item, then days 1..31
        let day7 = 2 + 6;
        assert_eq!(last[day7], "800 TRY");
    }

    #[test]
    fn test_currency_cells_render_with_codes() {
        let window = ViewWindow::from_request(&ViewRequest::monthly(2025, 3)).unwrap();
        let sheet = flatten(&sample_rows(&window), &window).unwrap();

        let day9 = 2 + 8;
        assert_eq!(sheet.rows[1][day9], "10 USD");
        // no value: explicit empty marker
        assert_eq!(sheet.rows[1][2], "-");
    }

    #[test]
    fn test_header_layout() {
        let window = ViewWindow::from_request(&ViewRequest::weekly(2025, 3, 2)).unwrap();
        let sheet = flatten(&Vec::new(), &window).unwrap();

        assert_eq!(
            sheet.headers,
            vec!["Group", "Item", "8", "9", "10", "11", "12", "13", "14", "Total"]
        );
        assert!(sheet.rows.is_empty());
    }
}

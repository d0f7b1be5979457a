use std::collections::BTreeMap;

use anyhow::Result;
use common::CellMeta;
use compute::cells::cell_meta;
use compute::editability::periods_for;
use compute::heatmap::max_in_view;
use compute::pivot::{PivotRow, RowKind};
use compute::window::ViewWindow;
use model::entities::prelude::StatusPeriod;
use serde::Serialize;
use tracing::{debug, info};

use crate::cli::{Table, ViewArgs};
use crate::dataset::Dataset;

/// The JSON payload handed to the rendering side: the row hierarchy plus
/// per-cell presentation attributes for every leaf.
#[derive(Serialize)]
struct Report {
    rows: Vec<PivotRow>,
    /// Keyed by "parent / leaf" label, then by column.
    cell_meta: BTreeMap<String, BTreeMap<u32, CellMeta>>,
}

pub fn report(view: &ViewArgs) -> Result<()> {
    let dataset = Dataset::load(&view.dataset)?;
    let request = view.to_request();
    let today = view.today();
    debug!(?request, %today, "computing report");

    let rows = match view.table {
        Table::Balances => compute::snapshot_pivot(
            &dataset.subjects,
            &dataset.snapshot_entries,
            &request,
            today,
        )?,
        Table::Ledger => compute::transaction_pivot(&dataset.transaction_records, &request)?,
    };

    let window = ViewWindow::from_request(&request)?;
    let cell_meta = collect_cell_meta(&rows, &window, &dataset.status_periods, today);

    let report = Report { rows, cell_meta };
    println!("{}", serde_json::to_string_pretty(&report)?);
    info!("report written to stdout");
    Ok(())
}

fn collect_cell_meta(
    rows: &[PivotRow],
    window: &ViewWindow,
    status_periods: &[StatusPeriod],
    today: chrono::NaiveDate,
) -> BTreeMap<String, BTreeMap<u32, CellMeta>> {
    let max = max_in_view(rows);
    let mut meta = BTreeMap::new();

    for parent in rows {
        for leaf in parent.children.iter().filter(|child| child.kind == RowKind::Leaf) {
            let periods: Vec<StatusPeriod> = match leaf.subject_id {
                Some(subject_id) => periods_for(subject_id, status_periods)
                    .into_iter()
                    .cloned()
                    .collect(),
                None => Vec::new(),
            };

            let mut per_column = BTreeMap::new();
            for day in window.days() {
                let Some(column) = window.column_for(*day) else {
                    continue;
                };
                per_column.insert(
                    column,
                    cell_meta(*day, &periods, today, leaf.cell(column), max),
                );
            }
            meta.insert(format!("{} / {}", parent.label, leaf.label), per_column);
        }
    }

    meta
}

use anyhow::{Context, Result};
use compute::window::ViewWindow;
use tracing::{debug, info};

use crate::cli::{Table, ViewArgs};
use crate::dataset::Dataset;

pub fn export(view: &ViewArgs, output: &str) -> Result<()> {
    let dataset = Dataset::load(&view.dataset)?;
    let request = view.to_request();
    let today = view.today();
    debug!(?request, %today, output, "computing export");

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
    let sheet = compute::export::flatten(&rows, &window)?;

    let mut writer = csv::Writer::from_path(output)
        .with_context(|| format!("failed to create output file {output}"))?;
    writer.write_record(&sheet.headers)?;
    for row in &sheet.rows {
        writer.write_record(row)?;
    }
    writer.flush()?;

    info!(rows = sheet.rows.len(), path = output, "sheet exported");
    Ok(())
}

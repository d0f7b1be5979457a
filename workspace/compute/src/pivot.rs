//! Hierarchical pivot construction.
//!
//! Two flavors share the same row machinery: balance/limit/risk subjects
//! pivot their gap-filled daily readings, income/expense records pivot raw
//! transaction sums. Parents group leaves in first-seen order and every
//! roll-up goes through the currency-safe accumulator.

use std::collections::{BTreeMap, BTreeSet, HashMap};

use chrono::Datelike;
use common::Granularity;
use model::entities::prelude::*;
use model::value::CellValue;
use serde::Serialize;
use tracing::{debug, info, instrument, warn};

use crate::accumulate::{accumulate, accumulate_all};
use crate::carry_forward::{Reading, ResolvedDay};
use crate::cells::format_cell;
use crate::error::Result;
use crate::window::ViewWindow;

/// Display label of the synthetic weekly roll-up leaf.
pub const SUBTOTAL_LABEL: &str = "Subtotal";

/// Display label of the cross-parent summary row.
pub const GRAND_TOTAL_LABEL: &str = "Grand Total";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RowKind {
    /// A group row holding leaves, with roll-up columns.
    Parent,
    /// One subject or one (region, account, description) line.
    Leaf,
    /// Synthetic weekly roll-up appended under a parent.
    Subtotal,
    /// Synthetic cross-parent summary row.
    GrandTotal,
}

/// One row of the pivot hierarchy.
///
/// Columns are keyed by day-of-month for monthly/weekly views and by
/// month-of-year for yearly views. Ephemeral: rebuilt per view request.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PivotRow {
    pub label: String,
    pub kind: RowKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subject_id: Option<i32>,
    pub columns: BTreeMap<u32, CellValue>,
    /// Human-readable contribution lists for yearly tooltips.
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub notes: BTreeMap<u32, Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total: Option<CellValue>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<PivotRow>,
}

impl PivotRow {
    pub fn new(label: impl Into<String>, kind: RowKind) -> Self {
        Self {
            label: label.into(),
            kind,
            subject_id: None,
            columns: BTreeMap::new(),
            notes: BTreeMap::new(),
            total: None,
            children: Vec::new(),
        }
    }

    pub fn cell(&self, column: u32) -> Option<&CellValue> {
        self.columns.get(&column)
    }

    /// The non-synthetic leaves under this row.
    pub fn leaves(&self) -> impl Iterator<Item = &PivotRow> {
        self.children.iter().filter(|child| child.kind == RowKind::Leaf)
    }
}

/// Builds the two-level pivot hierarchy for one view window.
#[derive(Debug)]
pub struct PivotAggregator {
    reading: Reading,
}

impl PivotAggregator {
    /// Aggregates the end-of-day reading, the default for every table.
    pub fn new() -> Self {
        Self {
            reading: Reading::Evening,
        }
    }

    /// Aggregates the given reading instead (e.g. morning tables).
    pub fn with_reading(reading: Reading) -> Self {
        Self { reading }
    }

    /// Pivots gap-filled snapshot series, one leaf per subject grouped by
    /// `group_key` in first-seen order.
    #[instrument(skip(self, subjects, resolved, window), fields(num_subjects = subjects.len()))]
    pub fn aggregate_snapshots(
        &self,
        subjects: &[Subject],
        resolved: &HashMap<i32, Vec<ResolvedDay>>,
        window: &ViewWindow,
        search_text: Option<&str>,
    ) -> Result<Vec<PivotRow>> {
        let search = search_text.map(str::to_lowercase);
        let mut parents: Vec<PivotRow> = Vec::new();
        let mut parent_index: HashMap<String, usize> = HashMap::new();

        for subject in subjects {
            if !matches_search(search.as_deref(), &[&subject.display_name, &subject.group_key]) {
                continue;
            }

            let leaf = self.snapshot_leaf(subject, resolved.get(&subject.id), window)?;
            let index = *parent_index.entry(subject.group_key.clone()).or_insert_with(|| {
                parents.push(PivotRow::new(subject.group_key.clone(), RowKind::Parent));
                parents.len() - 1
            });
            parents[index].children.push(leaf);
        }

        self.finish(&mut parents, window)?;
        info!(rows = parents.len(), "snapshot pivot built");
        Ok(parents)
    }

    /// Pivots income/expense records, one leaf per (region, account,
    /// description) combination. No carry-forward applies here.
    #[instrument(skip(self, records, window), fields(num_records = records.len()))]
    pub fn aggregate_transactions(
        &self,
        records: &[TransactionRecord],
        window: &ViewWindow,
        search_text: Option<&str>,
    ) -> Result<Vec<PivotRow>> {
        let search = search_text.map(str::to_lowercase);
        let mut parents: Vec<PivotRow> = Vec::new();
        let mut parent_index: HashMap<String, usize> = HashMap::new();
        let mut leaf_index: HashMap<(String, String, String), (usize, usize)> = HashMap::new();

        for record in records {
            if !window.contains(record.date) {
                continue;
            }
            if !matches_search(
                search.as_deref(),
                &[&record.region, &record.account, &record.description],
            ) {
                continue;
            }
            let Some(column) = window.column_for(record.date) else {
                continue;
            };

            let parent = *parent_index.entry(record.region.clone()).or_insert_with(|| {
                parents.push(PivotRow::new(record.region.clone(), RowKind::Parent));
                parents.len() - 1
            });

            let key = (
                record.region.clone(),
                record.account.clone(),
                record.description.clone(),
            );
            let (parent, leaf) = *leaf_index.entry(key).or_insert_with(|| {
                let row = PivotRow::new(
                    format!("{} / {}", record.account, record.description),
                    RowKind::Leaf,
                );
                parents[parent].children.push(row);
                (parent, parents[parent].children.len() - 1)
            });

            let row = &mut parents[parent].children[leaf];
            let merged = accumulate(row.columns.get(&column), Some(&record.amount))?;
            if let Some(merged) = merged {
                row.columns.insert(column, merged);
            }

            if window.granularity() == Granularity::Yearly {
                row.notes.entry(column).or_default().push(format!(
                    "{:02}.{:02}: {}",
                    record.date.day(),
                    record.date.month(),
                    format_cell(Some(&record.amount))
                ));
            }
        }

        for parent in &mut parents {
            for leaf in parent.children.iter_mut() {
                leaf.total = accumulate_all(leaf.columns.values().map(Some))?;
            }
        }

        self.finish(&mut parents, window)?;
        info!(rows = parents.len(), "transaction pivot built");
        Ok(parents)
    }

    fn snapshot_leaf(
        &self,
        subject: &Subject,
        series: Option<&Vec<ResolvedDay>>,
        window: &ViewWindow,
    ) -> Result<PivotRow> {
        let mut leaf = PivotRow::new(subject.display_name.clone(), RowKind::Leaf);
        leaf.subject_id = Some(subject.id);

        match series {
            Some(series) => {
                for day in series {
                    let Some(column) = window.column_for(day.date) else {
                        continue;
                    };
                    let Some(value) = day.reading(self.reading) else {
                        continue;
                    };
                    let merged = accumulate(leaf.columns.get(&column), Some(value))?;
                    if let Some(merged) = merged {
                        leaf.columns.insert(column, merged);
                    }
                }
            }
            None => {
                warn!(subject_id = subject.id, "no resolved series for subject");
            }
        }

        leaf.total = accumulate_all(leaf.columns.values().map(Some))?;
        Ok(leaf)
    }

    /// Rolls up every parent and appends the synthetic rows the view needs.
    fn finish(&self, parents: &mut Vec<PivotRow>, window: &ViewWindow) -> Result<()> {
        for parent in parents.iter_mut() {
            self.roll_up(parent, window)?;
        }
        if window.granularity() == Granularity::Yearly {
            if let Some(grand) = grand_total(parents)? {
                parents.push(grand);
            }
        }
        Ok(())
    }

    fn roll_up(&self, parent: &mut PivotRow, window: &ViewWindow) -> Result<()> {
        for key in window.column_keys() {
            let folded = accumulate_all(parent.leaves().map(|leaf| leaf.columns.get(&key)))?;
            if let Some(folded) = folded {
                parent.columns.insert(key, folded);
            }
        }
        parent.total = accumulate_all(parent.leaves().map(|leaf| leaf.total.as_ref()))?;

        if window.granularity() == Granularity::Yearly {
            for key in window.column_keys() {
                let contributions: Vec<String> = parent
                    .leaves()
                    .filter_map(|leaf| {
                        leaf.cell(key)
                            .map(|cell| format!("{}: {}", leaf.label, format_cell(Some(cell))))
                    })
                    .collect();
                if !contributions.is_empty() {
                    parent.notes.insert(key, contributions);
                }
            }
        }

        if window.granularity() == Granularity::Weekly {
            let mut subtotal = PivotRow::new(SUBTOTAL_LABEL, RowKind::Subtotal);
            subtotal.columns = parent.columns.clone();
            subtotal.total = parent.total.clone();
            parent.children.push(subtotal);
        }

        debug!(parent = %parent.label, children = parent.children.len(), "parent rolled up");
        Ok(())
    }
}

impl Default for PivotAggregator {
    fn default() -> Self {
        Self::new()
    }
}

/// Sums every parent row into one summary row, always via the accumulator,
/// never by re-parsing formatted cells. Synthetic rows never double-count
/// because parent columns are folded from real leaves only.
pub fn grand_total(rows: &[PivotRow]) -> Result<Option<PivotRow>> {
    let parents: Vec<&PivotRow> = rows.iter().filter(|row| row.kind == RowKind::Parent).collect();
    if parents.is_empty() {
        return Ok(None);
    }

    let mut grand = PivotRow::new(GRAND_TOTAL_LABEL, RowKind::GrandTotal);
    let keys: BTreeSet<u32> = parents
        .iter()
        .flat_map(|parent| parent.columns.keys().copied())
        .collect();

    for key in keys {
        let folded = accumulate_all(parents.iter().map(|parent| parent.columns.get(&key)))?;
        if let Some(folded) = folded {
            grand.columns.insert(key, folded);
        }
    }
    grand.total = accumulate_all(parents.iter().map(|parent| parent.total.as_ref()))?;
    Ok(Some(grand))
}

fn matches_search(search: Option<&str>, haystacks: &[&str]) -> bool {
    match search {
        None => true,
        Some(needle) => haystacks
            .iter()
            .any(|haystack| haystack.to_lowercase().contains(needle)),
    }
}

//! The reconciliation and pivot engine.
//!
//! A pure, synchronous pipeline: callers hand over complete in-memory
//! collections for the requested period (fetched by the data-access
//! collaborator) and get derived pivot structures back. Nothing here does
//! I/O, and derived series are rebuilt from scratch on every request.

pub mod accumulate;
pub mod carry_forward;
pub mod cells;
pub mod editability;
pub mod error;
pub mod export;
pub mod heatmap;
pub mod pivot;
pub mod testing;
pub mod window;

use std::collections::{HashMap, HashSet};

use chrono::NaiveDate;
use common::ViewRequest;
use model::entities::prelude::*;
use tracing::{instrument, warn};

use crate::carry_forward::resolve;
use crate::error::Result;
use crate::pivot::{PivotAggregator, PivotRow};
use crate::window::ViewWindow;

/// Computes the balance/limit/risk pivot for one view request.
///
/// Each subject's sparse entries are gap-filled over the window (capped at
/// `today`) before aggregation. Entries referencing unknown subjects are a
/// data-quality issue upstream: dropped with a warning, never fatal.
#[instrument(skip(subjects, entries, request), fields(num_subjects = subjects.len(), num_entries = entries.len(), today = %today))]
pub fn snapshot_pivot(
    subjects: &[Subject],
    entries: &[SnapshotEntry],
    request: &ViewRequest,
    today: NaiveDate,
) -> Result<Vec<PivotRow>> {
    let window = ViewWindow::from_request(request)?;
    let (from, to) = window.range();

    let known: HashSet<i32> = subjects.iter().map(|subject| subject.id).collect();
    let mut by_subject: HashMap<i32, Vec<SnapshotEntry>> = HashMap::new();
    for entry in entries {
        if !known.contains(&entry.subject_id) {
            warn!(
                subject_id = entry.subject_id,
                date = %entry.date,
                "snapshot entry references an unknown subject, dropped"
            );
            continue;
        }
        by_subject
            .entry(entry.subject_id)
            .or_default()
            .push(entry.clone());
    }

    let mut resolved: HashMap<i32, Vec<carry_forward::ResolvedDay>> = HashMap::new();
    for subject in subjects {
        let subject_entries = by_subject.remove(&subject.id).unwrap_or_default();
        let series = resolve(
            &subject_entries,
            subject.base_value.as_ref(),
            from,
            to,
            today,
        );
        resolved.insert(subject.id, series);
    }

    PivotAggregator::new().aggregate_snapshots(
        subjects,
        &resolved,
        &window,
        request.search_text.as_deref(),
    )
}

/// Computes the income/expense pivot for one view request.
///
/// Transaction lines are point events: days without records sum to nothing,
/// and no carry-forward applies.
#[instrument(skip(records, request), fields(num_records = records.len()))]
pub fn transaction_pivot(
    records: &[TransactionRecord],
    request: &ViewRequest,
) -> Result<Vec<PivotRow>> {
    let window = ViewWindow::from_request(request)?;
    PivotAggregator::new().aggregate_transactions(
        records,
        &window,
        request.search_text.as_deref(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use testing::{
        ScenarioCarryForward, ScenarioMultiCurrency, ScenarioStatusLock, ScenarioWeeklySubtotal,
        TestScenarioBuilder, run_and_assert_scenario,
    };

    #[test]
    fn test_scenario_carry_forward() {
        run_and_assert_scenario(&ScenarioCarryForward::new())
            .expect("carry-forward scenario failed");
    }

    #[test]
    fn test_scenario_weekly_subtotal() {
        run_and_assert_scenario(&ScenarioWeeklySubtotal::new())
            .expect("weekly subtotal scenario failed");
    }

    #[test]
    fn test_scenario_multi_currency() {
        run_and_assert_scenario(&ScenarioMultiCurrency::new())
            .expect("multi-currency scenario failed");
    }

    #[test]
    fn test_scenario_status_lock() {
        run_and_assert_scenario(&ScenarioStatusLock::new())
            .expect("status lock scenario failed");
    }

    #[test]
    fn test_snapshot_pivot_is_idempotent() {
        let scenario = ScenarioCarryForward::new().get_scenario();
        let first = snapshot_pivot(
            &scenario.subjects,
            &scenario.entries,
            &scenario.request,
            scenario.today,
        )
        .unwrap();
        let second = snapshot_pivot(
            &scenario.subjects,
            &scenario.entries,
            &scenario.request,
            scenario.today,
        )
        .unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_unknown_subject_entries_are_dropped() {
        let mut scenario = ScenarioCarryForward::new().get_scenario();
        scenario.entries.push(model::entities::prelude::SnapshotEntry::evening(
            999,
            chrono::NaiveDate::from_ymd_opt(2025, 3, 4).unwrap(),
            model::value::CellValue::Scalar(rust_decimal::Decimal::new(777, 0)),
        ));

        let rows = snapshot_pivot(
            &scenario.subjects,
            &scenario.entries,
            &scenario.request,
            scenario.today,
        )
        .unwrap();

        // the stray entry changes nothing
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].children.len(), 1);
    }
}

//! Scenario-based test support.
//!
//! Scenarios bundle the records, the view request and the expected cells so
//! a whole pipeline run is asserted in one place.

pub mod scenario_carry_forward;
pub mod scenario_multi_currency;
pub mod scenario_status_lock;
pub mod scenario_weekly_subtotal;

pub use scenario_carry_forward::ScenarioCarryForward;
pub use scenario_multi_currency::ScenarioMultiCurrency;
pub use scenario_status_lock::ScenarioStatusLock;
pub use scenario_weekly_subtotal::ScenarioWeeklySubtotal;

use chrono::NaiveDate;
use common::ViewRequest;
use model::entities::prelude::*;
use model::value::CellValue;

use crate::editability::{is_editable, periods_for};
use crate::error::Result as ComputeResult;
use crate::pivot::PivotRow;

/// Expected pivot cells, in the schema (row label, column key, expected value).
pub type AssertResult = Vec<(String, u32, Option<CellValue>)>;

/// Expected editability decisions, in the schema (subject id, date, editable).
pub type EditAssert = Vec<(i32, NaiveDate, bool)>;

/// Prepared test scenario.
pub struct TestScenario {
    pub subjects: Vec<Subject>,
    pub status_periods: Vec<StatusPeriod>,
    pub entries: Vec<SnapshotEntry>,
    pub records: Vec<TransactionRecord>,
    pub today: NaiveDate,
    pub request: ViewRequest,
    pub cell_asserts: AssertResult,
    pub edit_asserts: EditAssert,
}

/// Trait for building test scenarios.
pub trait TestScenarioBuilder {
    fn get_scenario(&self) -> TestScenario;
}

/// Finds a row by label anywhere in the two-level hierarchy.
pub fn find_row<'a>(rows: &'a [PivotRow], label: &str) -> Option<&'a PivotRow> {
    for row in rows {
        if row.label == label {
            return Some(row);
        }
        if let Some(child) = row.children.iter().find(|child| child.label == label) {
            return Some(child);
        }
    }
    None
}

/// Runs the pipeline over a scenario and checks every expected cell and
/// editability decision.
pub fn run_and_assert_scenario(builder: &dyn TestScenarioBuilder) -> ComputeResult<()> {
    let scenario = builder.get_scenario();

    let rows = if scenario.records.is_empty() {
        crate::snapshot_pivot(
            &scenario.subjects,
            &scenario.entries,
            &scenario.request,
            scenario.today,
        )?
    } else {
        crate::transaction_pivot(&scenario.records, &scenario.request)?
    };

    for (label, column, expected) in &scenario.cell_asserts {
        let row = find_row(&rows, label)
            .unwrap_or_else(|| panic!("row '{label}' not found in pivot"));
        assert_eq!(
            row.cell(*column),
            expected.as_ref(),
            "cell '{label}' @ column {column}"
        );
    }

    for (subject_id, date, expected) in &scenario.edit_asserts {
        let periods: Vec<StatusPeriod> = periods_for(*subject_id, &scenario.status_periods)
            .into_iter()
            .cloned()
            .collect();
        assert_eq!(
            is_editable(*date, &periods, scenario.today),
            *expected,
            "editability of subject {subject_id} @ {date}"
        );
    }

    Ok(())
}

use chrono::NaiveDate;
use common::ViewRequest;
use model::entities::prelude::*;
use model::value::CellValue;
use rust_decimal::Decimal;

use crate::testing::{TestScenario, TestScenarioBuilder};

/// A bank account read twice in a month: the evening reading on the 5th
/// must carry through every day until the morning reading on the 12th
/// replaces it.
pub struct ScenarioCarryForward {}

impl ScenarioCarryForward {
    pub fn new() -> Self {
        Self {}
    }
}

impl Default for ScenarioCarryForward {
    fn default() -> Self {
        Self::new()
    }
}

impl TestScenarioBuilder for ScenarioCarryForward {
    fn get_scenario(&self) -> TestScenario {
        let date = |d: u32| NaiveDate::from_ymd_opt(2025, 3, d).unwrap();
        let value = |n: i64| CellValue::Scalar(Decimal::new(n, 0));

        let subject = Subject::new(1, "Garanti", "Vadesiz");
        let entries = vec![
            SnapshotEntry::evening(1, date(5), value(1000)),
            SnapshotEntry::morning(1, date(12), value(1200)),
        ];

        let mut cell_asserts = vec![
            // nothing known before the first reading
            ("Vadesiz".to_string(), 3, None),
            // the morning-only entry resolves its evening by same-day fallback
            ("Vadesiz".to_string(), 12, Some(value(1200))),
            // parent roll-up mirrors the single leaf
            ("Garanti".to_string(), 8, Some(value(1000))),
        ];
        for day in 5..=11 {
            cell_asserts.push(("Vadesiz".to_string(), day, Some(value(1000))));
        }

        TestScenario {
            subjects: vec![subject],
            status_periods: Vec::new(),
            entries,
            records: Vec::new(),
            today: date(31),
            request: ViewRequest::monthly(2025, 3),
            cell_asserts,
            edit_asserts: Vec::new(),
        }
    }
}

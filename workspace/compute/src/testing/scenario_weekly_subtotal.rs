use chrono::NaiveDate;
use common::ViewRequest;
use model::entities::prelude::*;
use model::value::CellValue;
use rust_decimal::Decimal;

use crate::pivot::SUBTOTAL_LABEL;
use crate::testing::{TestScenario, TestScenarioBuilder};

/// Two accounts of one bank with day-7 readings of 50 and 150 and zero on
/// every other day of the week: the synthetic subtotal leaf and the parent
/// roll-up must both show 200 on day 7.
pub struct ScenarioWeeklySubtotal {}

impl ScenarioWeeklySubtotal {
    pub fn new() -> Self {
        Self {}
    }
}

impl Default for ScenarioWeeklySubtotal {
    fn default() -> Self {
        Self::new()
    }
}

impl TestScenarioBuilder for ScenarioWeeklySubtotal {
    fn get_scenario(&self) -> TestScenario {
        let date = |d: u32| NaiveDate::from_ymd_opt(2025, 3, d).unwrap();
        let value = |n: i64| CellValue::Scalar(Decimal::new(n, 0));

        let subjects = vec![
            Subject::new(1, "Garanti", "Vadesiz"),
            Subject::new(2, "Garanti", "Vadeli"),
        ];
        let entries = vec![
            SnapshotEntry::evening(1, date(1), value(0)),
            SnapshotEntry::full(1, date(7), value(50), value(50)),
            SnapshotEntry::evening(2, date(1), value(0)),
            SnapshotEntry::full(2, date(7), value(150), value(150)),
        ];

        let cell_asserts = vec![
            ("Vadesiz".to_string(), 7, Some(value(50))),
            ("Vadeli".to_string(), 7, Some(value(150))),
            ("Vadesiz".to_string(), 3, Some(value(0))),
            (SUBTOTAL_LABEL.to_string(), 7, Some(value(200))),
            (SUBTOTAL_LABEL.to_string(), 3, Some(value(0))),
            ("Garanti".to_string(), 7, Some(value(200))),
        ];

        TestScenario {
            subjects,
            status_periods: Vec::new(),
            entries,
            records: Vec::new(),
            today: date(31),
            request: ViewRequest::weekly(2025, 3, 1),
            cell_asserts,
            edit_asserts: Vec::new(),
        }
    }
}

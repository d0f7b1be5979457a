use chrono::NaiveDate;
use common::ViewRequest;
use model::entities::prelude::*;
use model::value::CellValue;
use rust_decimal::Decimal;

use crate::testing::{TestScenario, TestScenarioBuilder};

/// An account blocked from 2025-03-10: the day before stays editable, the
/// change date and everything after lock, and future dates lock regardless
/// of status.
pub struct ScenarioStatusLock {}

impl ScenarioStatusLock {
    pub fn new() -> Self {
        Self {}
    }
}

impl Default for ScenarioStatusLock {
    fn default() -> Self {
        Self::new()
    }
}

impl TestScenarioBuilder for ScenarioStatusLock {
    fn get_scenario(&self) -> TestScenario {
        let date = |d: u32| NaiveDate::from_ymd_opt(2025, 3, d).unwrap();
        let today = date(15);

        let subjects = vec![
            Subject::new(1, "Garanti", "Vadesiz"),
            Subject::new(2, "Akbank", "Vadeli"),
        ];
        let status_periods = vec![StatusPeriod {
            subject_id: 1,
            status: SubjectStatus::Bloke,
            start_date: date(10),
            end_date: None,
        }];
        let entries = vec![SnapshotEntry::evening(
            1,
            date(2),
            CellValue::Scalar(Decimal::new(1000, 0)),
        )];

        let edit_asserts = vec![
            (1, date(9), true),
            (1, date(10), false),
            (1, date(14), false),
            // future dates lock for everyone, status or not
            (1, date(16), false),
            (2, date(16), false),
            // a subject with no status history is open for past dates
            (2, date(9), true),
            (2, today, true),
        ];

        TestScenario {
            subjects,
            status_periods,
            entries,
            records: Vec::new(),
            today,
            request: ViewRequest::monthly(2025, 3),
            cell_asserts: Vec::new(),
            edit_asserts,
        }
    }
}

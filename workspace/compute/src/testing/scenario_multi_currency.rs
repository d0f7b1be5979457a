use std::collections::BTreeMap;

use chrono::NaiveDate;
use common::ViewRequest;
use model::entities::prelude::*;
use model::value::CellValue;
use rust_decimal::Decimal;

use crate::testing::{TestScenario, TestScenarioBuilder};

/// Two same-day expense lines in different currencies: the cell must stay a
/// per-currency map, never a conflated 110.
pub struct ScenarioMultiCurrency {}

impl ScenarioMultiCurrency {
    pub fn new() -> Self {
        Self {}
    }
}

impl Default for ScenarioMultiCurrency {
    fn default() -> Self {
        Self::new()
    }
}

impl TestScenarioBuilder for ScenarioMultiCurrency {
    fn get_scenario(&self) -> TestScenario {
        let day = NaiveDate::from_ymd_opt(2025, 3, 7).unwrap();

        let records = vec![
            TransactionRecord::new(
                "Marmara",
                "Kasa",
                "Kira",
                day,
                CellValue::of_currency("TRY", Decimal::new(100, 0)),
            ),
            TransactionRecord::new(
                "Marmara",
                "Kasa",
                "Kira",
                day,
                CellValue::of_currency("USD", Decimal::new(10, 0)),
            ),
        ];

        let mut expected = BTreeMap::new();
        expected.insert("TRY".to_string(), Decimal::new(100, 0));
        expected.insert("USD".to_string(), Decimal::new(10, 0));

        let cell_asserts = vec![
            ("Kasa / Kira".to_string(), 7, Some(CellValue::Multi(expected.clone()))),
            ("Marmara".to_string(), 7, Some(CellValue::Multi(expected))),
        ];

        TestScenario {
            subjects: Vec::new(),
            status_periods: Vec::new(),
            entries: Vec::new(),
            records,
            today: NaiveDate::from_ymd_opt(2025, 3, 31).unwrap(),
            request: ViewRequest::monthly(2025, 3),
            cell_asserts,
            edit_asserts: Vec::new(),
        }
    }
}

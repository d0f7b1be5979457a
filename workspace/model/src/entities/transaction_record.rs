use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::value::CellValue;

/// One income or expense line.
///
/// Unlike snapshot entries these are point events, so carry-forward never
/// applies: a day with no records simply sums to nothing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionRecord {
    /// Parent grouping for the pivot, e.g. a branch or region name.
    pub region: String,
    pub account: String,
    pub description: String,
    pub date: NaiveDate,
    pub amount: CellValue,
}

impl TransactionRecord {
    pub fn new(
        region: impl Into<String>,
        account: impl Into<String>,
        description: impl Into<String>,
        date: NaiveDate,
        amount: CellValue,
    ) -> Self {
        Self {
            region: region.into(),
            account: account.into(),
            description: description.into(),
            date,
            amount,
        }
    }

    /// Leaf identity in the pivot: one row per (region, account, description).
    pub fn leaf_key(&self) -> (&str, &str, &str) {
        (&self.region, &self.account, &self.description)
    }
}

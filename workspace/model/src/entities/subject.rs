use serde::{Deserialize, Serialize};

use crate::value::CellValue;

/// An entity tracked over time: a bank account, a credit card, or an
/// overdraft (KMH) limit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Subject {
    pub id: i32,
    /// Grouping key for the pivot's parent rows, e.g. the bank name.
    pub group_key: String,
    pub display_name: String,
    /// Natural starting value, e.g. a credit card's issued limit. Bank
    /// balances have no natural base and leave this unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_value: Option<CellValue>,
    /// ISO 4217 currency code for single-currency subjects. Multi-currency
    /// subjects (income/expense pivots) leave this unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,
}

impl Subject {
    /// Creates a subject with no base value and no fixed currency.
    pub fn new(id: i32, group_key: impl Into<String>, display_name: impl Into<String>) -> Self {
        Self {
            id,
            group_key: group_key.into(),
            display_name: display_name.into(),
            base_value: None,
            currency: None,
        }
    }

    /// Creates a subject with a starting value, e.g. an issued credit limit.
    pub fn with_base(
        id: i32,
        group_key: impl Into<String>,
        display_name: impl Into<String>,
        base_value: CellValue,
    ) -> Self {
        Self {
            id,
            group_key: group_key.into(),
            display_name: display_name.into(),
            base_value: Some(base_value),
            currency: None,
        }
    }
}

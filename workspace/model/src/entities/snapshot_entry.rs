use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::value::CellValue;

/// One recorded morning/evening observation for a subject on one date.
///
/// Entries are unique per (subject, date); edits upstream are idempotent
/// upserts. Either reading may be absent: gaps are filled later by
/// carry-forward, never stored back.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SnapshotEntry {
    pub subject_id: i32,
    pub date: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub morning_value: Option<CellValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub evening_value: Option<CellValue>,
}

impl SnapshotEntry {
    /// Creates an entry with only an evening reading.
    pub fn evening(subject_id: i32, date: NaiveDate, value: CellValue) -> Self {
        Self {
            subject_id,
            date,
            morning_value: None,
            evening_value: Some(value),
        }
    }

    /// Creates an entry with only a morning reading.
    pub fn morning(subject_id: i32, date: NaiveDate, value: CellValue) -> Self {
        Self {
            subject_id,
            date,
            morning_value: Some(value),
            evening_value: None,
        }
    }

    /// Creates an entry with both readings.
    pub fn full(subject_id: i32, date: NaiveDate, morning: CellValue, evening: CellValue) -> Self {
        Self {
            subject_id,
            date,
            morning_value: Some(morning),
            evening_value: Some(evening),
        }
    }

    /// True when neither reading is present.
    pub fn is_empty(&self) -> bool {
        self.morning_value.is_none() && self.evening_value.is_none()
    }
}

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Operational status of a subject during a validity window.
///
/// The wire strings are the backend's Turkish status names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SubjectStatus {
    /// Active: entries may be edited.
    Aktif,
    /// Inactive: entries are locked from the period start on.
    Pasif,
    /// Blocked: entries are locked from the period start on.
    Bloke,
}

impl SubjectStatus {
    /// True for the statuses that lock editing.
    pub fn locks_editing(self) -> bool {
        matches!(self, SubjectStatus::Pasif | SubjectStatus::Bloke)
    }
}

/// A date range during which a subject holds one operational status.
///
/// Periods for one subject do not overlap; that is a persistence-layer
/// invariant, not something the compute pipeline re-checks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusPeriod {
    pub subject_id: i32,
    pub status: SubjectStatus,
    pub start_date: NaiveDate,
    /// Unset means the period is open-ended.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<NaiveDate>,
}

impl StatusPeriod {
    /// True when `date` falls inside `[start_date, end_date-or-open]`.
    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start_date && self.end_date.is_none_or(|end| date <= end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_contains_open_ended() {
        let period = StatusPeriod {
            subject_id: 1,
            status: SubjectStatus::Bloke,
            start_date: date(2025, 3, 10),
            end_date: None,
        };

        assert!(!period.contains(date(2025, 3, 9)));
        assert!(period.contains(date(2025, 3, 10)));
        assert!(period.contains(date(2030, 1, 1)));
    }

    #[test]
    fn test_contains_bounded() {
        let period = StatusPeriod {
            subject_id: 1,
            status: SubjectStatus::Pasif,
            start_date: date(2025, 1, 1),
            end_date: Some(date(2025, 1, 31)),
        };

        assert!(period.contains(date(2025, 1, 31)));
        assert!(!period.contains(date(2025, 2, 1)));
    }

    #[test]
    fn test_status_wire_names() {
        let json = serde_json::to_string(&SubjectStatus::Bloke).unwrap();
        assert_eq!(json, r#""Bloke""#);
        let status: SubjectStatus = serde_json::from_str(r#""Aktif""#).unwrap();
        assert_eq!(status, SubjectStatus::Aktif);
    }
}

//! Cell edit locking from status-validity windows.

use chrono::NaiveDate;
use model::entities::status_period::StatusPeriod;

/// Decides whether a calendar cell may be edited.
///
/// Future dates are always locked regardless of status history. Otherwise
/// the status period covering `date` governs: `Pasif`/`Bloke` lock from the
/// period's start date on, inclusive. A subject with no covering period is
/// editable. Overlapping periods are undefined upstream; the period with
/// the most recent start wins, with no attempt at reconciliation.
pub fn is_editable(date: NaiveDate, periods: &[StatusPeriod], today: NaiveDate) -> bool {
    if date > today {
        return false;
    }

    let governing = periods
        .iter()
        .filter(|period| period.contains(date))
        .max_by_key(|period| period.start_date);

    match governing {
        Some(period) => !period.status.locks_editing(),
        None => true,
    }
}

/// The status periods belonging to one subject.
pub fn periods_for(subject_id: i32, periods: &[StatusPeriod]) -> Vec<&StatusPeriod> {
    periods
        .iter()
        .filter(|period| period.subject_id == subject_id)
        .collect()
}

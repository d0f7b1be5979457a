//! Gap-filling of sparse daily snapshots.
//!
//! Subjects are read irregularly: a balance may be keyed in on Monday and
//! not again until Thursday. The resolver turns those sparse entries into a
//! complete day-by-day series where missing readings inherit the most
//! recent known value.

use std::collections::HashMap;

use chrono::NaiveDate;
use model::entities::snapshot_entry::SnapshotEntry;
use model::value::CellValue;
use tracing::{debug, instrument};

/// Which of the two daily readings a view aggregates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reading {
    Morning,
    Evening,
}

/// One gap-filled day for one subject.
///
/// Derived and ephemeral: rebuilt from raw entries on every request, never
/// stored. Whether a value was explicit or carried is not recorded here;
/// consumers that care re-query the raw entries.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedDay {
    pub date: NaiveDate,
    pub morning: Option<CellValue>,
    pub evening: Option<CellValue>,
}

impl ResolvedDay {
    pub fn reading(&self, reading: Reading) -> Option<&CellValue> {
        match reading {
            Reading::Morning => self.morning.as_ref(),
            Reading::Evening => self.evening.as_ref(),
        }
    }
}

/// Resolves a subject's sparse entries into one [`ResolvedDay`] per day of
/// `[from, min(to, today)]`. Future days are never filled.
///
/// A missing morning falls back to the previous day's evening, then to the
/// carried morning; a missing evening falls back to the same-day morning.
/// Entries dated before `from` warm up the carried state; `base_value`
/// seeds it (e.g. a credit card's issued limit). With no prior entry and no
/// base value the readings stay `None`: rendered as empty, aggregated as
/// zero, never an error.
#[instrument(skip(entries, base_value), fields(num_entries = entries.len(), from = %from, to = %to, today = %today))]
pub fn resolve(
    entries: &[SnapshotEntry],
    base_value: Option<&CellValue>,
    from: NaiveDate,
    to: NaiveDate,
    today: NaiveDate,
) -> Vec<ResolvedDay> {
    let to = to.min(today);
    if from > to {
        debug!("window is entirely in the future, nothing to resolve");
        return Vec::new();
    }

    let mut by_date: HashMap<NaiveDate, &SnapshotEntry> = HashMap::new();
    let mut dates: Vec<NaiveDate> = Vec::new();
    for entry in entries {
        if by_date.insert(entry.date, entry).is_none() {
            dates.push(entry.date);
        }
    }
    dates.sort();

    let mut last_morning: Option<CellValue> = base_value.cloned();
    let mut last_evening: Option<CellValue> = None;

    // Warm up from entries preceding the window so the first in-range day
    // carries the latest prior reading.
    for date in dates.iter().take_while(|date| **date < from) {
        let entry = by_date[date];
        apply_entry(entry, &mut last_morning, &mut last_evening);
    }

    let mut resolved = Vec::new();
    let mut date = from;
    while date <= to {
        match by_date.get(&date) {
            Some(entry) => apply_entry(entry, &mut last_morning, &mut last_evening),
            None => {
                // No entry: the morning inherits the previous evening and
                // the evening falls back to that same value.
                last_morning = last_evening.take().or(last_morning);
                last_evening = last_morning.clone();
            }
        }

        resolved.push(ResolvedDay {
            date,
            morning: last_morning.clone(),
            evening: last_evening.clone(),
        });

        date = match date.succ_opt() {
            Some(next) => next,
            None => break,
        };
    }

    debug!("resolved {} days", resolved.len());
    resolved
}

fn apply_entry(
    entry: &SnapshotEntry,
    last_morning: &mut Option<CellValue>,
    last_evening: &mut Option<CellValue>,
) {
    match &entry.morning_value {
        Some(morning) => *last_morning = Some(morning.clone()),
        None => *last_morning = last_evening.take().or(last_morning.take()),
    }
    match &entry.evening_value {
        Some(evening) => *last_evening = Some(evening.clone()),
        None => *last_evening = last_morning.clone(),
    }
}

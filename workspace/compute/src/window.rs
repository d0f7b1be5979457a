//! Translation of a view request into the concrete calendar slice it shows.
//!
//! Keeping this a pure mapping decouples the weekly/monthly/yearly logic
//! from both the aggregation and the rendering sides.

use chrono::{Datelike, NaiveDate};
use common::{Granularity, ViewRequest};
use tracing::debug;

use crate::error::{EngineError, Result};

/// Returns the number of days in the given month using chrono.
pub fn days_in_month(year: i32, month: u32) -> u32 {
    let next_month_year = year + (month / 12) as i32;
    let next_month = (month % 12) + 1;

    let first_day_next_month = NaiveDate::from_ymd_opt(next_month_year, next_month, 1)
        .expect("month already validated");

    first_day_next_month
        .pred_opt()
        .expect("month start has a predecessor")
        .day()
}

/// Number of 7-day slices a month splits into (the last may be partial).
pub fn weeks_in_month(year: i32, month: u32) -> u32 {
    days_in_month(year, month).div_ceil(7)
}

/// The concrete calendar slice one pivot view displays.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewWindow {
    granularity: Granularity,
    year: i32,
    month: Option<u32>,
    week_index: Option<u32>,
    days: Vec<NaiveDate>,
}

impl ViewWindow {
    /// Builds the window for a view request.
    ///
    /// Monthly: every day of the month. Weekly: the 1-based 7-day slice,
    /// with the index clamped to `[1, ceil(days_in_month / 7)]`. Yearly:
    /// the 12 months, matched by month rather than by day.
    pub fn from_request(request: &ViewRequest) -> Result<Self> {
        Self::new(
            request.granularity,
            request.year,
            request.month,
            request.week_index,
        )
    }

    pub fn new(
        granularity: Granularity,
        year: i32,
        month: Option<u32>,
        week_index: Option<u32>,
    ) -> Result<Self> {
        if NaiveDate::from_ymd_opt(year, 1, 1).is_none() {
            return Err(EngineError::Window(format!("year {year} out of range")));
        }

        let days = match granularity {
            Granularity::Monthly => {
                let month = required_month(month)?;
                month_days(year, month, 1, days_in_month(year, month))
            }
            Granularity::Weekly => {
                let month = required_month(month)?;
                let weeks = weeks_in_month(year, month);
                let week = week_index.unwrap_or(1).clamp(1, weeks);
                if week_index.is_some_and(|requested| requested != week) {
                    debug!(requested = week_index, clamped = week, "week index clamped");
                }
                let first = (week - 1) * 7 + 1;
                let last = (week * 7).min(days_in_month(year, month));
                month_days(year, month, first, last)
            }
            Granularity::Yearly => (1..=12)
                .map(|month| {
                    NaiveDate::from_ymd_opt(year, month, 1).expect("month 1-12 is valid")
                })
                .collect(),
        };

        let week_index = match granularity {
            Granularity::Weekly => {
                let month = required_month(month)?;
                Some(week_index.unwrap_or(1).clamp(1, weeks_in_month(year, month)))
            }
            _ => None,
        };

        Ok(Self {
            granularity,
            year,
            month: match granularity {
                Granularity::Yearly => None,
                _ => month,
            },
            week_index,
            days,
        })
    }

    pub fn granularity(&self) -> Granularity {
        self.granularity
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> Option<u32> {
        self.month
    }

    pub fn week_index(&self) -> Option<u32> {
        self.week_index
    }

    /// The calendar days this window displays. For yearly windows these are
    /// the first days of the 12 months, standing in for whole months.
    pub fn days(&self) -> &[NaiveDate] {
        &self.days
    }

    /// Inclusive date range the window needs data for.
    pub fn range(&self) -> (NaiveDate, NaiveDate) {
        match self.granularity {
            Granularity::Yearly => (
                NaiveDate::from_ymd_opt(self.year, 1, 1).expect("validated"),
                NaiveDate::from_ymd_opt(self.year, 12, 31).expect("validated"),
            ),
            _ => (
                *self.days.first().expect("window is never empty"),
                *self.days.last().expect("window is never empty"),
            ),
        }
    }

    /// Whether a record dated `date` belongs to this window.
    pub fn contains(&self, date: NaiveDate) -> bool {
        match self.granularity {
            Granularity::Yearly => date.year() == self.year,
            _ => {
                let (from, to) = self.range();
                date >= from && date <= to
            }
        }
    }

    /// The column a date lands in: day-of-month for monthly/weekly windows,
    /// month-of-year for yearly ones. `None` when the date is outside.
    pub fn column_for(&self, date: NaiveDate) -> Option<u32> {
        if !self.contains(date) {
            return None;
        }
        match self.granularity {
            Granularity::Yearly => Some(date.month()),
            _ => Some(date.day()),
        }
    }

    /// Column keys in display order.
    pub fn column_keys(&self) -> Vec<u32> {
        match self.granularity {
            Granularity::Yearly => self.days.iter().map(|day| day.month()).collect(),
            _ => self.days.iter().map(|day| day.day()).collect(),
        }
    }

    /// Header label for one column.
    pub fn column_label(&self, key: u32) -> String {
        match self.granularity {
            Granularity::Yearly => NaiveDate::from_ymd_opt(self.year, key, 1)
                .map(|day| day.format("%b").to_string())
                .unwrap_or_else(|| key.to_string()),
            _ => key.to_string(),
        }
    }
}

fn required_month(month: Option<u32>) -> Result<u32> {
    match month {
        Some(month) if (1..=12).contains(&month) => Ok(month),
        Some(month) => Err(EngineError::Window(format!("month {month} out of range"))),
        None => Err(EngineError::Window(
            "monthly and weekly views need a month".to_string(),
        )),
    }
}

fn month_days(year: i32, month: u32, first: u32, last: u32) -> Vec<NaiveDate> {
    (first..=last)
        .map(|day| NaiveDate::from_ymd_opt(year, month, day).expect("day within month"))
        .collect()
}

//! JSON dataset loading.
//!
//! This is the data-access side of the pipeline: the backend dumps its
//! records to one JSON file and everything here arrives in memory before
//! any computation starts. Data-quality problems (malformed dates, stray
//! subject ids, unknown currency codes) drop or warn per record; a bad
//! record never fails the whole load.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use serde::Deserialize;
use tracing::{debug, info, warn};

use model::entities::prelude::*;
use model::value::{CellValue, is_known_currency};

/// Raw record shapes as the backend dumps them. Dates stay strings here so
/// a malformed one drops with a warning instead of failing deserialization.
#[derive(Debug, Deserialize)]
struct RawDataset {
    #[serde(default)]
    subjects: Vec<Subject>,
    #[serde(default)]
    status_periods: Vec<RawStatusPeriod>,
    #[serde(default)]
    snapshot_entries: Vec<RawSnapshotEntry>,
    #[serde(default)]
    transaction_records: Vec<RawTransactionRecord>,
}

#[derive(Debug, Deserialize)]
struct RawStatusPeriod {
    subject_id: i32,
    status: SubjectStatus,
    start_date: String,
    #[serde(default)]
    end_date: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawSnapshotEntry {
    subject_id: i32,
    date: String,
    #[serde(default)]
    morning_value: Option<CellValue>,
    #[serde(default)]
    evening_value: Option<CellValue>,
}

#[derive(Debug, Deserialize)]
struct RawTransactionRecord {
    region: String,
    account: String,
    description: String,
    date: String,
    amount: CellValue,
}

/// The validated in-memory dataset handed to the compute pipeline.
#[derive(Debug)]
pub struct Dataset {
    pub subjects: Vec<Subject>,
    pub status_periods: Vec<StatusPeriod>,
    pub snapshot_entries: Vec<SnapshotEntry>,
    pub transaction_records: Vec<TransactionRecord>,
}

impl Dataset {
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        debug!(path = %path.display(), "loading dataset");
        let text = fs::read_to_string(path)
            .with_context(|| format!("failed to read dataset file {}", path.display()))?;
        Self::from_json(&text)
    }

    pub fn from_json(text: &str) -> Result<Self> {
        let raw: RawDataset =
            serde_json::from_str(text).context("dataset is not valid JSON")?;

        let subjects = raw.subjects;

        let mut status_periods = Vec::new();
        for period in raw.status_periods {
            let Some(start_date) = parse_date(&period.start_date, "status period start") else {
                continue;
            };
            let end_date = match period.end_date {
                None => None,
                Some(end) => match parse_date(&end, "status period end") {
                    Some(end) => Some(end),
                    None => continue,
                },
            };
            if !subjects.iter().any(|subject| subject.id == period.subject_id) {
                warn!(
                    subject_id = period.subject_id,
                    "status period references an unknown subject, dropped"
                );
                continue;
            }
            status_periods.push(StatusPeriod {
                subject_id: period.subject_id,
                status: period.status,
                start_date,
                end_date,
            });
        }

        let mut snapshot_entries = Vec::new();
        for entry in raw.snapshot_entries {
            let Some(date) = parse_date(&entry.date, "snapshot entry") else {
                continue;
            };
            if !subjects.iter().any(|subject| subject.id == entry.subject_id) {
                warn!(
                    subject_id = entry.subject_id,
                    date = %date,
                    "snapshot entry references an unknown subject, dropped"
                );
                continue;
            }
            check_currencies(entry.morning_value.as_ref(), "snapshot morning value");
            check_currencies(entry.evening_value.as_ref(), "snapshot evening value");
            snapshot_entries.push(SnapshotEntry {
                subject_id: entry.subject_id,
                date,
                morning_value: entry.morning_value,
                evening_value: entry.evening_value,
            });
        }

        let mut transaction_records = Vec::new();
        for record in raw.transaction_records {
            let Some(date) = parse_date(&record.date, "transaction record") else {
                continue;
            };
            check_currencies(Some(&record.amount), "transaction amount");
            transaction_records.push(TransactionRecord {
                region: record.region,
                account: record.account,
                description: record.description,
                date,
                amount: record.amount,
            });
        }

        info!(
            subjects = subjects.len(),
            status_periods = status_periods.len(),
            snapshot_entries = snapshot_entries.len(),
            transaction_records = transaction_records.len(),
            "dataset loaded"
        );

        Ok(Self {
            subjects,
            status_periods,
            snapshot_entries,
            transaction_records,
        })
    }
}

fn parse_date(text: &str, what: &str) -> Option<NaiveDate> {
    match NaiveDate::parse_from_str(text, "%Y-%m-%d") {
        Ok(date) => Some(date),
        Err(error) => {
            warn!(date = text, %error, "{what} has a malformed date, dropped");
            None
        }
    }
}

/// Unknown currency codes are kept: they still sum correctly per code, the
/// warning just points at the upstream typo.
fn check_currencies(value: Option<&CellValue>, what: &str) {
    if let Some(CellValue::Multi(map)) = value {
        for code in map.keys() {
            if !is_known_currency(code) {
                warn!(code = %code, "{what} uses a currency code outside ISO 4217");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
        "subjects": [
            {"id": 1, "group_key": "Garanti", "display_name": "Vadesiz"}
        ],
        "status_periods": [
            {"subject_id": 1, "status": "Bloke", "start_date": "2025-03-10"},
            {"subject_id": 1, "status": "Pasif", "start_date": "not-a-date"},
            {"subject_id": 9, "status": "Aktif", "start_date": "2025-01-01"}
        ],
        "snapshot_entries": [
            {"subject_id": 1, "date": "2025-03-05", "evening_value": 1000},
            {"subject_id": 1, "date": "2025-13-40", "evening_value": 500},
            {"subject_id": 7, "date": "2025-03-06", "evening_value": 250}
        ],
        "transaction_records": [
            {"region": "Marmara", "account": "Kasa", "description": "Kira",
             "date": "2025-03-07", "amount": {"TRY": 100}}
        ]
    }"#;

    #[test]
    fn test_bad_records_drop_without_failing() {
        let dataset = Dataset::from_json(SAMPLE).unwrap();

        assert_eq!(dataset.subjects.len(), 1);
        // malformed date and unknown subject both dropped
        assert_eq!(dataset.status_periods.len(), 1);
        assert_eq!(dataset.snapshot_entries.len(), 1);
        assert_eq!(dataset.transaction_records.len(), 1);
    }

    #[test]
    fn test_missing_sections_default_to_empty() {
        let dataset = Dataset::from_json("{}").unwrap();
        assert!(dataset.subjects.is_empty());
        assert!(dataset.snapshot_entries.is_empty());
    }

    #[test]
    fn test_invalid_json_is_an_error() {
        assert!(Dataset::from_json("not json").is_err());
    }
}

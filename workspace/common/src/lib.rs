//! Presentation-layer types shared between the compute pipeline and its
//! consumers. These structs mirror the shapes the rendering collaborator
//! works with so it can consume reports without depending on the engine.

pub mod converters;

use serde::{Deserialize, Serialize};

/// Time slicing of a pivot view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Granularity {
    /// One column per day of the selected month.
    Monthly,
    /// One column per day of one 7-day slice of the selected month.
    Weekly,
    /// One column per calendar month of the selected year.
    Yearly,
}

/// A request for one rendered pivot view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ViewRequest {
    pub granularity: Granularity,
    pub year: i32,
    /// Selected month, 1-12. Ignored for yearly views.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub month: Option<u32>,
    /// 1-based week slice within the month. Weekly views only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub week_index: Option<u32>,
    /// Case-insensitive text filter over leaf row labels.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub search_text: Option<String>,
}

impl ViewRequest {
    pub fn monthly(year: i32, month: u32) -> Self {
        Self {
            granularity: Granularity::Monthly,
            year,
            month: Some(month),
            week_index: None,
            search_text: None,
        }
    }

    pub fn weekly(year: i32, month: u32, week_index: u32) -> Self {
        Self {
            granularity: Granularity::Weekly,
            year,
            month: Some(month),
            week_index: Some(week_index),
            search_text: None,
        }
    }

    pub fn yearly(year: i32) -> Self {
        Self {
            granularity: Granularity::Yearly,
            year,
            month: None,
            week_index: None,
            search_text: None,
        }
    }

    pub fn with_search(mut self, search_text: impl Into<String>) -> Self {
        self.search_text = Some(search_text.into());
        self
    }
}

/// Per-cell presentation attributes derived by the compute pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CellMeta {
    /// Whether the rendering collaborator may open the cell for editing.
    pub editable: bool,
    /// Normalized [0, 1] highlight intensity relative to the visible slice.
    pub heat_intensity: f64,
}

/// A pivot flattened for spreadsheet serialization: one header row plus
/// data rows, each cell already formatted as text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportSheet {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl ExportSheet {
    pub fn new(headers: Vec<String>) -> Self {
        Self {
            headers,
            rows: Vec::new(),
        }
    }

    pub fn push_row(&mut self, row: Vec<String>) {
        self.rows.push(row);
    }

    /// Column count, taken from the header row.
    pub fn width(&self) -> usize {
        self.headers.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_granularity_wire_names() {
        assert_eq!(serde_json::to_string(&Granularity::Weekly).unwrap(), r#""weekly""#);
        let parsed: Granularity = serde_json::from_str(r#""yearly""#).unwrap();
        assert_eq!(parsed, Granularity::Yearly);
    }

    #[test]
    fn test_view_request_builders() {
        let request = ViewRequest::weekly(2025, 3, 2).with_search("garanti");
        assert_eq!(request.granularity, Granularity::Weekly);
        assert_eq!(request.month, Some(3));
        assert_eq!(request.week_index, Some(2));
        assert_eq!(request.search_text.as_deref(), Some("garanti"));
    }
}

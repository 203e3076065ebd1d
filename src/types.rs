//! Core data model types for show ingestion.
//!
//! Parsers produce [`RawRow`]s of loosely-typed [`CellValue`]s; the row normalizer turns those
//! into [`CanonicalShow`] records, and the orchestrator packages them into an
//! [`IngestionResult`].

use std::collections::HashMap;
use std::fmt;

use chrono::{NaiveDate, NaiveDateTime, Timelike};
use serde::{Deserialize, Serialize};

/// File name attached to shows entered through the admin form instead of a file upload.
pub const MANUAL_ENTRY_FILE_NAME: &str = "manual-entry";

/// A single loosely-typed cell as read from the source file.
///
/// CSV input only ever produces [`CellValue::Text`] and [`CellValue::Empty`]; spreadsheets keep
/// the cell type the workbook stores.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    /// Missing/blank cell.
    Empty,
    /// Text cell.
    Text(String),
    /// Integer cell.
    Int(i64),
    /// Floating point cell.
    Float(f64),
    /// Boolean cell.
    Bool(bool),
    /// Date or datetime cell.
    DateTime(NaiveDateTime),
}

impl CellValue {
    /// Whether the cell carries a usable value.
    ///
    /// Blank cells, empty text, numeric zero and `false` are all treated as absent.
    pub fn is_truthy(&self) -> bool {
        match self {
            CellValue::Empty => false,
            CellValue::Text(s) => !s.is_empty(),
            CellValue::Int(i) => *i != 0,
            CellValue::Float(f) => *f != 0.0 && !f.is_nan(),
            CellValue::Bool(b) => *b,
            CellValue::DateTime(_) => true,
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Empty => Ok(()),
            CellValue::Text(s) => f.write_str(s),
            CellValue::Int(i) => write!(f, "{i}"),
            CellValue::Float(v) => {
                if v.fract() == 0.0 && v.abs() < i64::MAX as f64 {
                    write!(f, "{}", *v as i64)
                } else {
                    write!(f, "{v}")
                }
            }
            CellValue::Bool(b) => write!(f, "{b}"),
            CellValue::DateTime(dt) => {
                if dt.num_seconds_from_midnight() == 0 && dt.nanosecond() == 0 {
                    write!(f, "{}", dt.format("%Y-%m-%d"))
                } else {
                    write!(f, "{}", dt.format("%Y-%m-%dT%H:%M:%S"))
                }
            }
        }
    }
}

/// One data row keyed by header text exactly as it appears in the source file.
///
/// Column order is preserved. Lookups come in two flavours: exact header spelling
/// ([`RawRow::get`]) and case-insensitive ([`RawRow::get_all_ignore_case`]). When a header
/// appears more than once, [`RawRow::get`] returns the first occurrence; the case-insensitive
/// lookup yields every column whose header matches, in column order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawRow {
    cells: Vec<(String, CellValue)>,
    exact: HashMap<String, usize>,
    lowercase: HashMap<String, Vec<usize>>,
}

impl RawRow {
    /// Create an empty row.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a cell. Cells with an empty header are dropped.
    pub fn push(&mut self, header: impl Into<String>, value: CellValue) {
        let header = header.into();
        if header.is_empty() {
            return;
        }
        let idx = self.cells.len();
        self.exact.entry(header.clone()).or_insert(idx);
        self.lowercase
            .entry(header.to_lowercase())
            .or_default()
            .push(idx);
        self.cells.push((header, value));
    }

    /// Look up a cell by exact header spelling.
    pub fn get(&self, header: &str) -> Option<&CellValue> {
        self.exact.get(header).map(|&idx| &self.cells[idx].1)
    }

    /// Every cell whose header matches `header` ignoring case, in column order.
    pub fn get_all_ignore_case<'a>(
        &'a self,
        header: &str,
    ) -> impl Iterator<Item = &'a CellValue> + use<'a> {
        self.lowercase
            .get(&header.to_lowercase())
            .into_iter()
            .flatten()
            .map(move |&idx| &self.cells[idx].1)
    }

    /// First cell whose header matches `header` ignoring case.
    pub fn get_ignore_case(&self, header: &str) -> Option<&CellValue> {
        self.get_all_ignore_case(header).next()
    }

    /// Iterate headers in column order.
    pub fn headers(&self) -> impl Iterator<Item = &str> {
        self.cells.iter().map(|(h, _)| h.as_str())
    }

    /// Number of cells in the row.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Whether the row has no cells.
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

impl<K: Into<String>> FromIterator<(K, CellValue)> for RawRow {
    fn from_iter<I: IntoIterator<Item = (K, CellValue)>>(iter: I) -> Self {
        let mut row = RawRow::new();
        for (header, value) in iter {
            row.push(header, value);
        }
        row
    }
}

/// Where a show record came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShowOrigin {
    /// Produced by ingesting the named uploaded file.
    Upload(String),
    /// Typed into the admin form.
    ManualEntry,
}

impl ShowOrigin {
    /// The provenance marker stored on each record.
    pub fn file_name(&self) -> &str {
        match self {
            ShowOrigin::Upload(name) => name,
            ShowOrigin::ManualEntry => MANUAL_ENTRY_FILE_NAME,
        }
    }
}

/// A validated show record ready for persistence.
///
/// Only the row normalizer builds these, and only when circus name, both coordinates and a
/// valid show date are present.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CanonicalShow {
    pub circus_name: String,
    pub venue_name: String,
    pub address: String,
    pub city: String,
    pub state: String,
    pub zip: String,
    pub latitude: String,
    pub longitude: String,
    pub show_date: NaiveDate,
    pub file_name: String,
}

impl CanonicalShow {
    /// Latitude/longitude as numbers (`NaN` where the text is not a number).
    pub fn coords(&self) -> [f64; 2] {
        [parse_coord(&self.latitude), parse_coord(&self.longitude)]
    }
}

impl AsRef<CanonicalShow> for CanonicalShow {
    fn as_ref(&self) -> &CanonicalShow {
        self
    }
}

fn parse_coord(s: &str) -> f64 {
    s.trim().parse::<f64>().unwrap_or(f64::NAN)
}

/// Outcome of one ingestion call, shaped for the HTTP layer.
///
/// `success == false` always comes with an empty `data`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IngestionResult {
    pub success: bool,
    pub message: String,
    pub data: Vec<CanonicalShow>,
}

impl IngestionResult {
    /// A successful result carrying the accepted records.
    pub fn accepted(data: Vec<CanonicalShow>) -> Self {
        Self {
            success: true,
            message: format!("Successfully processed {} records.", data.len()),
            data,
        }
    }

    /// A failed result with a user-facing message and no data.
    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
            data: Vec::new(),
        }
    }

    /// Number of accepted records.
    pub fn record_count(&self) -> usize {
        self.data.len()
    }
}

/// Show details as submitted through the admin form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ManualShowEntry {
    pub circus_name: String,
    pub venue_name: String,
    pub address: String,
    pub city: String,
    pub state: String,
    pub zip: String,
    pub latitude: String,
    pub longitude: String,
    pub show_date: String,
}

impl ManualShowEntry {
    /// View the form as a row so it goes through the same normalizer as uploaded files.
    pub fn to_raw_row(&self) -> RawRow {
        [
            ("circusName", &self.circus_name),
            ("venueName", &self.venue_name),
            ("address", &self.address),
            ("city", &self.city),
            ("state", &self.state),
            ("zip", &self.zip),
            ("latitude", &self.latitude),
            ("longitude", &self.longitude),
            ("showDate", &self.show_date),
        ]
        .into_iter()
        .map(|(header, value)| {
            let value = value.trim();
            let cell = if value.is_empty() {
                CellValue::Empty
            } else {
                CellValue::Text(value.to_owned())
            };
            (header, cell)
        })
        .collect()
    }
}

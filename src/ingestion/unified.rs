//! Unified ingestion entrypoint.
//!
//! Most callers should use [`ingest_upload`], which turns an uploaded file into an
//! [`IngestionResult`]:
//!
//! - The parsing format is inferred from the file extension unless
//!   [`IngestionOptions::format`] forces one.
//! - Every parsed row goes through the row normalizer; rejected rows are logged and dropped
//!   without failing the batch.
//! - Whole-file problems (unsupported format, unreadable content, no rows, no valid rows)
//!   come back as `success: false` with a user-facing message, never as an `Err`.
//! - If an [`IngestionObserver`] is configured, success/failure/alerts and row rejections
//!   are reported to it.

use std::fmt;
use std::path::Path;
use std::sync::Arc;

use tracing::debug;

use crate::error::{IngestionError, PipelineResult};
use crate::types::{CanonicalShow, IngestionResult, RawRow, ShowOrigin};

use super::csv;
use super::normalize::normalize_row;
use super::observability::{IngestionContext, IngestionObserver, IngestionSeverity, IngestionStats};

/// Upload size limit applied by [`IngestionOptions::default`] (10 MiB).
pub const DEFAULT_MAX_FILE_BYTES: usize = 10 * 1024 * 1024;

/// Supported ingestion formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IngestionFormat {
    /// Comma-separated values.
    Csv,
    /// Spreadsheet/workbook formats (feature-gated behind `excel`).
    Excel,
}

impl IngestionFormat {
    /// Parse an ingestion format from a file extension (case-insensitive).
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "csv" => Some(Self::Csv),
            "xlsx" | "xls" | "xlsm" | "xlsb" | "ods" => Some(Self::Excel),
            _ => None,
        }
    }

    /// Infer the format from an uploaded file's name.
    pub fn from_file_name(file_name: &str) -> Option<Self> {
        Path::new(file_name)
            .extension()
            .and_then(|s| s.to_str())
            .and_then(Self::from_extension)
    }
}

/// Options controlling ingestion behavior.
///
/// Use [`Default`] for common cases.
#[derive(Clone)]
pub struct IngestionOptions {
    /// If `None`, infer the format from the file name.
    pub format: Option<IngestionFormat>,
    /// Uploads larger than this are refused. `None` disables the check.
    pub max_file_bytes: Option<usize>,
    /// Optional observer for logging/alerts.
    pub observer: Option<Arc<dyn IngestionObserver>>,
    /// Severity threshold at which `on_alert` is invoked.
    pub alert_at_or_above: IngestionSeverity,
}

impl fmt::Debug for IngestionOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IngestionOptions")
            .field("format", &self.format)
            .field("max_file_bytes", &self.max_file_bytes)
            .field("observer_set", &self.observer.is_some())
            .field("alert_at_or_above", &self.alert_at_or_above)
            .finish()
    }
}

impl Default for IngestionOptions {
    fn default() -> Self {
        Self {
            format: None,
            max_file_bytes: Some(DEFAULT_MAX_FILE_BYTES),
            observer: None,
            alert_at_or_above: IngestionSeverity::Critical,
        }
    }
}

/// Accepted records plus the counts behind them.
#[derive(Debug, Clone, PartialEq)]
pub struct IngestedShows {
    pub shows: Vec<CanonicalShow>,
    pub stats: IngestionStats,
}

/// Turn an uploaded file into an [`IngestionResult`].
///
/// When an observer is configured, this function reports:
///
/// - `on_row_rejected` for every dropped row
/// - `on_success` on success, with row counts
/// - `on_failure` on failure, with a computed severity
/// - `on_alert` on failure when the computed severity is >= `options.alert_at_or_above`
///
/// # Examples
///
/// ```rust
/// use circus_shows::ingestion::{ingest_upload, IngestionOptions};
///
/// let csv = "CIRCUS NAME,COORDS,Show Date\nBig Top,\"40.7736, -73.9566\",2025-04-15\n";
/// let result = ingest_upload(csv.as_bytes(), "tour.csv", &IngestionOptions::default());
///
/// assert!(result.success);
/// assert_eq!(result.data[0].latitude, "40.7736");
/// assert_eq!(result.data[0].file_name, "tour.csv");
/// ```
pub fn ingest_upload(bytes: &[u8], file_name: &str, options: &IngestionOptions) -> IngestionResult {
    match try_ingest_upload(bytes, file_name, options) {
        Ok(ingested) => IngestionResult::accepted(ingested.shows),
        Err(e) => IngestionResult::failure(user_message(&e)),
    }
}

/// Like [`ingest_upload`], but keeps the typed error and the row counts.
pub fn try_ingest_upload(
    bytes: &[u8],
    file_name: &str,
    options: &IngestionOptions,
) -> PipelineResult<IngestedShows> {
    let format = options
        .format
        .or_else(|| IngestionFormat::from_file_name(file_name));
    let ctx = IngestionContext {
        file_name: file_name.to_owned(),
        format,
    };

    let result = run_pipeline(bytes, &ctx, options);

    if let Some(obs) = options.observer.as_ref() {
        match &result {
            Ok(ingested) => obs.on_success(&ctx, ingested.stats),
            Err(e) => {
                let sev = severity_for_error(e);
                obs.on_failure(&ctx, sev, e);
                if sev >= options.alert_at_or_above {
                    obs.on_alert(&ctx, sev, e);
                }
            }
        }
    }

    result
}

fn run_pipeline(
    bytes: &[u8],
    ctx: &IngestionContext,
    options: &IngestionOptions,
) -> PipelineResult<IngestedShows> {
    let format = ctx.format.ok_or_else(|| IngestionError::UnsupportedFormat {
        file_name: ctx.file_name.clone(),
    })?;

    if let Some(limit) = options.max_file_bytes {
        if bytes.len() > limit {
            return Err(IngestionError::FileTooLarge {
                size: bytes.len(),
                limit,
            });
        }
    }

    let rows = parse_rows(bytes, format)?;
    if rows.is_empty() {
        return Err(IngestionError::EmptyFile);
    }

    let origin = ShowOrigin::Upload(ctx.file_name.clone());
    let rows_parsed = rows.len();
    let mut shows = Vec::with_capacity(rows_parsed);
    for (idx0, row) in rows.iter().enumerate() {
        let row_num = idx0 + 1;
        match normalize_row(row, &origin) {
            Ok(show) => shows.push(show),
            Err(reason) => {
                debug!(file = %ctx.file_name, row = row_num, %reason, "row rejected");
                if let Some(obs) = options.observer.as_ref() {
                    obs.on_row_rejected(ctx, row_num, &reason);
                }
            }
        }
    }

    let rejected = rows_parsed - shows.len();
    if shows.is_empty() {
        return Err(IngestionError::NoValidRecords { rejected });
    }

    Ok(IngestedShows {
        stats: IngestionStats {
            rows_parsed,
            accepted: shows.len(),
            rejected,
        },
        shows,
    })
}

/// Run the tabular parser for `format`. Zero rows is not an error at this stage.
pub fn parse_rows(bytes: &[u8], format: IngestionFormat) -> PipelineResult<Vec<RawRow>> {
    match format {
        IngestionFormat::Csv => csv::parse_csv_bytes(bytes),
        IngestionFormat::Excel => parse_excel_dispatch(bytes),
    }
}

fn parse_excel_dispatch(bytes: &[u8]) -> PipelineResult<Vec<RawRow>> {
    #[cfg(feature = "excel")]
    {
        super::excel::parse_excel_bytes(bytes)
    }

    #[cfg(not(feature = "excel"))]
    {
        let _ = bytes;
        Err(IngestionError::ExcelDisabled)
    }
}

/// The message shown to the uploader for a whole-file failure.
pub fn user_message(e: &IngestionError) -> String {
    match e {
        IngestionError::UnsupportedFormat { .. } => {
            "Unsupported file format. Please upload a CSV or Excel file.".to_string()
        }
        IngestionError::EmptyFile => "The file contains no data.".to_string(),
        IngestionError::NoValidRecords { .. } => "No valid records found in the file.".to_string(),
        IngestionError::FileTooLarge { limit, .. } => {
            format!("File is too large. The maximum upload size is {limit} bytes.")
        }
        other => format!("Error processing file: {other}"),
    }
}

fn severity_for_error(e: &IngestionError) -> IngestionSeverity {
    match e {
        IngestionError::Csv(err) => match err.kind() {
            ::csv::ErrorKind::Io(_) => IngestionSeverity::Critical,
            _ => IngestionSeverity::Error,
        },
        #[cfg(feature = "excel")]
        IngestionError::Excel(_) => IngestionSeverity::Error,
        IngestionError::RaggedRecord { .. }
        | IngestionError::UnsupportedFormat { .. }
        | IngestionError::ExcelDisabled
        | IngestionError::FileTooLarge { .. }
        | IngestionError::EmptyFile
        | IngestionError::NoValidRecords { .. } => IngestionSeverity::Error,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_from_file_name() {
        assert_eq!(IngestionFormat::from_file_name("tour.csv"), Some(IngestionFormat::Csv));
        assert_eq!(IngestionFormat::from_file_name("TOUR.XLSX"), Some(IngestionFormat::Excel));
        assert_eq!(IngestionFormat::from_file_name("old.xls"), Some(IngestionFormat::Excel));
        assert_eq!(IngestionFormat::from_file_name("notes.txt"), None);
        assert_eq!(IngestionFormat::from_file_name("csv"), None);
    }

    #[test]
    fn severity_is_critical_only_for_io() {
        let io = IngestionError::Csv(::csv::Error::from(std::io::Error::other("disk gone")));
        assert_eq!(severity_for_error(&io), IngestionSeverity::Critical);
        let ragged = IngestionError::RaggedRecord {
            line: 2,
            expected: 2,
            found: 3,
        };
        assert_eq!(severity_for_error(&ragged), IngestionSeverity::Error);
        assert_eq!(severity_for_error(&IngestionError::EmptyFile), IngestionSeverity::Error);
    }

    #[test]
    fn oversized_upload_is_refused() {
        let opts = IngestionOptions {
            max_file_bytes: Some(4),
            ..Default::default()
        };
        let err = try_ingest_upload(b"CITY\nBoston\n", "a.csv", &opts).unwrap_err();
        assert!(matches!(err, IngestionError::FileTooLarge { size: 12, limit: 4 }));
    }

    #[test]
    fn forced_format_overrides_extension() {
        let opts = IngestionOptions {
            format: Some(IngestionFormat::Csv),
            ..Default::default()
        };
        let csv = "Circus Name,Coords,Date\nBig Top,\"1, 2\",2025-06-01\n";
        let result = ingest_upload(csv.as_bytes(), "export.txt", &opts);
        assert!(result.success);
        assert_eq!(result.data[0].file_name, "export.txt");
    }
}

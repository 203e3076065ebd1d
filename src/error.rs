use thiserror::Error;

/// Convenience result type for the ingestion pipeline.
pub type PipelineResult<T> = Result<T, IngestionError>;

/// Whole-file failure raised while turning an upload into show records.
///
/// Row-level problems never surface here; see [`RowRejection`].
#[derive(Debug, Error)]
pub enum IngestionError {
    #[cfg(feature = "excel")]
    /// Spreadsheet could not be opened or read (feature-gated behind `excel`).
    #[error("excel error: {0}")]
    Excel(#[from] calamine::Error),

    /// CSV could not be read (invalid UTF-8, broken quoting, ...).
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    /// A non-blank CSV record has a different number of fields than the header row.
    #[error("csv error: record on line {line} has {found} fields, but the header has {expected}")]
    RaggedRecord {
        line: u64,
        expected: usize,
        found: usize,
    },

    /// The file name does not carry a CSV or spreadsheet extension.
    #[error("unsupported file format for '{file_name}'")]
    UnsupportedFormat { file_name: String },

    /// The spreadsheet format was recognized but support was compiled out.
    #[error("excel ingestion not enabled (enable cargo feature 'excel')")]
    ExcelDisabled,

    /// The upload is larger than [`crate::ingestion::IngestionOptions::max_file_bytes`].
    #[error("file is {size} bytes, limit is {limit} bytes")]
    FileTooLarge { size: usize, limit: usize },

    /// Parsing succeeded but produced zero data rows.
    #[error("file contains no data rows")]
    EmptyFile,

    /// Every parsed row was rejected by the normalizer.
    #[error("no valid records found ({rejected} rows rejected)")]
    NoValidRecords { rejected: usize },
}

/// Why a single row was dropped by the row normalizer.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RowRejection {
    /// No show-date column (or an empty one) in the row.
    #[error("no show date field found in row")]
    MissingDate,

    /// A show date was present but could not be read as a calendar date.
    #[error("invalid date format: '{raw}'")]
    InvalidDate { raw: String },

    /// Circus name, latitude or longitude is empty.
    #[error("missing required fields: {}", missing.join(", "))]
    MissingRequiredFields { missing: Vec<&'static str> },
}

//! Ingestion entrypoints and implementations.
//!
//! Most callers should use [`ingest_upload`] (from [`unified`]) which:
//!
//! - picks a parser by file extension (or you can override via [`IngestionOptions`])
//! - normalizes every parsed row into a [`crate::types::CanonicalShow`], dropping bad rows
//! - optionally reports success/failure/alerts to an [`IngestionObserver`]
//!
//! The individual stages are also available:
//! - [`csv`] and `excel` (feature `excel`): tabular parsers
//! - [`resolver`]: header-spelling-tolerant field lookup
//! - [`coords`]: latitude/longitude extraction
//! - [`dates`]: show-date parsing
//! - [`normalize`]: the row normalizer

pub mod coords;
pub mod csv;
pub mod dates;
#[cfg(feature = "excel")]
pub mod excel;
pub mod normalize;
pub mod observability;
pub mod resolver;
pub mod unified;

pub use normalize::{normalize_manual_entry, normalize_row};
pub use observability::{
    CompositeObserver, IngestionContext, IngestionObserver, IngestionSeverity, IngestionStats, TracingObserver,
};
pub use resolver::{resolve_field, ShowField};
pub use unified::{
    ingest_upload, parse_rows, try_ingest_upload, user_message, IngestedShows, IngestionFormat, IngestionOptions,
    DEFAULT_MAX_FILE_BYTES,
};

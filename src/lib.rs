//! `circus-shows` turns admin-uploaded spreadsheets of touring circus shows into canonical,
//! map-ready [`types::CanonicalShow`] records, and computes the read-models (date range,
//! venues) the map and timeline views consume.
//!
//! The primary entrypoint is [`ingestion::ingest_upload`], which picks a parser from the file
//! extension, normalizes every row, and returns an [`types::IngestionResult`].
//!
//! ## What you can upload
//!
//! **File formats (detected by extension):**
//!
//! - **CSV**: `.csv`
//! - **Excel/workbooks** (Cargo feature `excel`, on by default): `.xlsx`, `.xls`, `.xlsm`,
//!   `.xlsb`, `.ods`. Only the first worksheet is read.
//!
//! **Columns:** header spelling is forgiving. Each logical field accepts several spellings
//! (`CIRCUS NAME`, `Circus Name`, `circusName`, ...) and falls back to a case-insensitive
//! match. Coordinates come either from one combined `COORDS` column (`"40.7736, -73.9566"`)
//! or from separate `LATITUDE`/`LONGITUDE` columns; the combined column wins when both exist.
//!
//! **Row policy:** a row needs a circus name, both coordinates and a parseable show date.
//! Anything else is logged and dropped; the rest of the file is still accepted.
//!
//! ## Quick example
//!
//! ```rust
//! use circus_shows::ingestion::{ingest_upload, IngestionOptions};
//!
//! let csv = "\
//! CIRCUS NAME,VENUE NAME,ADDRESS,CITY,STATE,ZIP,COORDS,Show Date
//! Big Top,Central Park,5th Ave,New York,NY,10022,\"40.7736, -73.9566\",2025-04-15
//! Big Top,Central Park,5th Ave,New York,NY,10022,\"40.7736, -73.9566\",N/A
//! ";
//! let result = ingest_upload(csv.as_bytes(), "spring-tour.csv", &IngestionOptions::default());
//!
//! assert!(result.success);
//! assert_eq!(result.data.len(), 1);
//! assert_eq!(result.data[0].circus_name, "Big Top");
//! assert_eq!(result.data[0].longitude, "-73.9566");
//! ```
//!
//! ## Persisting uploads
//!
//! ```rust
//! use circus_shows::ingestion::IngestionOptions;
//! use circus_shows::service::UploadService;
//! use circus_shows::store::{MemoryShowStore, ShowStore};
//!
//! let mut service = UploadService::new(MemoryShowStore::new(), IngestionOptions::default());
//! let csv = "Circus Name,Coords,Date\nBig Top,\"1.5, 2.5\",2025-06-01\n";
//!
//! let response = service.upload(csv.as_bytes(), "june.csv");
//! assert!(response.success);
//! assert_eq!(response.record_count, 1);
//! assert_eq!(service.store().file_uploads().len(), 1);
//!
//! service.delete_upload("june.csv");
//! assert!(service.store().all_shows().is_empty());
//! ```
//!
//! ## Modules
//!
//! - [`ingestion`]: parsers, field resolution, row normalization and the orchestrator
//! - [`processing`]: date-range, per-date and venue read-models
//! - [`store`]: the [`store::ShowStore`] seam and an in-memory implementation
//! - [`service`]: upload handling on top of ingestion + store
//! - [`types`]: rows, cells and show records
//! - [`error`]: whole-file and row-level error types

pub mod error;
pub mod ingestion;
pub mod processing;
pub mod service;
pub mod store;
pub mod types;

pub use error::{IngestionError, PipelineResult, RowRejection};
pub use types::{CanonicalShow, IngestionResult};

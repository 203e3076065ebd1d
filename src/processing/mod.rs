//! Derived read-models over canonical show records.
//!
//! These feed the map and timeline views and are recomputed on demand; nothing here is
//! persisted.
//!
//! - [`shows_on_date()`]: shows playing on one day
//! - [`show_date_range()`]: earliest/latest show date (timeline bounds)
//! - [`group_venues()`]: shows collapsed into venues with their date spans
//!
//! ## Example
//!
//! ```rust
//! use circus_shows::ingestion::{ingest_upload, IngestionOptions};
//! use circus_shows::processing::{group_venues, show_date_range};
//!
//! let csv = "\
//! Circus Name,Venue Name,City,State,Coords,Show Date
//! Big Top,Central Park,New York,NY,\"40.7736, -73.9566\",2025-04-15
//! Big Top,Central Park,New York,NY,\"40.7736, -73.9566\",2025-04-18
//! ";
//! let result = ingest_upload(csv.as_bytes(), "tour.csv", &IngestionOptions::default());
//!
//! let range = show_date_range(&result.data);
//! assert_eq!(range.start_date.to_string(), "2025-04-15");
//! assert_eq!(range.end_date.to_string(), "2025-04-18");
//!
//! let venues = group_venues(&result.data);
//! assert_eq!(venues.len(), 1);
//! assert_eq!(venues[0].show_count, 2);
//! ```

pub mod date_range;
pub mod filter;
pub mod venues;

pub use date_range::{show_date_range, ShowDateRange};
pub use filter::{shows_from_file, shows_on_date};
pub use venues::{group_venues, VenueAggregate};

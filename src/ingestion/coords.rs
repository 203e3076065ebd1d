//! Latitude/longitude extraction.
//!
//! Source files carry coordinates either as one combined `"lat, lon"` column or as separate
//! latitude and longitude columns. A non-empty combined column takes precedence, even when it
//! turns out to be malformed.

use crate::types::RawRow;

use super::resolver::{resolve_cell, resolve_field, ShowField};

/// Extracted coordinate pair. Either side may be empty.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Coordinates {
    pub latitude: String,
    pub longitude: String,
}

impl Coordinates {
    /// Both latitude and longitude are present.
    pub fn is_complete(&self) -> bool {
        !self.latitude.is_empty() && !self.longitude.is_empty()
    }
}

/// Pull `(latitude, longitude)` out of a row.
pub fn extract_coordinates(row: &RawRow) -> Coordinates {
    match resolve_cell(row, ShowField::Coords.candidates()) {
        Some(combined) => split_combined(&combined.to_string()).unwrap_or_default(),
        None => Coordinates {
            latitude: resolve_field(row, ShowField::Latitude),
            longitude: resolve_field(row, ShowField::Longitude),
        },
    }
}

/// Split `"lat, lon"` into its trimmed halves.
///
/// Anything other than exactly one comma leaves both sides unset.
pub fn split_combined(raw: &str) -> Option<Coordinates> {
    let (lat, lon) = raw.split_once(',')?;
    if lon.contains(',') {
        return None;
    }
    Some(Coordinates {
        latitude: lat.trim().to_owned(),
        longitude: lon.trim().to_owned(),
    })
}

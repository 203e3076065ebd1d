//! Field resolution across inconsistent header spellings.
//!
//! Hand-exported spreadsheets spell the same column many ways (`CIRCUS NAME`, `Circus Name`,
//! `circusName`, ...). Each logical field carries a priority-ordered list of accepted
//! spellings; [`resolve_cell`] tries them all with exact casing first, then falls back to a
//! case-insensitive scan of every header in the row.

use crate::types::{CellValue, RawRow};

/// A logical show field and the header spellings accepted for it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShowField {
    CircusName,
    VenueName,
    Address,
    City,
    State,
    Zip,
    Coords,
    Latitude,
    Longitude,
    ShowDate,
}

impl ShowField {
    /// Accepted header spellings, highest priority first.
    pub fn candidates(self) -> &'static [&'static str] {
        match self {
            ShowField::CircusName => &["CIRCUS NAME", "Circus Name", "circusName"],
            ShowField::VenueName => &["VENUE NAME", "Venue Name", "venueName"],
            ShowField::Address => &["ADDRESS", "Address", "address"],
            ShowField::City => &["CITY", "City", "city"],
            ShowField::State => &["STATE", "State", "state"],
            ShowField::Zip => &["ZIP", "Zip", "zip"],
            ShowField::Coords => &["COORDS", "Coords", "coords"],
            ShowField::Latitude => &["LATITUDE", "Latitude", "latitude"],
            ShowField::Longitude => &["LONGITUDE", "Longitude", "longitude"],
            ShowField::ShowDate => &[
                "Show Date",
                "SHOW DATE",
                "showDate",
                "Show date",
                "Date",
                "date",
                "DATE",
            ],
        }
    }

    /// Name used in diagnostics.
    pub fn label(self) -> &'static str {
        match self {
            ShowField::CircusName => "circusName",
            ShowField::VenueName => "venueName",
            ShowField::Address => "address",
            ShowField::City => "city",
            ShowField::State => "state",
            ShowField::Zip => "zip",
            ShowField::Coords => "coords",
            ShowField::Latitude => "latitude",
            ShowField::Longitude => "longitude",
            ShowField::ShowDate => "showDate",
        }
    }
}

/// Find the first truthy cell for any of `candidates`.
///
/// All candidates are tried with their exact casing before any case-insensitive match is
/// attempted, so candidate order only breaks ties within each pass.
pub fn resolve_cell<'a>(row: &'a RawRow, candidates: &[&str]) -> Option<&'a CellValue> {
    candidates
        .iter()
        .filter_map(|c| row.get(c))
        .find(|v| v.is_truthy())
        .or_else(|| {
            candidates
                .iter()
                .flat_map(|c| row.get_all_ignore_case(c))
                .find(|v| v.is_truthy())
        })
}

/// Resolve a candidate list to a string, or `""` when nothing usable is present.
pub fn resolve_str(row: &RawRow, candidates: &[&str]) -> String {
    resolve_cell(row, candidates)
        .map(|v| v.to_string())
        .unwrap_or_default()
}

/// Resolve a logical field to a string, or `""` when nothing usable is present.
pub fn resolve_field(row: &RawRow, field: ShowField) -> String {
    resolve_str(row, field.candidates())
}

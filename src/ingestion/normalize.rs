//! Row normalization: one [`RawRow`] in, one [`CanonicalShow`] or a [`RowRejection`] out.
//!
//! Circus name, both coordinates and a parseable show date are mandatory. Venue and address
//! fields are optional and default to the empty string.

use crate::error::RowRejection;
use crate::types::{CanonicalShow, ManualShowEntry, RawRow, ShowOrigin};

use super::coords::extract_coordinates;
use super::dates::parse_date_cell;
use super::resolver::{resolve_cell, resolve_field, ShowField};

/// Normalize a single row.
pub fn normalize_row(row: &RawRow, origin: &ShowOrigin) -> Result<CanonicalShow, RowRejection> {
    let coords = extract_coordinates(row);

    let date_cell =
        resolve_cell(row, ShowField::ShowDate.candidates()).ok_or(RowRejection::MissingDate)?;
    let show_date = parse_date_cell(date_cell).ok_or_else(|| RowRejection::InvalidDate {
        raw: date_cell.to_string(),
    })?;

    let circus_name = resolve_field(row, ShowField::CircusName);

    let missing: Vec<&'static str> = [
        (ShowField::CircusName, circus_name.as_str()),
        (ShowField::Latitude, coords.latitude.as_str()),
        (ShowField::Longitude, coords.longitude.as_str()),
    ]
    .into_iter()
    .filter(|(_, v)| v.is_empty())
    .map(|(f, _)| f.label())
    .collect();
    if !missing.is_empty() {
        return Err(RowRejection::MissingRequiredFields { missing });
    }

    Ok(CanonicalShow {
        circus_name,
        venue_name: resolve_field(row, ShowField::VenueName),
        address: resolve_field(row, ShowField::Address),
        city: resolve_field(row, ShowField::City),
        state: resolve_field(row, ShowField::State),
        zip: resolve_field(row, ShowField::Zip),
        latitude: coords.latitude,
        longitude: coords.longitude,
        show_date,
        file_name: origin.file_name().to_owned(),
    })
}

/// Normalize a show typed into the admin form.
pub fn normalize_manual_entry(entry: &ManualShowEntry) -> Result<CanonicalShow, RowRejection> {
    normalize_row(&entry.to_raw_row(), &ShowOrigin::ManualEntry)
}

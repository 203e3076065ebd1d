#![cfg(feature = "excel")]

//! Spreadsheet parsing (`.xlsx`, `.xls`, `.ods`, ...) into [`RawRow`]s.

use std::io::Cursor;

use calamine::{open_workbook_auto_from_rs, Data, Range, Reader};

use crate::error::PipelineResult;
use crate::types::{CellValue, RawRow};

/// Parse the first worksheet of an in-memory workbook.
///
/// Behavior:
/// - Only the first sheet is read; other sheets are ignored
/// - The first non-empty row is the header row
/// - Rows with no non-empty cells are skipped
/// - Empty cells are left out of the row, so they resolve exactly like a missing column
pub fn parse_excel_bytes(bytes: &[u8]) -> PipelineResult<Vec<RawRow>> {
    let mut workbook = open_workbook_auto_from_rs(Cursor::new(bytes))?;
    match workbook.worksheet_range_at(0) {
        Some(range) => Ok(rows_from_range(&range?)),
        None => Ok(Vec::new()),
    }
}

fn rows_from_range(range: &Range<Data>) -> Vec<RawRow> {
    let mut sheet_rows = range
        .rows()
        .skip_while(|row| row.iter().all(|c| matches!(c, Data::Empty)));

    let headers: Vec<String> = match sheet_rows.next() {
        Some(header_row) => header_row
            .iter()
            .map(|c| cell_to_header_string(c).trim().to_owned())
            .collect(),
        None => return Vec::new(),
    };

    sheet_rows
        .filter_map(|row| {
            let out: RawRow = headers
                .iter()
                .zip(row.iter())
                .map(|(header, cell)| (header.as_str(), convert_cell(cell)))
                .filter(|(_, cell)| !matches!(cell, CellValue::Empty))
                .collect();
            (!out.is_empty()).then_some(out)
        })
        .collect()
}

fn cell_to_header_string(c: &Data) -> String {
    match c {
        Data::String(s) => s.clone(),
        Data::Empty => String::new(),
        other => convert_cell(other).to_string(),
    }
}

fn convert_cell(c: &Data) -> CellValue {
    match c {
        Data::Empty | Data::Error(_) => CellValue::Empty,
        Data::String(s) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                CellValue::Empty
            } else {
                CellValue::Text(trimmed.to_owned())
            }
        }
        Data::Int(i) => CellValue::Int(*i),
        Data::Float(f) => CellValue::Float(*f),
        Data::Bool(b) => CellValue::Bool(*b),
        Data::DateTime(dt) => match dt.as_datetime() {
            Some(ndt) => CellValue::DateTime(ndt),
            None => CellValue::Float(dt.as_f64()),
        },
        Data::DateTimeIso(s) | Data::DurationIso(s) => CellValue::Text(s.clone()),
    }
}

//! CSV parsing into [`RawRow`]s.

use std::io::Read;

use crate::error::{IngestionError, PipelineResult};
use crate::types::{CellValue, RawRow};

/// Parse an in-memory CSV upload.
///
/// Rules:
///
/// - The first record is the header row.
/// - Empty and whitespace-only lines are skipped; headers and values are trimmed.
/// - Every other record must have as many fields as the header row.
/// - Blank values become [`CellValue::Empty`], everything else [`CellValue::Text`].
pub fn parse_csv_bytes(bytes: &[u8]) -> PipelineResult<Vec<RawRow>> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(bytes);
    parse_csv_from_reader(&mut rdr)
}

/// Parse CSV data from an existing CSV reader.
///
/// The reader should be built with `flexible(true)` so that blank lines reach the skip check
/// below instead of failing inside the `csv` crate.
pub fn parse_csv_from_reader<R: Read>(rdr: &mut csv::Reader<R>) -> PipelineResult<Vec<RawRow>> {
    let headers = rdr.headers()?.clone();

    let mut rows: Vec<RawRow> = Vec::new();
    for result in rdr.records() {
        let record = result?;
        if record.iter().all(|field| field.trim().is_empty()) {
            continue;
        }
        if record.len() != headers.len() {
            return Err(IngestionError::RaggedRecord {
                line: record.position().map_or(0, |p| p.line()),
                expected: headers.len(),
                found: record.len(),
            });
        }
        let row: RawRow = headers
            .iter()
            .zip(record.iter())
            .map(|(header, raw)| (strip_bom(header), text_cell(raw)))
            .collect();
        rows.push(row);
    }

    Ok(rows)
}

fn text_cell(raw: &str) -> CellValue {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        CellValue::Empty
    } else {
        CellValue::Text(trimmed.to_owned())
    }
}

// Excel's "CSV UTF-8" export prefixes the first header with a byte order mark.
fn strip_bom(header: &str) -> &str {
    header.trim_start_matches('\u{feff}')
}

//! Calendar-date parsing for show dates.
//!
//! Uploads come from hand-maintained spreadsheets, so dates show up as ISO strings, US-style
//! slashed dates, spelled-out month names, spreadsheet date cells or bare serial day numbers.
//! Only the calendar date is kept; any time of day is discarded.

use chrono::{DateTime, Datelike, Days, NaiveDate, NaiveDateTime};

use crate::types::CellValue;

const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%m/%d/%Y %H:%M:%S",
    "%m/%d/%Y %H:%M",
    "%m/%d/%Y %I:%M:%S %p",
    "%m/%d/%Y %I:%M %p",
    "%m/%d/%Y %I:%M%p",
    "%m/%d/%y %I:%M %p",
    "%Y-%m-%d %I:%M %p",
    "%B %d, %Y %I:%M %p",
];

const DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%m/%d/%Y",
    "%m/%d/%y",
    "%m-%d-%Y",
    "%B %d, %Y",
    "%B %d %Y",
    "%d %B %Y",
    "%d %B, %Y",
    "%d-%B-%Y",
    "%A, %B %d, %Y",
    "%A %B %d %Y",
];

/// Serial day numbers count from this date (1900 date system, including its leap-year quirk).
fn excel_epoch() -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(1899, 12, 30)
}

/// Largest serial day number a spreadsheet can hold (9999-12-31).
const MAX_EXCEL_SERIAL: f64 = 2_958_465.0;

/// Parse a show-date cell into a calendar date.
pub fn parse_date_cell(cell: &CellValue) -> Option<NaiveDate> {
    match cell {
        CellValue::Text(s) => parse_date_str(s),
        CellValue::DateTime(dt) => Some(dt.date()),
        CellValue::Int(i) => date_from_serial(*i as f64),
        CellValue::Float(f) => date_from_serial(*f),
        CellValue::Bool(_) | CellValue::Empty => None,
    }
}

/// Parse a free-form date string.
///
/// Returns `None` for anything that does not name a real calendar day (`"N/A"`,
/// `"2025-02-30"`, ...).
pub fn parse_date_str(raw: &str) -> Option<NaiveDate> {
    let s = raw.trim();
    if s.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.date_naive());
    }
    if let Ok(dt) = DateTime::parse_from_rfc2822(s) {
        return Some(dt.date_naive());
    }

    DATETIME_FORMATS
        .iter()
        .filter_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
        .map(|dt| dt.date())
        .chain(
            DATE_FORMATS
                .iter()
                .filter_map(|fmt| NaiveDate::parse_from_str(s, fmt).ok()),
        )
        // `%Y` happily reads "25" as year 25; let `%y` handle two-digit years instead.
        .find(|d| d.year() >= 1000)
}

/// Convert a spreadsheet serial day number into a date.
pub fn date_from_serial(serial: f64) -> Option<NaiveDate> {
    if !serial.is_finite() || serial < 1.0 || serial > MAX_EXCEL_SERIAL {
        return None;
    }
    excel_epoch()?.checked_add_days(Days::new(serial.floor() as u64))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn parses_common_spellings() {
        let expected = ymd(2025, 4, 15);
        for s in [
            "2025-04-15",
            " 2025-04-15 ",
            "2025/04/15",
            "04/15/2025",
            "4/15/2025",
            "4/15/25",
            "April 15, 2025",
            "Apr 15, 2025",
            "15 April 2025",
            "Tuesday, April 15, 2025",
            "2025-04-15T19:30:00",
            "2025-04-15T19:30:00Z",
            "2025-04-15 19:30",
        ] {
            assert_eq!(parse_date_str(s), Some(expected), "input={s}");
        }
    }

    #[test]
    fn parses_twelve_hour_clock_times() {
        for s in [
            "4/15/2025 7:30 PM",
            "04/15/2025 07:30 pm",
            "4/15/2025 7:30PM",
            "4/15/2025 11:59:59 PM",
            "4/15/25 7:30 AM",
            "2025-04-15 12:00 AM",
            "April 15, 2025 7:30 PM",
        ] {
            assert_eq!(parse_date_str(s), Some(ymd(2025, 4, 15)), "input={s}");
        }
        assert_eq!(parse_date_str("4/15/2025 13:30 PM"), None);
    }

    #[test]
    fn rejects_non_dates() {
        for s in ["N/A", "", "tbd", "2025-02-30", "13/45/2025"] {
            assert_eq!(parse_date_str(s), None, "input={s}");
        }
    }

    #[test]
    fn serial_numbers_use_1900_date_system() {
        assert_eq!(date_from_serial(45762.0), Some(ymd(2025, 4, 15)));
        assert_eq!(date_from_serial(45762.75), Some(ymd(2025, 4, 15)));
        assert_eq!(date_from_serial(0.0), None);
        assert_eq!(date_from_serial(f64::NAN), None);
    }

    #[test]
    fn cell_dispatch() {
        let dt = ymd(2025, 4, 15).and_hms_opt(20, 0, 0).unwrap();
        assert_eq!(parse_date_cell(&CellValue::DateTime(dt)), Some(ymd(2025, 4, 15)));
        assert_eq!(parse_date_cell(&CellValue::Int(45762)), Some(ymd(2025, 4, 15)));
        assert_eq!(parse_date_cell(&CellValue::Bool(true)), None);
    }
}

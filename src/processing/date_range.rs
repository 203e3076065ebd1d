//! Earliest/latest show date, used to bound the map's timeline slider.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::types::CanonicalShow;

/// Inclusive span of show dates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShowDateRange {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

impl ShowDateRange {
    /// Span shown while no shows are loaded: the 2025 touring season.
    pub fn default_season() -> Self {
        Self {
            start_date: NaiveDate::from_ymd_opt(2025, 4, 1).unwrap_or(NaiveDate::MIN),
            end_date: NaiveDate::from_ymd_opt(2025, 10, 31).unwrap_or(NaiveDate::MAX),
        }
    }

    /// Whether `date` falls inside the span.
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start_date <= date && date <= self.end_date
    }
}

/// Min/max show date across `shows`, or [`ShowDateRange::default_season`] when empty.
pub fn show_date_range<'a, I>(shows: I) -> ShowDateRange
where
    I: IntoIterator<Item = &'a CanonicalShow>,
{
    shows
        .into_iter()
        .map(|s| s.show_date)
        .fold(None, |acc: Option<ShowDateRange>, d| {
            Some(match acc {
                None => ShowDateRange {
                    start_date: d,
                    end_date: d,
                },
                Some(r) => ShowDateRange {
                    start_date: r.start_date.min(d),
                    end_date: r.end_date.max(d),
                },
            })
        })
        .unwrap_or_else(ShowDateRange::default_season)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::processing::test_support::show;

    #[test]
    fn spans_min_to_max() {
        let shows = vec![
            show("A", "Hall", "Boston", "MA", "2025-06-10"),
            show("B", "Hall", "Boston", "MA", "2025-04-15"),
            show("C", "Arena", "Salem", "MA", "2025-09-01"),
        ];
        let r = show_date_range(&shows);
        assert_eq!(r.start_date, NaiveDate::from_ymd_opt(2025, 4, 15).unwrap());
        assert_eq!(r.end_date, NaiveDate::from_ymd_opt(2025, 9, 1).unwrap());
        assert!(r.contains(NaiveDate::from_ymd_opt(2025, 6, 10).unwrap()));
    }

    #[test]
    fn empty_falls_back_to_default_season() {
        let r = show_date_range(std::iter::empty());
        assert_eq!(r, ShowDateRange::default_season());
        let json = serde_json::to_value(r).unwrap();
        assert_eq!(json["startDate"], "2025-04-01");
        assert_eq!(json["endDate"], "2025-10-31");
    }
}

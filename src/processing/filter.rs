//! Show filtering.
//!
//! Works over anything that wraps a [`CanonicalShow`], so stores can filter their persisted
//! records without unwrapping them first.

use chrono::NaiveDate;

use crate::types::CanonicalShow;

/// Shows playing on `date`, in input order.
pub fn shows_on_date<'a, T, I>(shows: I, date: NaiveDate) -> Vec<&'a T>
where
    T: AsRef<CanonicalShow> + 'a,
    I: IntoIterator<Item = &'a T>,
{
    shows
        .into_iter()
        .filter(|s| s.as_ref().show_date == date)
        .collect()
}

/// Shows whose provenance marker is `file_name`.
pub fn shows_from_file<'a, T, I>(shows: I, file_name: &str) -> Vec<&'a T>
where
    T: AsRef<CanonicalShow> + 'a,
    I: IntoIterator<Item = &'a T>,
{
    shows
        .into_iter()
        .filter(|s| s.as_ref().file_name == file_name)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::processing::test_support::show;

    #[test]
    fn keeps_only_matching_date() {
        let shows = vec![
            show("A", "Hall", "Boston", "MA", "2025-04-15"),
            show("B", "Hall", "Boston", "MA", "2025-04-16"),
            show("C", "Arena", "Salem", "MA", "2025-04-15"),
        ];
        let date = NaiveDate::from_ymd_opt(2025, 4, 15).unwrap();
        let names: Vec<_> = shows_on_date(&shows, date)
            .into_iter()
            .map(|s| s.circus_name.as_str())
            .collect();
        assert_eq!(names, vec!["A", "C"]);
    }

    #[test]
    fn no_match_is_empty() {
        let shows = vec![show("A", "Hall", "Boston", "MA", "2025-04-15")];
        let date = NaiveDate::from_ymd_opt(2030, 1, 1).unwrap();
        assert!(shows_on_date(&shows, date).is_empty());
    }

    #[test]
    fn filters_by_file() {
        let mut other = show("B", "Hall", "Boston", "MA", "2025-04-16");
        other.file_name = "other.csv".to_string();
        let shows = vec![show("A", "Hall", "Boston", "MA", "2025-04-15"), other];
        assert_eq!(shows_from_file(&shows, "other.csv").len(), 1);
    }
}

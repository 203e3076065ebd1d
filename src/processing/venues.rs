//! Venue aggregation: shows sharing a venue name, city and state collapse into one venue.

use std::collections::HashMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::types::CanonicalShow;

/// One venue with the span of dates it hosts shows.
///
/// Address and coordinates come from the first show seen for the venue.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VenueAggregate {
    /// 1-based position in first-appearance order.
    pub id: usize,
    pub venue_name: String,
    pub city: String,
    pub state: String,
    pub address: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub coords: [f64; 2],
    /// Number of shows at this venue.
    pub show_count: usize,
}

/// Group shows by `(venue_name, city, state)`, in order of first appearance.
pub fn group_venues<'a, I>(shows: I) -> Vec<VenueAggregate>
where
    I: IntoIterator<Item = &'a CanonicalShow>,
{
    let mut index: HashMap<(&'a str, &'a str, &'a str), usize> = HashMap::new();
    let mut venues: Vec<VenueAggregate> = Vec::new();

    for show in shows {
        let key = (
            show.venue_name.as_str(),
            show.city.as_str(),
            show.state.as_str(),
        );
        match index.get(&key) {
            Some(&idx) => {
                let v = &mut venues[idx];
                v.start_date = v.start_date.min(show.show_date);
                v.end_date = v.end_date.max(show.show_date);
                v.show_count += 1;
            }
            None => {
                index.insert(key, venues.len());
                venues.push(VenueAggregate {
                    id: venues.len() + 1,
                    venue_name: show.venue_name.clone(),
                    city: show.city.clone(),
                    state: show.state.clone(),
                    address: show.address.clone(),
                    start_date: show.show_date,
                    end_date: show.show_date,
                    coords: show.coords(),
                    show_count: 1,
                });
            }
        }
    }

    venues
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::processing::test_support::show;

    #[test]
    fn groups_by_venue_city_state() {
        let shows = vec![
            show("A", "Hall", "Boston", "MA", "2025-06-10"),
            show("B", "Arena", "Salem", "MA", "2025-05-01"),
            show("C", "Hall", "Boston", "MA", "2025-04-15"),
            show("D", "Hall", "Salem", "MA", "2025-07-04"),
        ];
        let venues = group_venues(&shows);
        assert_eq!(venues.len(), 3);

        let hall = &venues[0];
        assert_eq!(hall.id, 1);
        assert_eq!(hall.venue_name, "Hall");
        assert_eq!(hall.start_date, NaiveDate::from_ymd_opt(2025, 4, 15).unwrap());
        assert_eq!(hall.end_date, NaiveDate::from_ymd_opt(2025, 6, 10).unwrap());
        assert_eq!(hall.show_count, 2);

        assert_eq!(venues[1].venue_name, "Arena");
        assert_eq!(venues[2].city, "Salem");
        assert_eq!(venues[2].id, 3);
    }

    #[test]
    fn representative_coords_come_from_first_show() {
        let first = show("A", "Hall", "Boston", "MA", "2025-06-10");
        let mut second = show("B", "Hall", "Boston", "MA", "2025-06-11");
        second.latitude = "0.5".to_string();
        let venues = group_venues([&first, &second]);
        assert_eq!(venues[0].coords, first.coords());
    }

    #[test]
    fn empty_input_has_no_venues() {
        assert!(group_venues(std::iter::empty()).is_empty());
    }
}

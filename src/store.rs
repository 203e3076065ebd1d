//! Show persistence.
//!
//! [`ShowStore`] is the seam the upload service writes accepted records through. The crate
//! ships [`MemoryShowStore`]; a database-backed store implements the same trait. Stores are
//! constructed explicitly and passed around, so every test can own an isolated one.

use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::processing::{
    group_venues, show_date_range, shows_from_file, shows_on_date, ShowDateRange,
    VenueAggregate,
};
use crate::types::CanonicalShow;

/// A persisted show.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredShow {
    pub id: u64,
    #[serde(flatten)]
    pub show: CanonicalShow,
    pub uploaded_at: DateTime<Utc>,
}

impl AsRef<CanonicalShow> for StoredShow {
    fn as_ref(&self) -> &CanonicalShow {
        &self.show
    }
}

/// A persisted show plus numeric coordinates for the map.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShowWithCoords {
    #[serde(flatten)]
    pub stored: StoredShow,
    /// `[latitude, longitude]`; `NaN` where the stored text is not a number.
    pub coords: [f64; 2],
}

impl From<&StoredShow> for ShowWithCoords {
    fn from(stored: &StoredShow) -> Self {
        Self {
            coords: stored.show.coords(),
            stored: stored.clone(),
        }
    }
}

/// Outcome recorded for an upload attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UploadStatus {
    Success,
    Error,
}

/// One upload-history entry. Written for every attempt, successful or not.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileUpload {
    pub file_name: String,
    pub upload_date: DateTime<Utc>,
    pub status: UploadStatus,
    pub record_count: usize,
}

/// Storage for shows and upload history.
pub trait ShowStore {
    /// Persist one show and return it with its assigned id.
    fn insert_show(&mut self, show: CanonicalShow) -> StoredShow;

    /// Every stored show, in insertion order.
    fn all_shows(&self) -> Vec<ShowWithCoords>;

    /// Stored shows playing on `date`.
    fn shows_on_date(&self, date: NaiveDate) -> Vec<ShowWithCoords>;

    /// Earliest/latest stored show date (default season when empty).
    fn date_range(&self) -> ShowDateRange;

    /// Stored shows grouped into venues.
    fn venues(&self) -> Vec<VenueAggregate>;

    /// Append an upload-history entry.
    fn record_upload(&mut self, upload: FileUpload);

    /// Upload history, oldest first.
    fn file_uploads(&self) -> Vec<FileUpload>;

    /// Remove every history entry and every show carrying `file_name`.
    ///
    /// Returns the number of shows removed.
    fn delete_upload(&mut self, file_name: &str) -> usize;
}

/// In-memory [`ShowStore`]. Ids start at 1 and are never reused.
#[derive(Debug)]
pub struct MemoryShowStore {
    shows: BTreeMap<u64, StoredShow>,
    uploads: Vec<FileUpload>,
    next_id: u64,
}

impl Default for MemoryShowStore {
    fn default() -> Self {
        Self {
            shows: BTreeMap::new(),
            uploads: Vec::new(),
            next_id: 1,
        }
    }
}

impl MemoryShowStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored shows.
    pub fn len(&self) -> usize {
        self.shows.len()
    }

    /// Whether no shows are stored.
    pub fn is_empty(&self) -> bool {
        self.shows.is_empty()
    }

    fn canonical(&self) -> impl Iterator<Item = &CanonicalShow> {
        self.shows.values().map(|s| &s.show)
    }
}

impl ShowStore for MemoryShowStore {
    fn insert_show(&mut self, show: CanonicalShow) -> StoredShow {
        let id = self.next_id;
        self.next_id += 1;
        let stored = StoredShow {
            id,
            show,
            uploaded_at: Utc::now(),
        };
        self.shows.insert(id, stored.clone());
        stored
    }

    fn all_shows(&self) -> Vec<ShowWithCoords> {
        self.shows.values().map(ShowWithCoords::from).collect()
    }

    fn shows_on_date(&self, date: NaiveDate) -> Vec<ShowWithCoords> {
        shows_on_date(self.shows.values(), date)
            .into_iter()
            .map(ShowWithCoords::from)
            .collect()
    }

    fn date_range(&self) -> ShowDateRange {
        show_date_range(self.canonical())
    }

    fn venues(&self) -> Vec<VenueAggregate> {
        group_venues(self.canonical())
    }

    fn record_upload(&mut self, upload: FileUpload) {
        self.uploads.push(upload);
    }

    fn file_uploads(&self) -> Vec<FileUpload> {
        self.uploads.clone()
    }

    fn delete_upload(&mut self, file_name: &str) -> usize {
        self.uploads.retain(|u| u.file_name != file_name);
        let doomed: Vec<u64> = shows_from_file(self.shows.values(), file_name)
            .into_iter()
            .map(|s| s.id)
            .collect();
        for id in &doomed {
            self.shows.remove(id);
        }
        doomed.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn show(name: &str, file: &str, date: &str) -> CanonicalShow {
        CanonicalShow {
            circus_name: name.to_string(),
            venue_name: "Hall".to_string(),
            address: String::new(),
            city: "Boston".to_string(),
            state: "MA".to_string(),
            zip: String::new(),
            latitude: "42.36".to_string(),
            longitude: "-71.06".to_string(),
            show_date: NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap(),
            file_name: file.to_string(),
        }
    }

    fn upload(file: &str, status: UploadStatus, record_count: usize) -> FileUpload {
        FileUpload {
            file_name: file.to_string(),
            upload_date: Utc::now(),
            status,
            record_count,
        }
    }

    #[test]
    fn ids_are_sequential() {
        let mut store = MemoryShowStore::new();
        assert_eq!(store.insert_show(show("A", "a.csv", "2025-04-15")).id, 1);
        assert_eq!(store.insert_show(show("B", "a.csv", "2025-04-16")).id, 2);
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn shows_carry_numeric_coords() {
        let mut store = MemoryShowStore::new();
        store.insert_show(show("A", "a.csv", "2025-04-15"));
        let all = store.all_shows();
        assert_eq!(all[0].coords, [42.36, -71.06]);

        let json = serde_json::to_value(&all[0]).unwrap();
        assert_eq!(json["id"], 1);
        assert_eq!(json["circusName"], "A");
        assert_eq!(json["coords"][0], 42.36);
        assert!(json.get("uploadedAt").is_some());
    }

    #[test]
    fn date_queries() {
        let mut store = MemoryShowStore::new();
        assert_eq!(store.date_range(), ShowDateRange::default_season());

        store.insert_show(show("A", "a.csv", "2025-04-15"));
        store.insert_show(show("B", "a.csv", "2025-05-20"));
        store.insert_show(show("C", "b.csv", "2025-05-20"));
        let day = NaiveDate::from_ymd_opt(2025, 5, 20).unwrap();
        let on_day = store.shows_on_date(day);
        assert_eq!(on_day.len(), 2);
        assert_eq!(on_day[0].stored.id, 2);
        assert_eq!(on_day[1].stored.show.circus_name, "C");
        assert_eq!(store.date_range().end_date, day);
        assert_eq!(store.venues().len(), 1);
    }

    #[test]
    fn delete_upload_cascades_by_file_name() {
        let mut store = MemoryShowStore::new();
        store.insert_show(show("A", "a.csv", "2025-04-15"));
        store.insert_show(show("B", "b.csv", "2025-04-16"));
        store.insert_show(show("C", "a.csv", "2025-04-17"));
        store.record_upload(upload("a.csv", UploadStatus::Success, 2));
        store.record_upload(upload("b.csv", UploadStatus::Success, 1));

        assert_eq!(store.delete_upload("a.csv"), 2);
        assert_eq!(store.len(), 1);
        assert_eq!(store.all_shows()[0].stored.show.circus_name, "B");
        let uploads = store.file_uploads();
        assert_eq!(uploads.len(), 1);
        assert_eq!(uploads[0].file_name, "b.csv");

        // Ids keep counting after deletes.
        assert_eq!(store.insert_show(show("D", "c.csv", "2025-04-18")).id, 4);
    }

    #[test]
    fn upload_status_serializes_lowercase() {
        let json = serde_json::to_value(upload("a.csv", UploadStatus::Error, 0)).unwrap();
        assert_eq!(json["status"], "error");
        assert_eq!(json["recordCount"], 0);
        assert_eq!(json["fileName"], "a.csv");
    }
}

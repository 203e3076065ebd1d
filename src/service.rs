//! Upload handling on top of the ingestion pipeline and a [`ShowStore`].
//!
//! This is everything the admin upload endpoint does except HTTP: ingest, persist accepted
//! records, and write one history entry per attempt.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::error::RowRejection;
use crate::ingestion::{ingest_upload, normalize_manual_entry, IngestionOptions};
use crate::store::{FileUpload, ShowStore, StoredShow, UploadStatus};
use crate::types::ManualShowEntry;

/// Response body for an upload request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadResponse {
    pub success: bool,
    pub message: String,
    pub record_count: usize,
}

/// Ingests uploads into a store it owns.
#[derive(Debug)]
pub struct UploadService<S> {
    store: S,
    options: IngestionOptions,
}

impl<S: ShowStore> UploadService<S> {
    /// Create a service over `store`.
    pub fn new(store: S, options: IngestionOptions) -> Self {
        Self { store, options }
    }

    /// Read access to the underlying store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Consume the service and return its store.
    pub fn into_store(self) -> S {
        self.store
    }

    /// Ingest an uploaded file and persist its accepted records.
    ///
    /// Uploads are not deduplicated: sending the same file twice stores its shows twice.
    pub fn upload(&mut self, bytes: &[u8], file_name: &str) -> UploadResponse {
        let result = ingest_upload(bytes, file_name, &self.options);

        if !result.success {
            warn!(file = %file_name, message = %result.message, "upload rejected");
            self.store.record_upload(FileUpload {
                file_name: file_name.to_owned(),
                upload_date: Utc::now(),
                status: UploadStatus::Error,
                record_count: 0,
            });
            return UploadResponse {
                success: false,
                message: result.message,
                record_count: 0,
            };
        }

        let record_count = result.record_count();
        for show in result.data {
            self.store.insert_show(show);
        }
        self.store.record_upload(FileUpload {
            file_name: file_name.to_owned(),
            upload_date: Utc::now(),
            status: UploadStatus::Success,
            record_count,
        });
        info!(file = %file_name, records = record_count, "upload stored");

        UploadResponse {
            success: true,
            message: format!("Successfully processed {record_count} records"),
            record_count,
        }
    }

    /// Validate and persist a show typed into the admin form.
    pub fn add_manual_show(&mut self, entry: &ManualShowEntry) -> Result<StoredShow, RowRejection> {
        let show = normalize_manual_entry(entry)?;
        Ok(self.store.insert_show(show))
    }

    /// Remove an upload's history and every show it produced.
    pub fn delete_upload(&mut self, file_name: &str) -> usize {
        let removed = self.store.delete_upload(file_name);
        info!(file = %file_name, removed, "upload deleted");
        removed
    }
}

//! Lifecycle — terminal transitions for proposals and research.
//!
//! Every transition is a fixed sequence against two stores that fail
//! independently:
//!
//! 1. read the row's `report_path` (a missing row or failed read means "no artifact")
//! 2. write the metadata (update or delete) — the only step whose failure is surfaced
//! 3. remove the captured artifact from the blob store, once, best-effort
//!
//! There is no transaction spanning the two stores. A failed or interrupted
//! step 3 leaves an orphaned blob behind; a failed step 2 never touches the blob.

pub mod handlers;

use std::sync::Arc;

use chrono::Utc;
use thiserror::Error;
use tracing::{info, warn};
use uuid::Uuid;

use crate::models::record::{normalize_reason, RecordKind, RecordPatch};
use crate::store::{BlobStore, RecordStore, StoreError};

#[derive(Debug, Error)]
pub enum LifecycleError {
    #[error("{0}")]
    Validation(String),

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// What happened to the record's report after the metadata write succeeded.
#[derive(Debug, Clone, PartialEq)]
pub enum ArtifactCleanup {
    /// The record had no report (or could not be read before the write).
    NoArtifact,
    Removed { path: String },
    /// Removal failed; the blob is orphaned.
    Failed { path: String, reason: String },
}

pub struct LifecycleManager {
    records: Arc<dyn RecordStore>,
    blobs: Arc<dyn BlobStore>,
    bucket: String,
}

impl LifecycleManager {
    pub fn new(
        records: Arc<dyn RecordStore>,
        blobs: Arc<dyn BlobStore>,
        bucket: impl Into<String>,
    ) -> Self {
        Self {
            records,
            blobs,
            bucket: bucket.into(),
        }
    }

    /// Stamps `archived_at`/`archived_reason`. Leaves status and the report alone.
    pub async fn archive(
        &self,
        kind: RecordKind,
        id: Uuid,
        reason: Option<String>,
    ) -> Result<(), LifecycleError> {
        let patch = RecordPatch {
            archived_at: Utc::now(),
            archived_reason: normalize_reason(reason),
            status: None,
        };
        self.records.update(kind, id, patch).await?;

        info!("Archived {kind} record {id}");
        Ok(())
    }

    /// Archives the record, marks proposals rejected, then drops the report.
    pub async fn reject(
        &self,
        kind: RecordKind,
        id: Uuid,
        reason: Option<String>,
    ) -> Result<ArtifactCleanup, LifecycleError> {
        let report_path = self.capture_report_path(kind, id).await;

        let patch = RecordPatch {
            archived_at: Utc::now(),
            archived_reason: normalize_reason(reason),
            status: kind.rejected_status(),
        };
        self.records.update(kind, id, patch).await?;
        info!("Rejected {kind} record {id}");

        Ok(self.cleanup_artifact(report_path).await)
    }

    /// Deletes the row outright, then drops the report. Research only.
    pub async fn hard_delete(
        &self,
        kind: RecordKind,
        id: Uuid,
    ) -> Result<ArtifactCleanup, LifecycleError> {
        if !kind.allows_hard_delete() {
            return Err(LifecycleError::Validation(format!(
                "{kind} records cannot be deleted; reject them instead"
            )));
        }

        let report_path = self.capture_report_path(kind, id).await;

        self.records.delete(kind, id).await?;
        info!("Deleted {kind} record {id}");

        Ok(self.cleanup_artifact(report_path).await)
    }

    async fn capture_report_path(&self, kind: RecordKind, id: Uuid) -> Option<String> {
        match self.records.get(kind, id).await {
            Ok(row) => row
                .and_then(|r| r.report_path)
                .filter(|path| !path.is_empty()),
            Err(e) => {
                warn!("Could not read report path for {kind} record {id}, skipping cleanup: {e}");
                None
            }
        }
    }

    async fn cleanup_artifact(&self, report_path: Option<String>) -> ArtifactCleanup {
        let Some(path) = report_path else {
            return ArtifactCleanup::NoArtifact;
        };

        match self.blobs.remove(&self.bucket, &path).await {
            Ok(()) => ArtifactCleanup::Removed { path },
            Err(e) => {
                warn!("Report cleanup failed, blob left orphaned: {e}");
                ArtifactCleanup::Failed {
                    path,
                    reason: e.message,
                }
            }
        }
    }
}

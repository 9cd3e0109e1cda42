//! In-memory recording fakes for the store traits.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::models::record::{RecordKind, RecordPatch, RecordRow, RecordStatus};
use crate::models::spend::SpendLog;
use crate::store::{
    BlobError, BlobStore, RecordStore, SpendLogError, SpendLogReader, StoreError,
};

#[derive(Debug, Clone, PartialEq)]
pub struct StoredRecord {
    pub status: Option<RecordStatus>,
    pub archived_at: Option<DateTime<Utc>>,
    pub archived_reason: Option<String>,
    pub report_path: Option<String>,
}

impl StoredRecord {
    pub fn active(kind: RecordKind, report_path: Option<&str>) -> Self {
        Self {
            status: kind.rejected_status().map(|_| RecordStatus::Active),
            archived_at: None,
            archived_reason: None,
            report_path: report_path.map(String::from),
        }
    }
}

#[derive(Default)]
pub struct MemoryRecordStore {
    rows: Mutex<HashMap<(RecordKind, Uuid), StoredRecord>>,
    pub fail_get: AtomicBool,
    pub fail_writes: AtomicBool,
}

impl MemoryRecordStore {
    pub fn insert(&self, kind: RecordKind, id: Uuid, record: StoredRecord) {
        self.rows.lock().unwrap().insert((kind, id), record);
    }

    pub fn row(&self, kind: RecordKind, id: Uuid) -> Option<StoredRecord> {
        self.rows.lock().unwrap().get(&(kind, id)).cloned()
    }

    fn check_writable(&self) -> Result<(), StoreError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(StoreError::Backend("connection reset".to_string()));
        }
        Ok(())
    }
}

#[async_trait]
impl RecordStore for MemoryRecordStore {
    async fn get(&self, kind: RecordKind, id: Uuid) -> Result<Option<RecordRow>, StoreError> {
        if self.fail_get.load(Ordering::SeqCst) {
            return Err(StoreError::Backend("read timeout".to_string()));
        }
        Ok(self.row(kind, id).map(|r| RecordRow {
            id,
            archived_at: r.archived_at,
            archived_reason: r.archived_reason,
            report_path: r.report_path,
        }))
    }

    async fn update(
        &self,
        kind: RecordKind,
        id: Uuid,
        patch: RecordPatch,
    ) -> Result<(), StoreError> {
        self.check_writable()?;
        let mut rows = self.rows.lock().unwrap();
        let row = rows
            .get_mut(&(kind, id))
            .ok_or(StoreError::NotFound { kind, id })?;

        row.archived_at = Some(match row.archived_at {
            Some(existing) => existing.max(patch.archived_at),
            None => patch.archived_at,
        });
        row.archived_reason = patch.archived_reason;
        if let Some(status) = patch.status {
            row.status = Some(status);
        }
        Ok(())
    }

    async fn delete(&self, kind: RecordKind, id: Uuid) -> Result<(), StoreError> {
        self.check_writable()?;
        self.rows
            .lock()
            .unwrap()
            .remove(&(kind, id))
            .map(|_| ())
            .ok_or(StoreError::NotFound { kind, id })
    }
}

/// Records every removal attempt, successful or not.
#[derive(Default)]
pub struct MemoryBlobStore {
    removals: Mutex<Vec<(String, String)>>,
    pub fail_removals: AtomicBool,
}

impl MemoryBlobStore {
    pub fn removals(&self) -> Vec<(String, String)> {
        self.removals.lock().unwrap().clone()
    }
}

#[async_trait]
impl BlobStore for MemoryBlobStore {
    async fn remove(&self, bucket: &str, path: &str) -> Result<(), BlobError> {
        self.removals
            .lock()
            .unwrap()
            .push((bucket.to_string(), path.to_string()));

        if self.fail_removals.load(Ordering::SeqCst) {
            return Err(BlobError {
                bucket: bucket.to_string(),
                path: path.to_string(),
                message: "access denied".to_string(),
            });
        }
        Ok(())
    }
}

pub struct StaticSpendLog(pub SpendLog);

#[async_trait]
impl SpendLogReader for StaticSpendLog {
    async fn read_all(&self) -> Result<SpendLog, SpendLogError> {
        Ok(self.0.clone())
    }
}

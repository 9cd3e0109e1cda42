//! Store seams — the three external collaborators the core talks to.
//!
//! Handlers never reach Postgres, S3 or the spend log directly: `AppState`
//! carries `Arc<dyn ...>` implementations, constructed in `main` and swapped
//! for in-memory fakes in tests.

use async_trait::async_trait;
use thiserror::Error;
use uuid::Uuid;

use crate::models::record::{RecordKind, RecordPatch, RecordRow};
use crate::models::spend::SpendLog;

pub mod postgres;
pub mod s3;
pub mod spend_log;

#[cfg(test)]
pub mod memory;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("{kind} record {id} not found")]
    NotFound { kind: RecordKind, id: Uuid },

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Store error: {0}")]
    Backend(String),
}

#[derive(Debug, Error)]
#[error("Failed to remove s3://{bucket}/{path}: {message}")]
pub struct BlobError {
    pub bucket: String,
    pub path: String,
    pub message: String,
}

#[derive(Debug, Error)]
pub enum SpendLogError {
    #[error("Failed to read spend log {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Spend log {path} is malformed: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Row access to the proposal and research tables.
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Returns `Ok(None)` when no row has this id.
    async fn get(&self, kind: RecordKind, id: Uuid) -> Result<Option<RecordRow>, StoreError>;

    /// Applies the patch. A missing row is `StoreError::NotFound`.
    async fn update(&self, kind: RecordKind, id: Uuid, patch: RecordPatch)
        -> Result<(), StoreError>;

    /// Deletes the row. A missing row is `StoreError::NotFound`.
    async fn delete(&self, kind: RecordKind, id: Uuid) -> Result<(), StoreError>;
}

/// Object storage holding report artifacts.
#[async_trait]
pub trait BlobStore: Send + Sync {
    async fn remove(&self, bucket: &str, path: &str) -> Result<(), BlobError>;
}

/// Read access to the append-only spend log.
#[async_trait]
pub trait SpendLogReader: Send + Sync {
    async fn read_all(&self) -> Result<SpendLog, SpendLogError>;
}

use std::io::ErrorKind;
use std::path::PathBuf;

use async_trait::async_trait;
use tracing::warn;

use crate::models::spend::SpendLog;
use crate::store::{SpendLogError, SpendLogReader};

/// Reads the collector's JSON spend log from disk on every call.
#[derive(Debug, Clone)]
pub struct FileSpendLog {
    path: PathBuf,
}

impl FileSpendLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl SpendLogReader for FileSpendLog {
    async fn read_all(&self) -> Result<SpendLog, SpendLogError> {
        let shown = self.path.display().to_string();

        let raw = match tokio::fs::read_to_string(&self.path).await {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                // The collector has not run yet.
                warn!("Spend log {shown} does not exist; reporting an empty log");
                return Ok(SpendLog::default());
            }
            Err(source) => {
                return Err(SpendLogError::Io {
                    path: shown,
                    source,
                })
            }
        };

        serde_json::from_str(&raw).map_err(|source| SpendLogError::Parse {
            path: shown,
            source,
        })
    }
}

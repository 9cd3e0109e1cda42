use async_trait::async_trait;
use sqlx::PgPool;
use tracing::debug;
use uuid::Uuid;

use crate::models::record::{RecordKind, RecordPatch, RecordRow};
use crate::store::{RecordStore, StoreError};

/// `RecordStore` over the `proposals` / `research` tables.
#[derive(Clone)]
pub struct PgRecordStore {
    pool: PgPool,
}

impl PgRecordStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RecordStore for PgRecordStore {
    async fn get(&self, kind: RecordKind, id: Uuid) -> Result<Option<RecordRow>, StoreError> {
        let sql = format!(
            "SELECT id, archived_at, archived_reason, report_path FROM {} WHERE id = $1",
            kind.table()
        );
        Ok(sqlx::query_as::<_, RecordRow>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?)
    }

    async fn update(
        &self,
        kind: RecordKind,
        id: Uuid,
        patch: RecordPatch,
    ) -> Result<(), StoreError> {
        let sql = update_sql(kind, patch.status.is_some());
        debug!("{sql}");

        let mut query = sqlx::query(&sql)
            .bind(patch.archived_at)
            .bind(patch.archived_reason)
            .bind(id);
        if let Some(status) = patch.status {
            query = query.bind(status.as_str());
        }

        let result = query.execute(&self.pool).await?;
        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound { kind, id });
        }
        Ok(())
    }

    async fn delete(&self, kind: RecordKind, id: Uuid) -> Result<(), StoreError> {
        let sql = format!("DELETE FROM {} WHERE id = $1", kind.table());
        let result = sqlx::query(&sql).bind(id).execute(&self.pool).await?;
        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound { kind, id });
        }
        Ok(())
    }
}

/// GREATEST skips NULL, so a first archive takes `$1` and later ones never
/// move the timestamp backwards.
fn update_sql(kind: RecordKind, with_status: bool) -> String {
    let status = if with_status { ", status = $4" } else { "" };
    format!(
        "UPDATE {} SET archived_at = GREATEST(archived_at, $1), archived_reason = $2{} WHERE id = $3",
        kind.table(),
        status
    )
}

//! SQLite implementation of CallRecordRepository

use async_trait::async_trait;
use sqlx::SqlitePool;

use calllog::{CallCounts, CallRecord, CallRecordRepository, DomainError, NewCallRecord};

/// SQLite implementation of CallRecordRepository
pub struct SqliteCallRecordRepository {
    pool: SqlitePool,
}

impl SqliteCallRecordRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

/// Internal row type for sqlx mapping
#[derive(sqlx::FromRow)]
struct CallRecordRow {
    id: i64,
    endpoint: String,
    call_type: String,
    response_message: String,
    execution_time_ms: i64,
    created_at: chrono::DateTime<chrono::Utc>,
}

impl From<CallRecordRow> for CallRecord {
    fn from(row: CallRecordRow) -> Self {
        Self {
            id: row.id,
            endpoint: row.endpoint,
            call_type: row.call_type,
            response_message: row.response_message,
            execution_time_ms: row.execution_time_ms,
            created_at: row.created_at,
        }
    }
}

#[async_trait]
impl CallRecordRepository for SqliteCallRecordRepository {
    async fn insert(&self, record: &NewCallRecord) -> Result<CallRecord, DomainError> {
        let id = sqlx::query_scalar::<_, i64>(
            r#"
            INSERT INTO api_calls (endpoint, call_type, response_message, execution_time_ms, created_at)
            VALUES (?, ?, ?, ?, ?)
            RETURNING id
            "#,
        )
        .bind(&record.endpoint)
        .bind(&record.call_type)
        .bind(&record.response_message)
        .bind(record.execution_time_ms)
        .bind(record.created_at)
        .fetch_one(&self.pool)
        .await
        .map_err(DomainError::repository)?;

        Ok(record.clone().into_record(id))
    }

    async fn find_all_newest_first(&self) -> Result<Vec<CallRecord>, DomainError> {
        let rows = sqlx::query_as::<_, CallRecordRow>(
            "SELECT * FROM api_calls ORDER BY created_at DESC, id DESC",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(DomainError::repository)?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn find_by_call_type(&self, call_type: &str) -> Result<Vec<CallRecord>, DomainError> {
        let rows = sqlx::query_as::<_, CallRecordRow>(
            "SELECT * FROM api_calls WHERE call_type = ? ORDER BY id",
        )
        .bind(call_type)
        .fetch_all(&self.pool)
        .await
        .map_err(DomainError::repository)?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn count_by_call_type(&self, call_type: &str) -> Result<i64, DomainError> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM api_calls WHERE call_type = ?")
            .bind(call_type)
            .fetch_one(&self.pool)
            .await
            .map_err(DomainError::repository)
    }

    async fn count(&self) -> Result<i64, DomainError> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM api_calls")
            .fetch_one(&self.pool)
            .await
            .map_err(DomainError::repository)
    }

    async fn count_grouped(&self) -> Result<CallCounts, DomainError> {
        let rows = sqlx::query_as::<_, (String, i64)>(
            "SELECT call_type, COUNT(*) FROM api_calls GROUP BY call_type",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(DomainError::repository)?;

        Ok(rows.into_iter().collect())
    }
}

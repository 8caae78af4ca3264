//! Session store using sqlx
//!
//! Persists linked WhatsApp sessions in the `whatsapp_sessions` table.
//! A partial unique index backs the single-default invariant; writes that
//! move the flag clear it first inside the same transaction.

use application::{error::ApplicationError, ports::SessionStore};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use domain::{Session, SessionId, SessionStatus};
use sqlx::SqlitePool;
use tracing::{debug, info, instrument};

use super::error::map_sqlx_error;

const SELECT_COLUMNS: &str =
    "SELECT id, name, status, is_default, created_at, updated_at FROM whatsapp_sessions";

/// Session store backed by SQLite
#[derive(Debug, Clone)]
pub struct SqliteSessionStore {
    pool: SqlitePool,
}

impl SqliteSessionStore {
    /// Create a new session store
    #[must_use]
    pub const fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    fn parse_timestamp(s: &str) -> Result<DateTime<Utc>, ApplicationError> {
        DateTime::parse_from_rfc3339(s)
            .map(|dt| dt.with_timezone(&Utc))
            .map_err(|e| ApplicationError::Internal(format!("Invalid timestamp '{s}': {e}")))
    }
}

#[async_trait]
impl SessionStore for SqliteSessionStore {
    #[instrument(skip(self))]
    async fn create(&self, name: &str, is_default: bool) -> Result<Session, ApplicationError> {
        let now = Utc::now().to_rfc3339();
        let mut tx = self.pool.begin().await.map_err(map_sqlx_error)?;

        if is_default {
            sqlx::query("UPDATE whatsapp_sessions SET is_default = 0 WHERE is_default = 1")
                .execute(&mut *tx)
                .await
                .map_err(map_sqlx_error)?;
        }

        let id = sqlx::query(
            r"
            INSERT INTO whatsapp_sessions (name, status, is_default, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $4)
            ",
        )
        .bind(name)
        .bind(SessionStatus::Disconnected.as_str())
        .bind(is_default)
        .bind(&now)
        .execute(&mut *tx)
        .await
        .map_err(map_sqlx_error)?
        .last_insert_rowid();

        let row: SessionRow = sqlx::query_as(&format!("{SELECT_COLUMNS} WHERE id = $1"))
            .bind(id)
            .fetch_one(&mut *tx)
            .await
            .map_err(map_sqlx_error)?;

        tx.commit().await.map_err(map_sqlx_error)?;

        info!(session_id = id, "Session created");
        row.try_into()
    }

    #[instrument(skip(self), fields(session_id = %id))]
    async fn get(&self, id: SessionId) -> Result<Option<Session>, ApplicationError> {
        let row: Option<SessionRow> = sqlx::query_as(&format!("{SELECT_COLUMNS} WHERE id = $1"))
            .bind(id.as_i64())
            .fetch_optional(&self.pool)
            .await
            .map_err(map_sqlx_error)?;

        row.map(TryInto::try_into).transpose()
    }

    #[instrument(skip(self))]
    async fn find_by_name(&self, name: &str) -> Result<Option<Session>, ApplicationError> {
        let row: Option<SessionRow> =
            sqlx::query_as(&format!("{SELECT_COLUMNS} WHERE name = $1"))
                .bind(name)
                .fetch_optional(&self.pool)
                .await
                .map_err(map_sqlx_error)?;

        row.map(TryInto::try_into).transpose()
    }

    #[instrument(skip(self))]
    async fn list(&self) -> Result<Vec<Session>, ApplicationError> {
        let rows: Vec<SessionRow> = sqlx::query_as(&format!("{SELECT_COLUMNS} ORDER BY id"))
            .fetch_all(&self.pool)
            .await
            .map_err(map_sqlx_error)?;

        debug!(count = rows.len(), "Sessions listed");
        rows.into_iter().map(TryInto::try_into).collect()
    }

    #[instrument(skip(self))]
    async fn find_default(&self) -> Result<Option<Session>, ApplicationError> {
        let row: Option<SessionRow> =
            sqlx::query_as(&format!("{SELECT_COLUMNS} WHERE is_default = 1 LIMIT 1"))
                .fetch_optional(&self.pool)
                .await
                .map_err(map_sqlx_error)?;

        row.map(TryInto::try_into).transpose()
    }

    #[instrument(skip(self), fields(session_id = %id))]
    async fn rename(&self, id: SessionId, name: &str) -> Result<bool, ApplicationError> {
        let result =
            sqlx::query("UPDATE whatsapp_sessions SET name = $1, updated_at = $2 WHERE id = $3")
                .bind(name)
                .bind(Utc::now().to_rfc3339())
                .bind(id.as_i64())
                .execute(&self.pool)
                .await
                .map_err(map_sqlx_error)?;

        Ok(result.rows_affected() > 0)
    }

    #[instrument(skip(self), fields(session_id = %id, status = status.as_str()))]
    async fn update_status(
        &self,
        id: SessionId,
        status: SessionStatus,
    ) -> Result<bool, ApplicationError> {
        let result =
            sqlx::query("UPDATE whatsapp_sessions SET status = $1, updated_at = $2 WHERE id = $3")
                .bind(status.as_str())
                .bind(Utc::now().to_rfc3339())
                .bind(id.as_i64())
                .execute(&self.pool)
                .await
                .map_err(map_sqlx_error)?;

        Ok(result.rows_affected() > 0)
    }

    #[instrument(skip(self), fields(session_id = %id))]
    async fn set_default(&self, id: SessionId) -> Result<bool, ApplicationError> {
        let mut tx = self.pool.begin().await.map_err(map_sqlx_error)?;

        let exists: Option<(i64,)> = sqlx::query_as("SELECT id FROM whatsapp_sessions WHERE id = $1")
            .bind(id.as_i64())
            .fetch_optional(&mut *tx)
            .await
            .map_err(map_sqlx_error)?;

        if exists.is_none() {
            debug!("Session not found, default unchanged");
            return Ok(false);
        }

        let now = Utc::now().to_rfc3339();

        sqlx::query(
            "UPDATE whatsapp_sessions SET is_default = 0, updated_at = $1 \
             WHERE is_default = 1 AND id != $2",
        )
        .bind(&now)
        .bind(id.as_i64())
        .execute(&mut *tx)
        .await
        .map_err(map_sqlx_error)?;

        sqlx::query("UPDATE whatsapp_sessions SET is_default = 1, updated_at = $1 WHERE id = $2")
            .bind(&now)
            .bind(id.as_i64())
            .execute(&mut *tx)
            .await
            .map_err(map_sqlx_error)?;

        tx.commit().await.map_err(map_sqlx_error)?;

        info!("Default session changed");
        Ok(true)
    }

    #[instrument(skip(self), fields(session_id = %id))]
    async fn delete(&self, id: SessionId) -> Result<bool, ApplicationError> {
        let result = sqlx::query("DELETE FROM whatsapp_sessions WHERE id = $1")
            .bind(id.as_i64())
            .execute(&self.pool)
            .await
            .map_err(map_sqlx_error)?;

        Ok(result.rows_affected() > 0)
    }
}

/// Database row for sessions
#[derive(sqlx::FromRow)]
struct SessionRow {
    id: i64,
    name: String,
    status: String,
    is_default: bool,
    created_at: String,
    updated_at: String,
}

impl TryFrom<SessionRow> for Session {
    type Error = ApplicationError;

    fn try_from(row: SessionRow) -> Result<Self, Self::Error> {
        let status: SessionStatus = row
            .status
            .parse()
            .map_err(|e| ApplicationError::Internal(format!("Invalid session status: {e}")))?;

        Ok(Self::restore(
            SessionId::new(row.id),
            row.name,
            status,
            row.is_default,
            SqliteSessionStore::parse_timestamp(&row.created_at)?,
            SqliteSessionStore::parse_timestamp(&row.updated_at)?,
        ))
    }
}

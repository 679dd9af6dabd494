//! PostgreSQL implementations of the two content record stores.
//!
//! A row that cannot be converted is a corrupt record. Single lookups fail
//! with `CorruptRecord`; session listings skip the row with a warning so the
//! rest of the session stays readable. Locators and storage keys are kept
//! as stored and checked at delivery.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;

use crate::domain::content::{ContentKind, LightweightContentRecord, StorageKey, UploadedResource};
use crate::domain::foundation::{ContentItemId, DomainError, SessionId, Timestamp, ViewerId};
use crate::ports::{SessionContentStore, UploadedResourceStore};

/// Converts listed rows, dropping the ones that are corrupt.
fn convert_listed<R, T>(rows: Vec<R>, table: &str, session: SessionId) -> Vec<T>
where
    T: TryFrom<R, Error = DomainError>,
{
    rows.into_iter()
        .filter_map(|row| match T::try_from(row) {
            Ok(record) => Some(record),
            Err(e) => {
                tracing::warn!(
                    table,
                    session_id = %session,
                    error = %e,
                    "Skipping corrupt content record"
                );
                None
            }
        })
        .collect()
}

/// Uploaded resources backed by the `uploaded_resources` table.
pub struct PostgresUploadedResourceStore {
    pool: PgPool,
}

impl PostgresUploadedResourceStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Database row representation of an uploaded resource.
#[derive(Debug, sqlx::FromRow)]
struct UploadedResourceRow {
    id: i64,
    session_id: i64,
    title: String,
    description: Option<String>,
    storage_key: String,
    size_bytes: i64,
    mime_hint: Option<String>,
    uploaded_by: String,
    created_at: DateTime<Utc>,
}

impl TryFrom<UploadedResourceRow> for UploadedResource {
    type Error = DomainError;

    fn try_from(row: UploadedResourceRow) -> Result<Self, Self::Error> {
        Ok(UploadedResource {
            id: ContentItemId::from_i64(row.id),
            session_id: SessionId::from_i64(row.session_id),
            title: row.title,
            description: row.description,
            // Blank keys are kept and rejected at delivery time.
            storage_key: StorageKey::from_stored(row.storage_key),
            size_bytes: u64::try_from(row.size_bytes)
                .map_err(|_| DomainError::corrupt_record("Negative size_bytes", row.size_bytes))?,
            mime_hint: row.mime_hint,
            uploaded_by: ViewerId::new(row.uploaded_by)
                .map_err(|e| DomainError::corrupt_record("Invalid uploaded_by", e))?,
            created_at: Timestamp::from_datetime(row.created_at),
        })
    }
}

#[async_trait]
impl UploadedResourceStore for PostgresUploadedResourceStore {
    async fn find_by_id(&self, id: ContentItemId) -> Result<Option<UploadedResource>, DomainError> {
        let row: Option<UploadedResourceRow> = sqlx::query_as(
            r#"
            SELECT id, session_id, title, description, storage_key, size_bytes,
                   mime_hint, uploaded_by, created_at
            FROM uploaded_resources
            WHERE id = $1
            "#,
        )
        .bind(id.as_i64())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DomainError::database("Failed to find uploaded resource", e))?;

        row.map(UploadedResource::try_from).transpose()
    }

    async fn list_by_session(&self, session: SessionId) -> Result<Vec<UploadedResource>, DomainError> {
        let rows: Vec<UploadedResourceRow> = sqlx::query_as(
            r#"
            SELECT id, session_id, title, description, storage_key, size_bytes,
                   mime_hint, uploaded_by, created_at
            FROM uploaded_resources
            WHERE session_id = $1
            "#,
        )
        .bind(session.as_i64())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DomainError::database("Failed to list uploaded resources", e))?;

        Ok(convert_listed(rows, "uploaded_resources", session))
    }
}

/// Lightweight content backed by the `session_contents` table.
pub struct PostgresSessionContentStore {
    pool: PgPool,
}

impl PostgresSessionContentStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct SessionContentRow {
    id: i64,
    session_id: i64,
    kind: String,
    title: String,
    description: Option<String>,
    locator: String,
    created_by: String,
    created_at: DateTime<Utc>,
}

impl TryFrom<SessionContentRow> for LightweightContentRecord {
    type Error = DomainError;

    fn try_from(row: SessionContentRow) -> Result<Self, Self::Error> {
        let kind: ContentKind = row
            .kind
            .parse()
            .map_err(|e| DomainError::corrupt_record("Invalid content kind", e))?;
        if kind == ContentKind::UploadedResource {
            return Err(DomainError::corrupt_record(
                "Invalid content kind",
                format!("session content {} claims to be an upload", row.id),
            ));
        }

        Ok(LightweightContentRecord {
            id: ContentItemId::from_i64(row.id),
            session_id: SessionId::from_i64(row.session_id),
            kind,
            title: row.title,
            description: row.description,
            locator: row.locator,
            created_by: ViewerId::new(row.created_by)
                .map_err(|e| DomainError::corrupt_record("Invalid created_by", e))?,
            created_at: Timestamp::from_datetime(row.created_at),
        })
    }
}

#[async_trait]
impl SessionContentStore for PostgresSessionContentStore {
    async fn find_by_id(
        &self,
        id: ContentItemId,
    ) -> Result<Option<LightweightContentRecord>, DomainError> {
        let row: Option<SessionContentRow> = sqlx::query_as(
            r#"
            SELECT id, session_id, kind, title, description, locator, created_by, created_at
            FROM session_contents
            WHERE id = $1
            "#,
        )
        .bind(id.as_i64())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DomainError::database("Failed to find session content", e))?;

        row.map(LightweightContentRecord::try_from).transpose()
    }

    async fn list_by_session(
        &self,
        session: SessionId,
    ) -> Result<Vec<LightweightContentRecord>, DomainError> {
        let rows: Vec<SessionContentRow> = sqlx::query_as(
            r#"
            SELECT id, session_id, kind, title, description, locator, created_by, created_at
            FROM session_contents
            WHERE session_id = $1
            "#,
        )
        .bind(session.as_i64())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DomainError::database("Failed to list session content", e))?;

        Ok(convert_listed(rows, "session_contents", session))
    }
}

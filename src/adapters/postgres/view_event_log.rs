//! PostgreSQL implementation of ViewEventLog.
//!
//! Idempotency is enforced by the `view_events_item_viewer_key` unique index:
//! concurrent first views of the same pair race on the insert and exactly one
//! wins. The counter row is advanced in the same transaction as the insert.
//!
//! Every write touching an item's counter first takes a transaction-scoped
//! advisory lock keyed on the item id, so a rebuild's recount and upsert
//! cannot interleave with an append.

use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::{PgPool, Postgres, Transaction};
use std::collections::HashMap;

use crate::domain::foundation::{ContentItemId, DomainError, Timestamp};
use crate::domain::views::{DailyViewCount, RankedItem, RecordOutcome, ViewEvent, ViewStats, ViewWindow};
use crate::ports::ViewEventLog;

pub struct PostgresViewEventLog {
    pool: PgPool,
}

impl PostgresViewEventLog {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn begin(&self) -> Result<Transaction<'static, Postgres>, DomainError> {
        self.pool
            .begin()
            .await
            .map_err(|e| DomainError::database("Failed to begin view transaction", e))
    }
}

#[derive(Debug, sqlx::FromRow)]
struct CounterRow {
    content_item_id: i64,
    total: i64,
    distinct_viewers: i64,
}

impl CounterRow {
    fn stats(&self) -> ViewStats {
        ViewStats {
            total: count(self.total),
            distinct_viewers: count(self.distinct_viewers),
        }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct DailyRow {
    day: NaiveDate,
    views: i64,
    distinct_viewers: i64,
}

fn count(value: i64) -> u64 {
    u64::try_from(value).unwrap_or_default()
}

/// Serialises counter writers for one item until the transaction ends.
async fn lock_item(tx: &mut Transaction<'_, Postgres>, item: ContentItemId) -> Result<(), DomainError> {
    sqlx::query("SELECT pg_advisory_xact_lock($1)")
        .bind(item.as_i64())
        .execute(&mut **tx)
        .await
        .map_err(|e| DomainError::database("Failed to lock view counter", e))?;
    Ok(())
}

async fn recount_in<'e, E>(executor: E, item: ContentItemId) -> Result<ViewStats, DomainError>
where
    E: sqlx::Executor<'e, Database = Postgres>,
{
    let (total, distinct): (i64, i64) = sqlx::query_as(
        r#"
        SELECT COUNT(*), COUNT(DISTINCT viewer_id)
        FROM view_events
        WHERE content_item_id = $1
        "#,
    )
    .bind(item.as_i64())
    .fetch_one(executor)
    .await
    .map_err(|e| DomainError::database("Failed to recount views", e))?;

    Ok(ViewStats {
        total: count(total),
        distinct_viewers: count(distinct),
    })
}

#[async_trait]
impl ViewEventLog for PostgresViewEventLog {
    async fn append(&self, event: &ViewEvent, window: ViewWindow) -> Result<RecordOutcome, DomainError> {
        let mut tx = self.begin().await?;
        lock_item(&mut tx, event.content_item_id).await?;

        let inserted = match window {
            ViewWindow::Permanent => sqlx::query(
                r#"
                INSERT INTO view_events (
                    content_item_id, viewer_id, content_kind, client_address, user_agent, viewed_at
                ) VALUES ($1, $2, $3, $4, $5, $6)
                ON CONFLICT (content_item_id, viewer_id) DO NOTHING
                "#,
            )
            .bind(event.content_item_id.as_i64())
            .bind(event.viewer_id.as_str())
            .bind(event.content_kind.map(|kind| kind.as_str()))
            .bind(event.client.address.as_deref())
            .bind(event.client.user_agent.as_deref())
            .bind(event.viewed_at.as_datetime())
            .execute(&mut *tx)
            .await
            .map_err(|e| DomainError::database("Failed to append view event", e))?
            .rows_affected(),
        };

        if inserted == 0 {
            tx.rollback()
                .await
                .map_err(|e| DomainError::database("Failed to roll back view transaction", e))?;
            return Ok(RecordOutcome::AlreadyRecorded);
        }

        // One row per pair, so every admitted event is also a new distinct viewer.
        sqlx::query(
            r#"
            INSERT INTO content_view_counters (content_item_id, total, distinct_viewers)
            VALUES ($1, 1, 1)
            ON CONFLICT (content_item_id) DO UPDATE SET
                total = content_view_counters.total + 1,
                distinct_viewers = content_view_counters.distinct_viewers + 1
            "#,
        )
        .bind(event.content_item_id.as_i64())
        .execute(&mut *tx)
        .await
        .map_err(|e| DomainError::database("Failed to advance view counter", e))?;

        tx.commit()
            .await
            .map_err(|e| DomainError::database("Failed to commit view event", e))?;

        Ok(RecordOutcome::Recorded)
    }

    async fn stats(&self, item: ContentItemId) -> Result<ViewStats, DomainError> {
        let row: Option<CounterRow> = sqlx::query_as(
            r#"
            SELECT content_item_id, total, distinct_viewers
            FROM content_view_counters
            WHERE content_item_id = $1
            "#,
        )
        .bind(item.as_i64())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DomainError::database("Failed to read view counter", e))?;

        Ok(row.map(|row| row.stats()).unwrap_or_default())
    }

    async fn recount(&self, item: ContentItemId) -> Result<ViewStats, DomainError> {
        recount_in(&self.pool, item).await
    }

    async fn rebuild_counter(&self, item: ContentItemId) -> Result<ViewStats, DomainError> {
        let mut tx = self.begin().await?;
        lock_item(&mut tx, item).await?;
        let stats = recount_in(&mut *tx, item).await?;

        if stats.total == 0 {
            sqlx::query("DELETE FROM content_view_counters WHERE content_item_id = $1")
                .bind(item.as_i64())
                .execute(&mut *tx)
                .await
                .map_err(|e| DomainError::database("Failed to clear view counter", e))?;
        } else {
            sqlx::query(
                r#"
                INSERT INTO content_view_counters (content_item_id, total, distinct_viewers)
                VALUES ($1, $2, $3)
                ON CONFLICT (content_item_id) DO UPDATE SET
                    total = EXCLUDED.total,
                    distinct_viewers = EXCLUDED.distinct_viewers
                "#,
            )
            .bind(item.as_i64())
            .bind(stats.total as i64)
            .bind(stats.distinct_viewers as i64)
            .execute(&mut *tx)
            .await
            .map_err(|e| DomainError::database("Failed to rebuild view counter", e))?;
        }

        tx.commit()
            .await
            .map_err(|e| DomainError::database("Failed to commit counter rebuild", e))?;
        Ok(stats)
    }

    async fn stats_for_items(
        &self,
        items: &[ContentItemId],
    ) -> Result<HashMap<ContentItemId, ViewStats>, DomainError> {
        if items.is_empty() {
            return Ok(HashMap::new());
        }
        let ids: Vec<i64> = items.iter().map(|id| id.as_i64()).collect();

        let rows: Vec<CounterRow> = sqlx::query_as(
            r#"
            SELECT content_item_id, total, distinct_viewers
            FROM content_view_counters
            WHERE content_item_id = ANY($1)
            "#,
        )
        .bind(&ids)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DomainError::database("Failed to read view counters", e))?;

        Ok(rows
            .iter()
            .map(|row| (ContentItemId::from_i64(row.content_item_id), row.stats()))
            .collect())
    }

    async fn daily_counts(
        &self,
        item: ContentItemId,
        since: Timestamp,
    ) -> Result<Vec<DailyViewCount>, DomainError> {
        let rows: Vec<DailyRow> = sqlx::query_as(
            r#"
            SELECT (viewed_at AT TIME ZONE 'UTC')::date AS day,
                   COUNT(*) AS views,
                   COUNT(DISTINCT viewer_id) AS distinct_viewers
            FROM view_events
            WHERE content_item_id = $1 AND viewed_at >= $2
            GROUP BY day
            ORDER BY day
            "#,
        )
        .bind(item.as_i64())
        .bind(since.as_datetime())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DomainError::database("Failed to read daily views", e))?;

        Ok(rows
            .into_iter()
            .map(|row| DailyViewCount {
                date: row.day,
                views: count(row.views),
                distinct_viewers: count(row.distinct_viewers),
            })
            .collect())
    }

    async fn top_items(&self, limit: u32) -> Result<Vec<RankedItem>, DomainError> {
        let rows: Vec<CounterRow> = sqlx::query_as(
            r#"
            SELECT content_item_id, total, distinct_viewers
            FROM content_view_counters
            WHERE total > 0
            ORDER BY total DESC, content_item_id ASC
            LIMIT $1
            "#,
        )
        .bind(i64::from(limit))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DomainError::database("Failed to rank content", e))?;

        Ok(rows
            .iter()
            .map(|row| RankedItem {
                content_item_id: ContentItemId::from_i64(row.content_item_id),
                stats: row.stats(),
            })
            .collect())
    }

    async fn orphan(&self, item: ContentItemId) -> Result<u64, DomainError> {
        let mut tx = self.begin().await?;
        lock_item(&mut tx, item).await?;

        let orphaned = sqlx::query(
            r#"
            UPDATE view_events
            SET orphaned_content_item_id = content_item_id,
                content_item_id = NULL
            WHERE content_item_id = $1
            "#,
        )
        .bind(item.as_i64())
        .execute(&mut *tx)
        .await
        .map_err(|e| DomainError::database("Failed to orphan view events", e))?
        .rows_affected();

        sqlx::query("DELETE FROM content_view_counters WHERE content_item_id = $1")
            .bind(item.as_i64())
            .execute(&mut *tx)
            .await
            .map_err(|e| DomainError::database("Failed to drop view counter", e))?;

        tx.commit()
            .await
            .map_err(|e| DomainError::database("Failed to commit orphaning", e))?;
        Ok(orphaned)
    }
}

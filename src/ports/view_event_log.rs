//! View event log port.
//!
//! The log is append-only. Each implementation keeps an incrementally
//! maintained counter per item next to the log and must keep it equal to a
//! recount of the log, including under concurrent appends.
//!
//! # Contract
//!
//! - `append` consults the given `ViewWindow`. When the window does not
//!   admit the event it returns `AlreadyRecorded` and changes nothing.
//! - Idempotence comes from a uniqueness constraint on
//!   `(content_item_id, viewer_id)`, never from request-level locking.
//! - `append` returns only after the event and counter are durable.
//! - Orphaned events keep their rows but leave every aggregate.

use async_trait::async_trait;
use std::collections::HashMap;

use crate::domain::foundation::{ContentItemId, DomainError, Timestamp};
use crate::domain::views::{DailyViewCount, RankedItem, RecordOutcome, ViewEvent, ViewStats, ViewWindow};

#[async_trait]
pub trait ViewEventLog: Send + Sync {
    /// Appends an event if the window admits it.
    async fn append(&self, event: &ViewEvent, window: ViewWindow) -> Result<RecordOutcome, DomainError>;

    /// Counts from the maintained counter.
    async fn stats(&self, item: ContentItemId) -> Result<ViewStats, DomainError>;

    /// Counts recomputed from the log itself.
    async fn recount(&self, item: ContentItemId) -> Result<ViewStats, DomainError>;

    /// Overwrites the counter with a recount and returns it.
    async fn rebuild_counter(&self, item: ContentItemId) -> Result<ViewStats, DomainError>;

    /// Counter values for several items. Items without views are omitted.
    async fn stats_for_items(
        &self,
        items: &[ContentItemId],
    ) -> Result<HashMap<ContentItemId, ViewStats>, DomainError>;

    /// Per-day counts for views at or after `since`, oldest first. Days
    /// without views are omitted.
    async fn daily_counts(
        &self,
        item: ContentItemId,
        since: Timestamp,
    ) -> Result<Vec<DailyViewCount>, DomainError>;

    /// Items with the highest totals, ties broken by id.
    async fn top_items(&self, limit: u32) -> Result<Vec<RankedItem>, DomainError>;

    /// Detaches every event of `item` and drops its counter. Returns the
    /// number of events orphaned.
    async fn orphan(&self, item: ContentItemId) -> Result<u64, DomainError>;
}

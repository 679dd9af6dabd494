//! In-memory view event log.
//!
//! One mutex guards the log, the per-pair index and the counters together,
//! so an append and its counter update are a single step. The per-pair index
//! plays the role of the database's unique constraint.

use async_trait::async_trait;
use std::collections::{BTreeMap, HashMap, HashSet};
use std::sync::Arc;
use tokio::sync::Mutex;

use crate::domain::foundation::{ContentItemId, DomainError, Timestamp, ViewerId};
use crate::domain::views::{DailyViewCount, RankedItem, RecordOutcome, ViewEvent, ViewStats, ViewWindow};
use crate::ports::ViewEventLog;

#[derive(Debug, Clone)]
struct StoredEvent {
    event: ViewEvent,
    orphaned: bool,
}

#[derive(Debug, Default)]
struct LogState {
    events: Vec<StoredEvent>,
    latest: HashMap<(ContentItemId, ViewerId), Timestamp>,
    counters: HashMap<ContentItemId, ViewStats>,
}

impl LogState {
    fn live_events(&self, item: ContentItemId) -> impl Iterator<Item = &ViewEvent> {
        self.events
            .iter()
            .filter(move |stored| !stored.orphaned && stored.event.content_item_id == item)
            .map(|stored| &stored.event)
    }

    fn recount(&self, item: ContentItemId) -> ViewStats {
        let mut viewers = HashSet::new();
        let mut total = 0;
        for event in self.live_events(item) {
            total += 1;
            viewers.insert(&event.viewer_id);
        }
        ViewStats {
            total,
            distinct_viewers: viewers.len() as u64,
        }
    }
}

/// In-memory view log for tests and development.
#[derive(Debug, Clone, Default)]
pub struct InMemoryViewEventLog {
    state: Arc<Mutex<LogState>>,
}

impl InMemoryViewEventLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored events, orphans included.
    pub async fn event_count(&self) -> usize {
        self.state.lock().await.events.len()
    }

    /// Number of orphaned events.
    pub async fn orphan_count(&self) -> usize {
        self.state
            .lock()
            .await
            .events
            .iter()
            .filter(|stored| stored.orphaned)
            .count()
    }

    /// All live events for an item, in append order.
    pub async fn events_for(&self, item: ContentItemId) -> Vec<ViewEvent> {
        self.state.lock().await.live_events(item).cloned().collect()
    }

    /// Replaces the maintained counter without touching the log.
    pub async fn overwrite_counter(&self, item: ContentItemId, stats: ViewStats) {
        self.state.lock().await.counters.insert(item, stats);
    }
}

#[async_trait]
impl ViewEventLog for InMemoryViewEventLog {
    async fn append(&self, event: &ViewEvent, window: ViewWindow) -> Result<RecordOutcome, DomainError> {
        let mut state = self.state.lock().await;
        let key = (event.content_item_id, event.viewer_id.clone());
        let previous = state.latest.get(&key).copied();

        if !window.admits(previous.as_ref(), &event.viewed_at) {
            return Ok(RecordOutcome::AlreadyRecorded);
        }

        state.events.push(StoredEvent {
            event: event.clone(),
            orphaned: false,
        });
        state.latest.insert(key, event.viewed_at);
        let counter = state.counters.entry(event.content_item_id).or_default();
        counter.total += 1;
        if previous.is_none() {
            counter.distinct_viewers += 1;
        }
        Ok(RecordOutcome::Recorded)
    }

    async fn stats(&self, item: ContentItemId) -> Result<ViewStats, DomainError> {
        Ok(self
            .state
            .lock()
            .await
            .counters
            .get(&item)
            .copied()
            .unwrap_or_default())
    }

    async fn recount(&self, item: ContentItemId) -> Result<ViewStats, DomainError> {
        Ok(self.state.lock().await.recount(item))
    }

    async fn rebuild_counter(&self, item: ContentItemId) -> Result<ViewStats, DomainError> {
        let mut state = self.state.lock().await;
        let stats = state.recount(item);
        if stats.total == 0 {
            state.counters.remove(&item);
        } else {
            state.counters.insert(item, stats);
        }
        Ok(stats)
    }

    async fn stats_for_items(
        &self,
        items: &[ContentItemId],
    ) -> Result<HashMap<ContentItemId, ViewStats>, DomainError> {
        let state = self.state.lock().await;
        Ok(items
            .iter()
            .filter_map(|id| state.counters.get(id).map(|stats| (*id, *stats)))
            .collect())
    }

    async fn daily_counts(
        &self,
        item: ContentItemId,
        since: Timestamp,
    ) -> Result<Vec<DailyViewCount>, DomainError> {
        let state = self.state.lock().await;
        let mut days: BTreeMap<chrono::NaiveDate, (u64, HashSet<&ViewerId>)> = BTreeMap::new();
        for event in state
            .live_events(item)
            .filter(|event| !event.viewed_at.is_before(&since))
        {
            let entry = days.entry(event.viewed_at.date()).or_default();
            entry.0 += 1;
            entry.1.insert(&event.viewer_id);
        }
        Ok(days
            .into_iter()
            .map(|(date, (views, viewers))| DailyViewCount {
                date,
                views,
                distinct_viewers: viewers.len() as u64,
            })
            .collect())
    }

    async fn top_items(&self, limit: u32) -> Result<Vec<RankedItem>, DomainError> {
        let state = self.state.lock().await;
        let mut ranked: Vec<RankedItem> = state
            .counters
            .iter()
            .filter(|(_, stats)| stats.total > 0)
            .map(|(id, stats)| RankedItem {
                content_item_id: *id,
                stats: *stats,
            })
            .collect();
        ranked.sort_by(|a, b| {
            b.stats
                .total
                .cmp(&a.stats.total)
                .then(a.content_item_id.cmp(&b.content_item_id))
        });
        ranked.truncate(limit as usize);
        Ok(ranked)
    }

    async fn orphan(&self, item: ContentItemId) -> Result<u64, DomainError> {
        let mut state = self.state.lock().await;
        let mut orphaned = 0;
        for stored in state.events.iter_mut() {
            if !stored.orphaned && stored.event.content_item_id == item {
                stored.orphaned = true;
                orphaned += 1;
            }
        }
        state.latest.retain(|(id, _), _| *id != item);
        state.counters.remove(&item);
        Ok(orphaned)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn event(item: i64, viewer: &str) -> ViewEvent {
        ViewEvent::new(
            ContentItemId::from_i64(item),
            ViewerId::new(viewer).unwrap(),
            Timestamp::now(),
        )
    }

    fn id(item: i64) -> ContentItemId {
        ContentItemId::from_i64(item)
    }

    #[tokio::test]
    async fn duplicate_pair_is_a_no_op() {
        let log = InMemoryViewEventLog::new();
        let window = ViewWindow::Permanent;

        assert_eq!(log.append(&event(1, "a"), window).await.unwrap(), RecordOutcome::Recorded);
        assert_eq!(
            log.append(&event(1, "a"), window).await.unwrap(),
            RecordOutcome::AlreadyRecorded
        );

        let stats = log.stats(id(1)).await.unwrap();
        assert_eq!(stats, ViewStats { total: 1, distinct_viewers: 1 });
        assert_eq!(log.event_count().await, 1);
    }

    #[tokio::test]
    async fn counter_matches_recount() {
        let log = InMemoryViewEventLog::new();
        for viewer in ["a", "b", "c", "a"] {
            log.append(&event(1, viewer), ViewWindow::Permanent).await.unwrap();
        }
        log.append(&event(2, "a"), ViewWindow::Permanent).await.unwrap();

        assert_eq!(log.stats(id(1)).await.unwrap(), log.recount(id(1)).await.unwrap());
        assert_eq!(log.stats(id(1)).await.unwrap().total, 3);
    }

    #[tokio::test]
    async fn orphaned_events_leave_aggregates() {
        let log = InMemoryViewEventLog::new();
        log.append(&event(1, "a"), ViewWindow::Permanent).await.unwrap();
        log.append(&event(1, "b"), ViewWindow::Permanent).await.unwrap();
        log.append(&event(2, "a"), ViewWindow::Permanent).await.unwrap();

        assert_eq!(log.orphan(id(1)).await.unwrap(), 2);
        assert_eq!(log.stats(id(1)).await.unwrap(), ViewStats::default());
        assert_eq!(log.recount(id(1)).await.unwrap(), ViewStats::default());
        assert_eq!(log.orphan_count().await, 2);

        let top = log.top_items(10).await.unwrap();
        assert_eq!(top.len(), 1);
        assert_eq!(top[0].content_item_id, id(2));
    }

    #[tokio::test]
    async fn top_items_orders_by_total_then_id() {
        let log = InMemoryViewEventLog::new();
        for (item, viewer) in [(3, "a"), (3, "b"), (1, "a"), (2, "a")] {
            log.append(&event(item, viewer), ViewWindow::Permanent).await.unwrap();
        }
        let top = log.top_items(2).await.unwrap();
        let ids: Vec<i64> = top.iter().map(|r| r.content_item_id.as_i64()).collect();
        assert_eq!(ids, vec![3, 1]);
    }

    #[tokio::test]
    async fn daily_counts_group_by_day_since_cutoff() {
        let log = InMemoryViewEventLog::new();
        let now = Timestamp::now();
        let old = ViewEvent::new(id(1), ViewerId::new("a").unwrap(), now.minus_days(10));
        let recent = ViewEvent::new(id(1), ViewerId::new("b").unwrap(), now);
        log.append(&old, ViewWindow::Permanent).await.unwrap();
        log.append(&recent, ViewWindow::Permanent).await.unwrap();

        let counts = log.daily_counts(id(1), now.minus_days(3)).await.unwrap();
        assert_eq!(counts.len(), 1);
        assert_eq!(counts[0].date, now.date());
        assert_eq!(counts[0].views, 1);
    }

    #[tokio::test]
    async fn rebuild_counter_restores_recount() {
        let log = InMemoryViewEventLog::new();
        log.append(&event(1, "a"), ViewWindow::Permanent).await.unwrap();
        log.overwrite_counter(id(1), ViewStats { total: 40, distinct_viewers: 7 }).await;

        let rebuilt = log.rebuild_counter(id(1)).await.unwrap();
        assert_eq!(rebuilt, ViewStats { total: 1, distinct_viewers: 1 });
        assert_eq!(log.stats(id(1)).await.unwrap(), rebuilt);
    }
}

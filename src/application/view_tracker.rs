//! View Tracker - records views idempotently and reads their counts.

use std::sync::Arc;
use tokio::task::JoinHandle;

use crate::domain::content::ContentError;
use crate::domain::foundation::ContentItemId;
use crate::domain::views::{RecordOutcome, ViewEvent, ViewStats, ViewWindow};
use crate::ports::ViewEventLog;

#[derive(Clone)]
pub struct ViewTracker {
    log: Arc<dyn ViewEventLog>,
    window: ViewWindow,
}

impl ViewTracker {
    pub fn new(log: Arc<dyn ViewEventLog>, window: ViewWindow) -> Self {
        Self { log, window }
    }

    pub fn log(&self) -> &Arc<dyn ViewEventLog> {
        &self.log
    }

    /// Records a view and waits until it is durable. A repeat of an
    /// already-counted pair succeeds without changing anything.
    pub async fn record(&self, event: &ViewEvent) -> Result<RecordOutcome, ContentError> {
        let outcome = self.log.append(event, self.window).await?;
        tracing::debug!(
            content_item_id = %event.content_item_id,
            viewer_id = %event.viewer_id,
            outcome = ?outcome,
            "View recorded"
        );
        Ok(outcome)
    }

    /// Records a view off the response path. Failures are logged and
    /// otherwise ignored.
    pub fn record_in_background(&self, event: ViewEvent) -> JoinHandle<()> {
        let tracker = self.clone();
        tokio::spawn(async move {
            if let Err(e) = tracker.record(&event).await {
                tracing::warn!(
                    content_item_id = %event.content_item_id,
                    viewer_id = %event.viewer_id,
                    error = %e,
                    "Background view recording failed"
                );
            }
        })
    }

    /// Counts from the maintained counter.
    pub async fn count_views(&self, item: ContentItemId) -> Result<ViewStats, ContentError> {
        Ok(self.log.stats(item).await?)
    }

    /// Rebuilds the counter from the log, logging any drift found.
    pub async fn reconcile(&self, item: ContentItemId) -> Result<ViewStats, ContentError> {
        let before = self.log.stats(item).await?;
        let rebuilt = self.log.rebuild_counter(item).await?;
        if before != rebuilt {
            tracing::warn!(
                content_item_id = %item,
                counter_total = before.total,
                log_total = rebuilt.total,
                "View counter drifted from log; rebuilt"
            );
        }
        Ok(rebuilt)
    }
}

//! GetSessionViewReportHandler - Query handler for per-item counts across a
//! session, in listing order.

use serde::Serialize;

use crate::application::{ContentRegistry, ViewTracker, ViewerDirectory};
use crate::domain::content::ContentError;
use crate::domain::foundation::{AuthenticatedUser, ContentItemId, SessionId};
use crate::domain::views::{ItemViewSummary, ViewStats};

use super::require_analytics;

#[derive(Debug, Clone)]
pub struct GetSessionViewReportQuery {
    pub session_id: SessionId,
    pub user: AuthenticatedUser,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SessionViewReport {
    pub session_id: SessionId,
    pub items: Vec<ItemViewSummary>,
    /// Sum of item totals. Distinct viewers are not summed across items.
    pub total_views: u64,
}

pub struct GetSessionViewReportHandler {
    registry: ContentRegistry,
    viewers: ViewerDirectory,
    tracker: ViewTracker,
}

impl GetSessionViewReportHandler {
    pub fn new(registry: ContentRegistry, viewers: ViewerDirectory, tracker: ViewTracker) -> Self {
        Self {
            registry,
            viewers,
            tracker,
        }
    }

    pub async fn handle(&self, query: GetSessionViewReportQuery) -> Result<SessionViewReport, ContentError> {
        require_analytics(&query.user)?;
        self.viewers.require_course(query.session_id).await?;

        let items = self.registry.list_content(query.session_id).await?;
        let ids: Vec<ContentItemId> = items.iter().map(|item| item.id).collect();
        let stats = self.tracker.log().stats_for_items(&ids).await?;

        let rows: Vec<ItemViewSummary> = items
            .into_iter()
            .map(|item| ItemViewSummary {
                stats: stats.get(&item.id).copied().unwrap_or_else(ViewStats::default),
                content_item_id: item.id,
                kind: item.kind,
                title: item.title,
            })
            .collect();
        let total_views = rows.iter().map(|row| row.stats.total).sum();

        Ok(SessionViewReport {
            session_id: query.session_id,
            items: rows,
            total_views,
        })
    }
}

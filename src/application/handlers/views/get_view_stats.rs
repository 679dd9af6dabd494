//! GetViewStatsHandler - Query handler for one item's view counts.

use crate::application::{ContentRegistry, ViewTracker};
use crate::domain::content::{ContentError, ContentRef};
use crate::domain::foundation::AuthenticatedUser;
use crate::domain::views::ItemViewSummary;

use super::require_analytics;

#[derive(Debug, Clone)]
pub struct GetViewStatsQuery {
    pub reference: ContentRef,
    pub user: AuthenticatedUser,
}

pub struct GetViewStatsHandler {
    registry: ContentRegistry,
    tracker: ViewTracker,
}

impl GetViewStatsHandler {
    pub fn new(registry: ContentRegistry, tracker: ViewTracker) -> Self {
        Self { registry, tracker }
    }

    pub async fn handle(&self, query: GetViewStatsQuery) -> Result<ItemViewSummary, ContentError> {
        require_analytics(&query.user)?;

        let item = self.registry.get_content(query.reference).await?;
        let stats = self.tracker.count_views(item.id).await?;

        Ok(ItemViewSummary {
            content_item_id: item.id,
            kind: item.kind,
            title: item.title,
            stats,
        })
    }
}

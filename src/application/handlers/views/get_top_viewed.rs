//! GetTopViewedHandler - Query handler for the most viewed content across
//! the platform.

use serde::Serialize;

use crate::application::{ContentRegistry, ViewSettings, ViewTracker};
use crate::domain::content::{ContentError, ContentKind, ContentRef};
use crate::domain::foundation::{AuthenticatedUser, ContentItemId, SessionId};
use crate::domain::views::ViewStats;

use super::{bounded, require_analytics};

#[derive(Debug, Clone)]
pub struct GetTopViewedQuery {
    pub user: AuthenticatedUser,
    pub limit: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TopViewedItem {
    pub rank: u32,
    pub content_item_id: ContentItemId,
    pub session_id: SessionId,
    pub kind: ContentKind,
    pub title: String,
    pub stats: ViewStats,
}

pub struct GetTopViewedHandler {
    registry: ContentRegistry,
    tracker: ViewTracker,
    settings: ViewSettings,
}

impl GetTopViewedHandler {
    pub fn new(registry: ContentRegistry, tracker: ViewTracker, settings: ViewSettings) -> Self {
        Self {
            registry,
            tracker,
            settings,
        }
    }

    /// Ranked by total views, ties broken by ascending id. Items whose
    /// record has disappeared since the counter was read are skipped.
    pub async fn handle(&self, query: GetTopViewedQuery) -> Result<Vec<TopViewedItem>, ContentError> {
        require_analytics(&query.user)?;
        let limit = bounded(
            "limit",
            query.limit,
            self.settings.top_limit_default,
            self.settings.top_limit_max,
        )?;

        let ranked = self.tracker.log().top_items(limit).await?;

        let mut top = Vec::with_capacity(ranked.len());
        for entry in ranked {
            let item = match self.registry.get_content(ContentRef::any(entry.content_item_id)).await {
                Ok(item) => item,
                Err(ContentError::NotFound(_)) => {
                    tracing::debug!(
                        content_item_id = %entry.content_item_id,
                        "Skipping counted item with no record"
                    );
                    continue;
                }
                Err(e) => return Err(e),
            };
            top.push(TopViewedItem {
                rank: top.len() as u32 + 1,
                content_item_id: item.id,
                session_id: item.session_id,
                kind: item.kind,
                title: item.title,
                stats: entry.stats,
            });
        }

        Ok(top)
    }
}

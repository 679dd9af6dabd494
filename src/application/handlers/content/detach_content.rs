//! DetachContentHandler - Command handler that orphans the view history of a
//! deleted content item.
//!
//! Content ids are never reused, so a deleted item's events stay in the log
//! for audit but stop counting toward any aggregate.

use crate::application::{ContentRegistry, ViewTracker};
use crate::domain::content::{ContentError, ContentRef};
use crate::domain::foundation::{AuthenticatedUser, ContentItemId};

#[derive(Debug, Clone)]
pub struct DetachContentCommand {
    pub content_item_id: ContentItemId,
    pub user: AuthenticatedUser,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DetachContentResult {
    pub content_item_id: ContentItemId,
    pub orphaned_events: u64,
}

pub struct DetachContentHandler {
    registry: ContentRegistry,
    tracker: ViewTracker,
}

impl DetachContentHandler {
    pub fn new(registry: ContentRegistry, tracker: ViewTracker) -> Self {
        Self { registry, tracker }
    }

    pub async fn handle(&self, cmd: DetachContentCommand) -> Result<DetachContentResult, ContentError> {
        // 1. Only administrative roles manage deletions
        if !cmd.user.role.is_administrative() {
            return Err(ContentError::Unauthorized);
        }

        // 2. The item must already be gone from both stores
        match self.registry.get_content(ContentRef::any(cmd.content_item_id)).await {
            Err(ContentError::NotFound(_)) => {}
            Ok(_) | Err(ContentError::AmbiguousContentIdentifier(_)) => {
                return Err(ContentError::StillReferenced(cmd.content_item_id));
            }
            Err(e) => return Err(e),
        }

        // 3. Orphan its events and drop the counter
        let orphaned_events = self.tracker.log().orphan(cmd.content_item_id).await?;

        tracing::info!(
            content_item_id = %cmd.content_item_id,
            orphaned_events,
            detached_by = %cmd.user.id,
            "Content view history detached"
        );

        Ok(DetachContentResult {
            content_item_id: cmd.content_item_id,
            orphaned_events,
        })
    }
}

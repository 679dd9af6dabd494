//! ReconcileViewsHandler - Command handler that rebuilds an item's view
//! counter from its event log.

use crate::application::{ContentRegistry, ViewTracker};
use crate::domain::content::{ContentError, ContentRef};
use crate::domain::foundation::AuthenticatedUser;
use crate::domain::views::ItemViewSummary;

#[derive(Debug, Clone)]
pub struct ReconcileViewsCommand {
    pub reference: ContentRef,
    pub user: AuthenticatedUser,
}

pub struct ReconcileViewsHandler {
    registry: ContentRegistry,
    tracker: ViewTracker,
}

impl ReconcileViewsHandler {
    pub fn new(registry: ContentRegistry, tracker: ViewTracker) -> Self {
        Self { registry, tracker }
    }

    pub async fn handle(&self, cmd: ReconcileViewsCommand) -> Result<ItemViewSummary, ContentError> {
        if !cmd.user.role.is_administrative() {
            return Err(ContentError::Unauthorized);
        }

        let item = self.registry.get_content(cmd.reference).await?;
        let stats = self.tracker.reconcile(item.id).await?;

        tracing::info!(
            content_item_id = %item.id,
            total = stats.total,
            reconciled_by = %cmd.user.id,
            "View counter reconciled"
        );

        Ok(ItemViewSummary {
            content_item_id: item.id,
            kind: item.kind,
            title: item.title,
            stats,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::handlers::test_fixtures::Fixture;
    use crate::domain::foundation::{ContentItemId, Timestamp, ViewerId, ViewerRole};
    use crate::domain::views::{ViewEvent, ViewStats};

    fn command(fx: &Fixture, id: i64, role: ViewerRole) -> ReconcileViewsCommand {
        ReconcileViewsCommand {
            reference: ContentRef::any(ContentItemId::from_i64(id)),
            user: fx.user("admin-1", role),
        }
    }

    #[tokio::test]
    async fn drifted_counter_is_rebuilt_from_log() {
        let fx = Fixture::new().await;
        fx.add_upload(1, "a.pdf", 0).await;
        let tracker = fx.tracker();
        for viewer in ["s1", "s2"] {
            let event = ViewEvent::new(
                ContentItemId::from_i64(1),
                ViewerId::new(viewer).unwrap(),
                Timestamp::now(),
            );
            tracker.record(&event).await.unwrap();
        }
        fx.log
            .overwrite_counter(
                ContentItemId::from_i64(1),
                ViewStats {
                    total: 9,
                    distinct_viewers: 1,
                },
            )
            .await;

        let summary = ReconcileViewsHandler::new(fx.registry(), tracker.clone())
            .handle(command(&fx, 1, ViewerRole::Admin))
            .await
            .unwrap();

        let expected = ViewStats {
            total: 2,
            distinct_viewers: 2,
        };
        assert_eq!(summary.stats, expected);
        assert_eq!(tracker.count_views(ContentItemId::from_i64(1)).await.unwrap(), expected);
    }

    #[tokio::test]
    async fn presenters_cannot_reconcile() {
        let fx = Fixture::new().await;
        fx.add_upload(1, "a.pdf", 0).await;
        let err = ReconcileViewsHandler::new(fx.registry(), fx.tracker())
            .handle(command(&fx, 1, ViewerRole::Presenter))
            .await
            .unwrap_err();
        assert!(matches!(err, ContentError::Unauthorized));
    }

    #[tokio::test]
    async fn unknown_item_is_not_found() {
        let fx = Fixture::new().await;
        let err = ReconcileViewsHandler::new(fx.registry(), fx.tracker())
            .handle(command(&fx, 42, ViewerRole::Manager))
            .await
            .unwrap_err();
        assert!(matches!(err, ContentError::NotFound(_)));
    }
}

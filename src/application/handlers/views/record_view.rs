//! RecordViewHandler - Command handler for an explicit view report.
//!
//! Clients that render content themselves (embedded players, link cards)
//! report consumption here. Unlike delivery-triggered recording this waits
//! for the write and surfaces its failure.

use crate::application::handlers::content::authorize_item;
use crate::application::{ContentRegistry, ViewTracker, ViewerDirectory};
use crate::domain::content::{ContentError, ContentRef};
use crate::domain::foundation::{AuthenticatedUser, ContentItemId, Timestamp};
use crate::domain::views::{RecordOutcome, ViewClient, ViewEvent};

#[derive(Debug, Clone)]
pub struct RecordViewCommand {
    pub reference: ContentRef,
    pub user: AuthenticatedUser,
    pub client: ViewClient,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecordViewResult {
    pub content_item_id: ContentItemId,
    pub outcome: RecordOutcome,
}

pub struct RecordViewHandler {
    registry: ContentRegistry,
    viewers: ViewerDirectory,
    tracker: ViewTracker,
}

impl RecordViewHandler {
    pub fn new(registry: ContentRegistry, viewers: ViewerDirectory, tracker: ViewTracker) -> Self {
        Self {
            registry,
            viewers,
            tracker,
        }
    }

    pub async fn handle(&self, cmd: RecordViewCommand) -> Result<RecordViewResult, ContentError> {
        // 1. Only viewers allowed to open the item may count toward it
        let authorized = authorize_item(&self.registry, &self.viewers, cmd.reference, &cmd.user).await?;
        let content_item_id = authorized.item.id;

        // 2. Record synchronously
        let event = ViewEvent::new(content_item_id, authorized.viewer.id, Timestamp::now())
            .with_kind(authorized.item.kind)
            .with_client(cmd.client);
        let outcome = self.tracker.record(&event).await?;

        Ok(RecordViewResult {
            content_item_id,
            outcome,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::handlers::test_fixtures::Fixture;
    use crate::domain::content::ContentKind;
    use crate::domain::foundation::ViewerRole;

    fn command(id: i64, user: AuthenticatedUser) -> RecordViewCommand {
        RecordViewCommand {
            reference: ContentRef::any(ContentItemId::from_i64(id)),
            user,
            client: ViewClient::default(),
        }
    }

    #[tokio::test]
    async fn first_report_records_and_repeat_is_idempotent() {
        let fx = Fixture::new().await;
        fx.add_link(7, ContentKind::ExternalLink, "https://docs.example.com", 0).await;
        let student = fx.enrolled_student().await;
        let handler = RecordViewHandler::new(fx.registry(), fx.viewers(), fx.tracker());

        let first = handler.handle(command(7, student.clone())).await.unwrap();
        let second = handler.handle(command(7, student)).await.unwrap();

        assert_eq!(first.outcome, RecordOutcome::Recorded);
        assert_eq!(second.outcome, RecordOutcome::AlreadyRecorded);
        assert_eq!(fx.log.event_count().await, 1);
    }

    #[tokio::test]
    async fn staff_reports_are_recorded() {
        let fx = Fixture::new().await;
        fx.add_upload(1, "a.pdf", 0).await;
        let handler = RecordViewHandler::new(fx.registry(), fx.viewers(), fx.tracker());

        let result = handler
            .handle(command(1, fx.user("p-1", ViewerRole::Presenter)))
            .await
            .unwrap();
        assert_eq!(result.outcome, RecordOutcome::Recorded);
    }

    #[tokio::test]
    async fn denied_viewer_cannot_inflate_counts() {
        let fx = Fixture::new().await;
        fx.add_upload(1, "a.pdf", 0).await;
        let handler = RecordViewHandler::new(fx.registry(), fx.viewers(), fx.tracker());

        let err = handler
            .handle(command(1, fx.user("mentor-1", ViewerRole::Mentor)))
            .await
            .unwrap_err();
        assert!(matches!(err, ContentError::Unauthorized));
        assert_eq!(fx.log.event_count().await, 0);
    }
}

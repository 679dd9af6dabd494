//! ListContentHandler - Query handler for a session's content listing.

use crate::application::{ContentRegistry, ViewerDirectory};
use crate::domain::access::authorize_session;
use crate::domain::content::{ContentError, ContentItemView};
use crate::domain::foundation::{AuthenticatedUser, SessionId};

/// Query to list the content of a session.
#[derive(Debug, Clone)]
pub struct ListContentQuery {
    pub session_id: SessionId,
    pub user: AuthenticatedUser,
}

/// Items in listing order, without locators.
pub type ListContentResult = Vec<ContentItemView>;

/// Handler for session content listings.
///
/// The same role and enrollment rules as delivery apply at session level:
/// a student who may not open the items does not see them listed either.
pub struct ListContentHandler {
    registry: ContentRegistry,
    viewers: ViewerDirectory,
}

impl ListContentHandler {
    pub fn new(registry: ContentRegistry, viewers: ViewerDirectory) -> Self {
        Self { registry, viewers }
    }

    pub async fn handle(&self, query: ListContentQuery) -> Result<ListContentResult, ContentError> {
        let course = self.viewers.require_course(query.session_id).await?;
        let viewer = self.viewers.viewer_for(&query.user).await?;

        if let Err(reason) = authorize_session(&viewer, Some(&course)) {
            tracing::info!(
                viewer_id = %viewer.id,
                session_id = %query.session_id,
                reason = ?reason,
                "Listing denied"
            );
            return Err(reason.into());
        }

        let items = self.registry.list_content(query.session_id).await?;
        Ok(items.iter().map(ContentItemView::from).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::handlers::test_fixtures::Fixture;
    use crate::domain::content::ContentKind;
    use crate::domain::foundation::ViewerRole;

    #[tokio::test]
    async fn enrolled_student_sees_ordered_listing() {
        let fx = Fixture::new().await;
        fx.add_upload(1, "a.pdf", 20).await;
        fx.add_link(2, ContentKind::MeetingLink, "https://meet.example.com/r", 10).await;

        let handler = ListContentHandler::new(fx.registry(), fx.viewers());
        let listing = handler
            .handle(ListContentQuery {
                session_id: fx.session,
                user: fx.enrolled_student().await,
            })
            .await
            .unwrap();

        let ids: Vec<i64> = listing.iter().map(|v| v.id.as_i64()).collect();
        assert_eq!(ids, vec![2, 1]);
    }

    #[tokio::test]
    async fn unenrolled_student_is_denied() {
        let fx = Fixture::new().await;
        fx.add_upload(1, "a.pdf", 0).await;

        let handler = ListContentHandler::new(fx.registry(), fx.viewers());
        let err = handler
            .handle(ListContentQuery {
                session_id: fx.session,
                user: fx.user("outsider", ViewerRole::Student),
            })
            .await
            .unwrap_err();
        assert!(matches!(err, ContentError::NotEnrolled));
    }

    #[tokio::test]
    async fn absent_session_is_not_found_for_every_role() {
        let fx = Fixture::new().await;
        let handler = ListContentHandler::new(fx.registry(), fx.viewers());

        for user in [
            fx.user("admin-1", ViewerRole::Admin),
            fx.user("p-1", ViewerRole::Presenter),
            fx.enrolled_student().await,
        ] {
            let err = handler
                .handle(ListContentQuery {
                    session_id: SessionId::from_i64(999_999),
                    user,
                })
                .await
                .unwrap_err();
            assert!(matches!(err, ContentError::NotFound(_)), "got {:?}", err);
        }
    }

    #[tokio::test]
    async fn presenter_lists_without_enrollment() {
        let fx = Fixture::new().await;
        fx.add_upload(1, "a.pdf", 0).await;

        let handler = ListContentHandler::new(fx.registry(), fx.viewers());
        let listing = handler
            .handle(ListContentQuery {
                session_id: fx.session,
                user: fx.user("p-1", ViewerRole::Presenter),
            })
            .await
            .unwrap();
        assert_eq!(listing.len(), 1);
    }
}

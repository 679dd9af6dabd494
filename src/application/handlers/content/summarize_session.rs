//! SummarizeSessionHandler - Query handler for a staff inventory of a session.

use serde::Serialize;
use std::collections::HashMap;

use crate::application::{ContentRegistry, ViewerDirectory};
use crate::domain::access::can_view_analytics;
use crate::domain::content::{ContentError, ContentKind};
use crate::domain::foundation::{AuthenticatedUser, SessionId};

#[derive(Debug, Clone)]
pub struct SummarizeSessionQuery {
    pub session_id: SessionId,
    pub user: AuthenticatedUser,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct KindCount {
    pub kind: ContentKind,
    pub count: u64,
}

/// Counts per kind plus the stored footprint of uploads.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SessionInventory {
    pub session_id: SessionId,
    pub total_items: u64,
    /// Every kind, in declaration order, including zero counts.
    pub by_kind: Vec<KindCount>,
    pub uploaded_bytes: u64,
}

pub struct SummarizeSessionHandler {
    registry: ContentRegistry,
    viewers: ViewerDirectory,
}

impl SummarizeSessionHandler {
    pub fn new(registry: ContentRegistry, viewers: ViewerDirectory) -> Self {
        Self { registry, viewers }
    }

    pub async fn handle(&self, query: SummarizeSessionQuery) -> Result<SessionInventory, ContentError> {
        if !can_view_analytics(query.user.role) {
            return Err(ContentError::Unauthorized);
        }
        self.viewers.require_course(query.session_id).await?;

        let items = self.registry.list_content(query.session_id).await?;

        let mut counts: HashMap<ContentKind, u64> = HashMap::new();
        let mut uploaded_bytes = 0u64;
        for item in &items {
            *counts.entry(item.kind).or_default() += 1;
            if let Some(upload) = &item.upload {
                uploaded_bytes += upload.size_bytes;
            }
        }

        let by_kind = ContentKind::all()
            .iter()
            .map(|kind| KindCount {
                kind: *kind,
                count: counts.get(kind).copied().unwrap_or(0),
            })
            .collect();

        Ok(SessionInventory {
            session_id: query.session_id,
            total_items: items.len() as u64,
            by_kind,
            uploaded_bytes,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::handlers::test_fixtures::Fixture;
    use crate::domain::foundation::ViewerRole;

    #[tokio::test]
    async fn counts_every_kind_and_sums_upload_sizes() {
        let fx = Fixture::new().await;
        fx.add_upload(1, "a.pdf", 0).await;
        fx.add_upload(2, "b.mp4", 1).await;
        fx.add_link(3, ContentKind::MeetingLink, "https://meet.example.com/r", 2).await;

        let inventory = SummarizeSessionHandler::new(fx.registry(), fx.viewers())
            .handle(SummarizeSessionQuery {
                session_id: fx.session,
                user: fx.user("m-1", ViewerRole::Manager),
            })
            .await
            .unwrap();

        assert_eq!(inventory.total_items, 3);
        assert_eq!(inventory.uploaded_bytes, 2048);
        assert_eq!(inventory.by_kind.len(), ContentKind::all().len());
        let count_of = |kind| {
            inventory
                .by_kind
                .iter()
                .find(|c| c.kind == kind)
                .map(|c| c.count)
                .unwrap()
        };
        assert_eq!(count_of(ContentKind::UploadedResource), 2);
        assert_eq!(count_of(ContentKind::MeetingLink), 1);
        assert_eq!(count_of(ContentKind::Video), 0);
    }

    #[tokio::test]
    async fn students_cannot_summarize() {
        let fx = Fixture::new().await;
        let err = SummarizeSessionHandler::new(fx.registry(), fx.viewers())
            .handle(SummarizeSessionQuery {
                session_id: fx.session,
                user: fx.enrolled_student().await,
            })
            .await
            .unwrap_err();
        assert!(matches!(err, ContentError::Unauthorized));
    }

    #[tokio::test]
    async fn absent_session_is_not_found() {
        let fx = Fixture::new().await;
        let err = SummarizeSessionHandler::new(fx.registry(), fx.viewers())
            .handle(SummarizeSessionQuery {
                session_id: SessionId::from_i64(42),
                user: fx.user("a-1", ViewerRole::Admin),
            })
            .await
            .unwrap_err();
        assert!(matches!(err, ContentError::NotFound(_)));
    }
}

//! Content Registry - unified, read-only view over both content stores.

use futures::try_join;
use std::sync::Arc;

use crate::domain::content::{sort_for_listing, ContentError, ContentItem, ContentRef, ContentSource};
use crate::domain::foundation::{ContentItemId, SessionId};
use crate::ports::{SessionContentStore, UploadedResourceStore};

/// Normalizes uploaded resources and lightweight content records into one
/// ordered listing per session.
#[derive(Clone)]
pub struct ContentRegistry {
    uploads: Arc<dyn UploadedResourceStore>,
    contents: Arc<dyn SessionContentStore>,
}

impl ContentRegistry {
    pub fn new(
        uploads: Arc<dyn UploadedResourceStore>,
        contents: Arc<dyn SessionContentStore>,
    ) -> Self {
        Self { uploads, contents }
    }

    /// All items of a session ordered by `(created_at, id)`.
    pub async fn list_content(&self, session: SessionId) -> Result<Vec<ContentItem>, ContentError> {
        let (uploads, contents) = try_join!(
            self.uploads.list_by_session(session),
            self.contents.list_by_session(session),
        )?;

        let mut items: Vec<ContentItem> = uploads
            .into_iter()
            .map(ContentItem::from)
            .chain(contents.into_iter().map(ContentItem::from))
            .collect();
        sort_for_listing(&mut items);
        Ok(items)
    }

    /// Looks an item up by reference.
    ///
    /// A bare id is checked against both stores. If both hold it the
    /// registry refuses to pick one.
    pub async fn get_content(&self, reference: ContentRef) -> Result<ContentItem, ContentError> {
        let id = reference.id;
        match reference.source {
            Some(ContentSource::UploadedResource) => self
                .uploads
                .find_by_id(id)
                .await?
                .map(ContentItem::from)
                .ok_or_else(|| ContentError::content_not_found(id)),
            Some(ContentSource::SessionContent) => self
                .contents
                .find_by_id(id)
                .await?
                .map(ContentItem::from)
                .ok_or_else(|| ContentError::content_not_found(id)),
            None => self.get_unqualified(id).await,
        }
    }

    async fn get_unqualified(&self, id: ContentItemId) -> Result<ContentItem, ContentError> {
        let (upload, content) = try_join!(self.uploads.find_by_id(id), self.contents.find_by_id(id))?;
        match (upload, content) {
            (Some(_), Some(_)) => {
                tracing::error!(
                    content_item_id = %id,
                    "Content id present in both uploaded resources and session content"
                );
                Err(ContentError::AmbiguousContentIdentifier(id))
            }
            (Some(upload), None) => Ok(upload.into()),
            (None, Some(content)) => Ok(content.into()),
            (None, None) => Err(ContentError::content_not_found(id)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::{InMemorySessionContentStore, InMemoryUploadedResourceStore};
    use crate::domain::content::test_support::{lightweight, uploaded};
    use crate::domain::content::ContentKind;
    use crate::domain::foundation::{DomainError, ErrorCode};
    use crate::domain::content::LightweightContentRecord;
    use async_trait::async_trait;

    struct FailingContentStore;

    #[async_trait]
    impl SessionContentStore for FailingContentStore {
        async fn find_by_id(
            &self,
            _id: ContentItemId,
        ) -> Result<Option<LightweightContentRecord>, DomainError> {
            Err(DomainError::new(ErrorCode::DatabaseError, "Simulated read failure"))
        }

        async fn list_by_session(
            &self,
            _session: SessionId,
        ) -> Result<Vec<LightweightContentRecord>, DomainError> {
            Err(DomainError::new(ErrorCode::DatabaseError, "Simulated read failure"))
        }
    }

    fn setup() -> (ContentRegistry, InMemoryUploadedResourceStore, InMemorySessionContentStore) {
        let uploads = InMemoryUploadedResourceStore::new();
        let contents = InMemorySessionContentStore::new();
        let registry = ContentRegistry::new(Arc::new(uploads.clone()), Arc::new(contents.clone()));
        (registry, uploads, contents)
    }

    #[tokio::test]
    async fn lists_both_kinds_in_creation_order() {
        let (registry, uploads, contents) = setup();
        uploads.insert(uploaded(4, 1, "b.pdf", 20)).await;
        uploads.insert(uploaded(1, 1, "a.pdf", 10)).await;
        contents
            .insert(lightweight(2, 1, ContentKind::ExternalLink, "https://x.test/a", 10))
            .await;
        contents
            .insert(lightweight(3, 1, ContentKind::MeetingLink, "https://m.test/r", 5))
            .await;
        contents
            .insert(lightweight(9, 2, ContentKind::Video, "v.mp4", 0))
            .await;

        let items = registry.list_content(SessionId::from_i64(1)).await.unwrap();
        let ids: Vec<i64> = items.iter().map(|i| i.id.as_i64()).collect();
        assert_eq!(ids, vec![3, 1, 2, 4]);
    }

    #[tokio::test]
    async fn empty_session_lists_nothing() {
        let (registry, _, _) = setup();
        assert!(registry.list_content(SessionId::from_i64(5)).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn get_content_finds_either_store() {
        let (registry, uploads, contents) = setup();
        uploads.insert(uploaded(1, 1, "a.pdf", 0)).await;
        contents
            .insert(lightweight(2, 1, ContentKind::Material, "m.docx", 0))
            .await;

        let item = registry
            .get_content(ContentRef::any(ContentItemId::from_i64(2)))
            .await
            .unwrap();
        assert_eq!(item.kind, ContentKind::Material);
    }

    #[tokio::test]
    async fn missing_id_is_not_found() {
        let (registry, _, _) = setup();
        let err = registry
            .get_content(ContentRef::any(ContentItemId::from_i64(77)))
            .await
            .unwrap_err();
        assert!(matches!(err, ContentError::NotFound(_)));
    }

    #[tokio::test]
    async fn id_in_both_stores_is_ambiguous() {
        let (registry, uploads, contents) = setup();
        uploads.insert(uploaded(5, 1, "a.pdf", 0)).await;
        contents
            .insert(lightweight(5, 1, ContentKind::ExternalLink, "https://x.test", 0))
            .await;

        let err = registry
            .get_content(ContentRef::any(ContentItemId::from_i64(5)))
            .await
            .unwrap_err();
        assert!(matches!(err, ContentError::AmbiguousContentIdentifier(id) if id.as_i64() == 5));
    }

    #[tokio::test]
    async fn prefix_selects_one_store_even_when_ambiguous() {
        let (registry, uploads, contents) = setup();
        uploads.insert(uploaded(5, 1, "a.pdf", 0)).await;
        contents
            .insert(lightweight(5, 1, ContentKind::ExternalLink, "https://x.test", 0))
            .await;

        let item = registry.get_content("content_5".parse().unwrap()).await.unwrap();
        assert_eq!(item.kind, ContentKind::ExternalLink);
        let item = registry.get_content("resource_5".parse().unwrap()).await.unwrap();
        assert_eq!(item.kind, ContentKind::UploadedResource);
    }

    #[tokio::test]
    async fn prefix_does_not_fall_back_to_other_store() {
        let (registry, uploads, _) = setup();
        uploads.insert(uploaded(5, 1, "a.pdf", 0)).await;
        let err = registry.get_content("content_5".parse().unwrap()).await.unwrap_err();
        assert!(matches!(err, ContentError::NotFound(_)));
    }

    #[tokio::test]
    async fn store_failure_is_infrastructure_error() {
        let registry = ContentRegistry::new(
            Arc::new(InMemoryUploadedResourceStore::new()),
            Arc::new(FailingContentStore),
        );
        let err = registry.list_content(SessionId::from_i64(1)).await.unwrap_err();
        assert!(matches!(err, ContentError::Infrastructure(_)));
    }
}

//! In-memory record stores for uploaded resources and session content.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::content::{LightweightContentRecord, UploadedResource};
use crate::domain::foundation::{ContentItemId, DomainError, SessionId};
use crate::ports::{SessionContentStore, UploadedResourceStore};

/// In-memory uploaded-resource store
#[derive(Debug, Clone, Default)]
pub struct InMemoryUploadedResourceStore {
    records: Arc<RwLock<HashMap<ContentItemId, UploadedResource>>>,
}

impl InMemoryUploadedResourceStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn insert(&self, record: UploadedResource) {
        self.records.write().await.insert(record.id, record);
    }

    /// Hard-deletes a record, as the authoring collaborator would.
    pub async fn remove(&self, id: ContentItemId) -> Option<UploadedResource> {
        self.records.write().await.remove(&id)
    }
}

#[async_trait]
impl UploadedResourceStore for InMemoryUploadedResourceStore {
    async fn find_by_id(&self, id: ContentItemId) -> Result<Option<UploadedResource>, DomainError> {
        Ok(self.records.read().await.get(&id).cloned())
    }

    async fn list_by_session(&self, session: SessionId) -> Result<Vec<UploadedResource>, DomainError> {
        Ok(self
            .records
            .read()
            .await
            .values()
            .filter(|r| r.session_id == session)
            .cloned()
            .collect())
    }
}

/// In-memory session-content store
#[derive(Debug, Clone, Default)]
pub struct InMemorySessionContentStore {
    records: Arc<RwLock<HashMap<ContentItemId, LightweightContentRecord>>>,
}

impl InMemorySessionContentStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn insert(&self, record: LightweightContentRecord) {
        self.records.write().await.insert(record.id, record);
    }

    pub async fn remove(&self, id: ContentItemId) -> Option<LightweightContentRecord> {
        self.records.write().await.remove(&id)
    }
}

#[async_trait]
impl SessionContentStore for InMemorySessionContentStore {
    async fn find_by_id(
        &self,
        id: ContentItemId,
    ) -> Result<Option<LightweightContentRecord>, DomainError> {
        Ok(self.records.read().await.get(&id).cloned())
    }

    async fn list_by_session(
        &self,
        session: SessionId,
    ) -> Result<Vec<LightweightContentRecord>, DomainError> {
        Ok(self
            .records
            .read()
            .await
            .values()
            .filter(|r| r.session_id == session)
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::content::test_support::{lightweight, uploaded};
    use crate::domain::content::ContentKind;

    #[tokio::test]
    async fn uploaded_store_filters_by_session() {
        let store = InMemoryUploadedResourceStore::new();
        store.insert(uploaded(1, 10, "a.pdf", 0)).await;
        store.insert(uploaded(2, 11, "b.pdf", 0)).await;

        let listed = store.list_by_session(SessionId::from_i64(10)).await.unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].id, ContentItemId::from_i64(1));
    }

    #[tokio::test]
    async fn session_content_store_find_and_remove() {
        let store = InMemorySessionContentStore::new();
        store
            .insert(lightweight(5, 10, ContentKind::Video, "v.mp4", 0))
            .await;

        assert!(store.find_by_id(ContentItemId::from_i64(5)).await.unwrap().is_some());
        store.remove(ContentItemId::from_i64(5)).await;
        assert!(store.find_by_id(ContentItemId::from_i64(5)).await.unwrap().is_none());
    }
}

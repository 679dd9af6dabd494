//! Record store ports for the two kinds of content record.
//!
//! Uploaded resources and lightweight session content are kept in separate
//! stores and never merged at rest. Both are queried by primary key and by
//! parent session; the registry unions them at read time.

use async_trait::async_trait;

use crate::domain::content::{LightweightContentRecord, UploadedResource};
use crate::domain::foundation::{ContentItemId, DomainError, SessionId};

/// Read access to uploaded file records.
#[async_trait]
pub trait UploadedResourceStore: Send + Sync {
    async fn find_by_id(&self, id: ContentItemId) -> Result<Option<UploadedResource>, DomainError>;

    /// All uploaded resources of a session, in no particular order.
    async fn list_by_session(&self, session: SessionId) -> Result<Vec<UploadedResource>, DomainError>;
}

/// Read access to link, meeting, video and material records.
#[async_trait]
pub trait SessionContentStore: Send + Sync {
    async fn find_by_id(
        &self,
        id: ContentItemId,
    ) -> Result<Option<LightweightContentRecord>, DomainError>;

    /// All lightweight records of a session, in no particular order.
    async fn list_by_session(
        &self,
        session: SessionId,
    ) -> Result<Vec<LightweightContentRecord>, DomainError>;
}

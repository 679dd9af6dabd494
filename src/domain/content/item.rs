//! Content items and the backing records they are built from.

use serde::Serialize;

use super::{ContentKind, ContentSource, Locator, StorageKey};
use crate::domain::foundation::{ContentItemId, SessionId, Timestamp, ViewerId};

/// Uploaded file record as held by the uploaded-resource store.
#[derive(Debug, Clone, PartialEq)]
pub struct UploadedResource {
    pub id: ContentItemId,
    pub session_id: SessionId,
    pub title: String,
    pub description: Option<String>,
    pub storage_key: StorageKey,
    pub size_bytes: u64,
    pub mime_hint: Option<String>,
    pub uploaded_by: ViewerId,
    pub created_at: Timestamp,
}

/// Link, meeting, video or material record as held by the session-content store.
#[derive(Debug, Clone, PartialEq)]
pub struct LightweightContentRecord {
    pub id: ContentItemId,
    pub session_id: SessionId,
    pub kind: ContentKind,
    pub title: String,
    pub description: Option<String>,
    pub locator: String,
    pub created_by: ViewerId,
    pub created_at: Timestamp,
}

/// Facts only uploaded resources carry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadDetails {
    pub size_bytes: u64,
    pub mime_hint: Option<String>,
}

/// A content item in the unified listing.
#[derive(Debug, Clone, PartialEq)]
pub struct ContentItem {
    pub id: ContentItemId,
    pub session_id: SessionId,
    pub kind: ContentKind,
    pub title: String,
    pub description: Option<String>,
    pub locator: Locator,
    pub created_at: Timestamp,
    pub created_by: ViewerId,
    /// Present only for `UPLOADED_RESOURCE` items.
    pub upload: Option<UploadDetails>,
}

impl ContentItem {
    /// The store this item was read from.
    pub fn source(&self) -> ContentSource {
        self.kind.source()
    }

    /// Key the listing is ordered by.
    pub fn listing_key(&self) -> (Timestamp, ContentItemId) {
        (self.created_at, self.id)
    }

    /// Stored MIME hint, if the item has one.
    pub fn mime_hint(&self) -> Option<&str> {
        self.upload
            .as_ref()
            .and_then(|u| u.mime_hint.as_deref())
            .filter(|hint| !hint.trim().is_empty())
    }
}

impl From<UploadedResource> for ContentItem {
    fn from(record: UploadedResource) -> Self {
        Self {
            id: record.id,
            session_id: record.session_id,
            kind: ContentKind::UploadedResource,
            title: record.title,
            description: record.description,
            locator: Locator::Storage(record.storage_key),
            created_at: record.created_at,
            created_by: record.uploaded_by,
            upload: Some(UploadDetails {
                size_bytes: record.size_bytes,
                mime_hint: record.mime_hint,
            }),
        }
    }
}

impl From<LightweightContentRecord> for ContentItem {
    fn from(record: LightweightContentRecord) -> Self {
        Self {
            id: record.id,
            session_id: record.session_id,
            kind: record.kind,
            title: record.title,
            description: record.description,
            locator: Locator::from_stored(record.kind, record.locator),
            created_at: record.created_at,
            created_by: record.created_by,
            upload: None,
        }
    }
}

/// Orders items by `(created_at, id)` ascending.
pub fn sort_for_listing(items: &mut [ContentItem]) {
    items.sort_by_key(ContentItem::listing_key);
}

/// What a viewer sees in a listing. Never exposes the locator.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ContentItemView {
    pub id: ContentItemId,
    pub kind: ContentKind,
    pub title: String,
    pub description: Option<String>,
    pub created_at: Timestamp,
}

impl From<&ContentItem> for ContentItemView {
    fn from(item: &ContentItem) -> Self {
        Self {
            id: item.id,
            kind: item.kind,
            title: item.title.clone(),
            description: item.description.clone(),
            created_at: item.created_at,
        }
    }
}

//! View events.

use serde::Serialize;

use crate::domain::content::ContentKind;
use crate::domain::foundation::{ContentItemId, Timestamp, ViewerId};

/// Audit context captured from the request that produced a view.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ViewClient {
    pub address: Option<String>,
    pub user_agent: Option<String>,
}

impl ViewClient {
    pub fn new(address: Option<String>, user_agent: Option<String>) -> Self {
        Self {
            address,
            user_agent,
        }
    }
}

/// One view of one item by one viewer. Appended once, never updated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ViewEvent {
    pub content_item_id: ContentItemId,
    pub viewer_id: ViewerId,
    pub viewed_at: Timestamp,
    /// Kind of the item when it was viewed.
    pub content_kind: Option<ContentKind>,
    pub client: ViewClient,
}

impl ViewEvent {
    pub fn new(content_item_id: ContentItemId, viewer_id: ViewerId, viewed_at: Timestamp) -> Self {
        Self {
            content_item_id,
            viewer_id,
            viewed_at,
            content_kind: None,
            client: ViewClient::default(),
        }
    }

    pub fn with_kind(mut self, kind: ContentKind) -> Self {
        self.content_kind = Some(kind);
        self
    }

    pub fn with_client(mut self, client: ViewClient) -> Self {
        self.client = client;
        self
    }
}

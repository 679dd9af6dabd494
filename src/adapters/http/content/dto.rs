//! HTTP DTOs for content and view endpoints.
//!
//! These types decouple the HTTP API from domain types, allowing independent evolution.

use serde::{Deserialize, Serialize};

use crate::application::{DetachContentResult, RecordViewResult, SessionInventory};
use crate::domain::content::{ContentItemView, ContentKind};
use crate::domain::delivery::LinkTarget;
use crate::domain::views::RecordOutcome;

// ════════════════════════════════════════════════════════════════════════════
// Request DTOs
// ════════════════════════════════════════════════════════════════════════════

/// Query parameters for view trends.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TrendsQuery {
    #[serde(default)]
    pub days: Option<u32>,
}

/// Query parameters for the platform top list.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TopContentQuery {
    #[serde(default)]
    pub limit: Option<u32>,
}

// ════════════════════════════════════════════════════════════════════════════
// Response DTOs
// ════════════════════════════════════════════════════════════════════════════

/// One entry of a session listing. Never carries the locator.
#[derive(Debug, Clone, Serialize)]
pub struct ContentItemResponse {
    pub id: i64,
    pub kind: ContentKind,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub created_at: String,
}

impl From<ContentItemView> for ContentItemResponse {
    fn from(view: ContentItemView) -> Self {
        Self {
            id: view.id.as_i64(),
            kind: view.kind,
            title: view.title,
            description: view.description,
            created_at: view.created_at.to_rfc3339(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ContentListResponse {
    pub session_id: i64,
    pub items: Vec<ContentItemResponse>,
}

/// Link card returned for external links.
#[derive(Debug, Clone, Serialize)]
pub struct LinkResponse {
    pub url: String,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl From<LinkTarget> for LinkResponse {
    fn from(target: LinkTarget) -> Self {
        Self {
            url: target.url,
            title: target.title,
            description: target.description,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct RecordViewResponse {
    pub content_item_id: i64,
    /// False when this viewer had already been counted.
    pub recorded: bool,
}

impl From<RecordViewResult> for RecordViewResponse {
    fn from(result: RecordViewResult) -> Self {
        Self {
            content_item_id: result.content_item_id.as_i64(),
            recorded: result.outcome == RecordOutcome::Recorded,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct DetachResponse {
    pub content_item_id: i64,
    pub orphaned_events: u64,
}

impl From<DetachContentResult> for DetachResponse {
    fn from(result: DetachContentResult) -> Self {
        Self {
            content_item_id: result.content_item_id.as_i64(),
            orphaned_events: result.orphaned_events,
        }
    }
}

pub type InventoryResponse = SessionInventory;

/// Standard error response.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl ErrorResponse {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
        }
    }

    pub fn with_details(mut self, details: serde_json::Value) -> Self {
        self.details = Some(details);
        self
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new("BAD_REQUEST", message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new("INTERNAL_ERROR", message)
    }
}

//! Access policy evaluation.
//!
//! `authorize` is a pure function of the viewer's role, their enrollment
//! set, the item's kind and its locator. Rules are checked in order and the
//! first match wins:
//!
//! 1. Admin, Manager or Presenter: allowed as owner view, no enrollment check.
//! 2. Student: allowed only when enrolled in the course owning the session.
//! 3. Link kinds deliver by redirect.
//! 4. Uploaded resources stream; video and material follow their locator.
//! 5. Anyone else is denied.

use serde::Serialize;

use super::Viewer;
use crate::domain::content::{ContentError, ContentItem, ContentKind};
use crate::domain::foundation::{CourseId, ViewerRole};

/// How an allowed item reaches the viewer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DeliveryMode {
    /// Bytes streamed from content storage.
    Stream,
    /// The client is sent to an external URL.
    Redirect,
    /// Staff access; dispatched like `Stream`/`Redirect` but not a learner view.
    OwnerView,
}

/// Why access was granted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AllowReason {
    Staff,
    Enrolled,
}

/// Why access was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DenyReason {
    NotEnrolled,
    Unauthorized,
}

impl From<DenyReason> for ContentError {
    fn from(reason: DenyReason) -> Self {
        match reason {
            DenyReason::NotEnrolled => ContentError::NotEnrolled,
            DenyReason::Unauthorized => ContentError::Unauthorized,
        }
    }
}

/// Request-scoped access decision. Never persisted or cached.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessGrant {
    Allow { mode: DeliveryMode, reason: AllowReason },
    Deny(DenyReason),
}

impl AccessGrant {
    pub fn is_allowed(&self) -> bool {
        matches!(self, AccessGrant::Allow { .. })
    }

    /// Converts a denial into the matching error.
    pub fn into_result(self) -> Result<(DeliveryMode, AllowReason), ContentError> {
        match self {
            AccessGrant::Allow { mode, reason } => Ok((mode, reason)),
            AccessGrant::Deny(reason) => Err(reason.into()),
        }
    }
}

/// Delivery channel an item's kind and locator call for.
pub fn channel_for(item: &ContentItem) -> DeliveryMode {
    match item.kind {
        ContentKind::ExternalLink | ContentKind::MeetingLink => DeliveryMode::Redirect,
        ContentKind::UploadedResource => DeliveryMode::Stream,
        ContentKind::Video | ContentKind::Material => {
            if item.locator.is_external() {
                DeliveryMode::Redirect
            } else {
                DeliveryMode::Stream
            }
        }
    }
}

/// Decides whether `viewer` may consume `item`.
///
/// `course` is the course owning the item's session, if one is recorded.
pub fn authorize(viewer: &Viewer, item: &ContentItem, course: Option<&CourseId>) -> AccessGrant {
    match authorize_session(viewer, course) {
        Ok(AllowReason::Staff) => AccessGrant::Allow {
            mode: DeliveryMode::OwnerView,
            reason: AllowReason::Staff,
        },
        Ok(AllowReason::Enrolled) => AccessGrant::Allow {
            mode: channel_for(item),
            reason: AllowReason::Enrolled,
        },
        Err(reason) => AccessGrant::Deny(reason),
    }
}

/// Session-level check used for listings: the same role and enrollment
/// rules without an item to dispatch on.
pub fn authorize_session(viewer: &Viewer, course: Option<&CourseId>) -> Result<AllowReason, DenyReason> {
    match viewer.role {
        ViewerRole::Admin | ViewerRole::Manager | ViewerRole::Presenter => Ok(AllowReason::Staff),
        ViewerRole::Student => match course {
            Some(course) if viewer.is_enrolled_in(course) => Ok(AllowReason::Enrolled),
            _ => Err(DenyReason::NotEnrolled),
        },
        ViewerRole::Mentor => Err(DenyReason::Unauthorized),
    }
}

/// Whether a role may read view analytics.
pub fn can_view_analytics(role: ViewerRole) -> bool {
    role.is_staff()
}

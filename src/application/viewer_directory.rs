//! Builds the per-request `Viewer` from the authenticated user.

use std::sync::Arc;

use crate::domain::access::Viewer;
use crate::domain::content::ContentError;
use crate::domain::foundation::{AuthenticatedUser, CourseId, SessionId, ViewerRole};
use crate::ports::{EnrollmentReader, SessionCourseLookup};

/// Reads enrollment and session ownership for access decisions.
///
/// Nothing is cached: every call goes to the collaborator, so a revoked
/// enrollment is honored on the next request.
#[derive(Clone)]
pub struct ViewerDirectory {
    enrollments: Arc<dyn EnrollmentReader>,
    sessions: Arc<dyn SessionCourseLookup>,
}

impl ViewerDirectory {
    pub fn new(
        enrollments: Arc<dyn EnrollmentReader>,
        sessions: Arc<dyn SessionCourseLookup>,
    ) -> Self {
        Self {
            enrollments,
            sessions,
        }
    }

    /// The viewer with their current enrollment set. Only students are
    /// gated on enrollment, so other roles skip the lookup.
    pub async fn viewer_for(&self, user: &AuthenticatedUser) -> Result<Viewer, ContentError> {
        let courses = match user.role {
            ViewerRole::Student => self.enrollments.enrolled_courses(&user.id).await?,
            _ => Vec::new(),
        };
        Ok(Viewer::from_user(user, courses))
    }

    pub async fn course_of(&self, session: SessionId) -> Result<Option<CourseId>, ContentError> {
        Ok(self.sessions.course_for_session(session).await?)
    }

    /// The owning course, or `NotFound` when no such session exists.
    pub async fn require_course(&self, session: SessionId) -> Result<CourseId, ContentError> {
        self.course_of(session)
            .await?
            .ok_or_else(|| ContentError::session_not_found(session))
    }
}

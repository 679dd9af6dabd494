//! Session to course lookup port.

use async_trait::async_trait;

use crate::domain::foundation::{CourseId, DomainError, SessionId};

/// Resolves the course that owns a learning session.
#[async_trait]
pub trait SessionCourseLookup: Send + Sync {
    /// Returns `None` if the session is unknown.
    async fn course_for_session(&self, session: SessionId) -> Result<Option<CourseId>, DomainError>;
}

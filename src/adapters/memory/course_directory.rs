//! In-memory course directory: session ownership and enrollments.

use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::foundation::{CourseId, DomainError, SessionId, ViewerId};
use crate::ports::{EnrollmentReader, SessionCourseLookup};

/// Stands in for the course-management collaborator in tests and development.
#[derive(Debug, Clone, Default)]
pub struct InMemoryCourseDirectory {
    sessions: Arc<RwLock<HashMap<SessionId, CourseId>>>,
    enrollments: Arc<RwLock<HashMap<ViewerId, HashSet<CourseId>>>>,
}

impl InMemoryCourseDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn assign_session(&self, session: SessionId, course: CourseId) {
        self.sessions.write().await.insert(session, course);
    }

    pub async fn enroll(&self, viewer: &ViewerId, course: CourseId) {
        self.enrollments
            .write()
            .await
            .entry(viewer.clone())
            .or_default()
            .insert(course);
    }

    pub async fn revoke(&self, viewer: &ViewerId, course: CourseId) {
        if let Some(courses) = self.enrollments.write().await.get_mut(viewer) {
            courses.remove(&course);
        }
    }
}

#[async_trait]
impl SessionCourseLookup for InMemoryCourseDirectory {
    async fn course_for_session(&self, session: SessionId) -> Result<Option<CourseId>, DomainError> {
        Ok(self.sessions.read().await.get(&session).copied())
    }
}

#[async_trait]
impl EnrollmentReader for InMemoryCourseDirectory {
    async fn enrolled_courses(&self, viewer: &ViewerId) -> Result<Vec<CourseId>, DomainError> {
        let mut courses: Vec<CourseId> = self
            .enrollments
            .read()
            .await
            .get(viewer)
            .map(|set| set.iter().copied().collect())
            .unwrap_or_default();
        courses.sort();
        Ok(courses)
    }
}

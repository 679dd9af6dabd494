//! PostgreSQL reads of session placement and enrollment.
//!
//! Both tables belong to the course collaborator; this adapter only reads
//! them, once per request, so revocations apply immediately.

use async_trait::async_trait;
use sqlx::PgPool;

use crate::domain::foundation::{CourseId, DomainError, SessionId, ViewerId};
use crate::ports::{EnrollmentReader, SessionCourseLookup};

pub struct PostgresCourseDirectory {
    pool: PgPool,
}

impl PostgresCourseDirectory {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SessionCourseLookup for PostgresCourseDirectory {
    async fn course_for_session(&self, session: SessionId) -> Result<Option<CourseId>, DomainError> {
        let course: Option<i64> =
            sqlx::query_scalar("SELECT course_id FROM course_sessions WHERE id = $1")
                .bind(session.as_i64())
                .fetch_optional(&self.pool)
                .await
                .map_err(|e| DomainError::database("Failed to look up session course", e))?;

        Ok(course.map(CourseId::from_i64))
    }
}

#[async_trait]
impl EnrollmentReader for PostgresCourseDirectory {
    async fn enrolled_courses(&self, viewer: &ViewerId) -> Result<Vec<CourseId>, DomainError> {
        let courses: Vec<i64> = sqlx::query_scalar(
            "SELECT course_id FROM enrollments WHERE viewer_id = $1 ORDER BY course_id",
        )
        .bind(viewer.as_str())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DomainError::database("Failed to read enrollments", e))?;

        Ok(courses.into_iter().map(CourseId::from_i64).collect())
    }
}

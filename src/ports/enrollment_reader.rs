//! Enrollment lookup port.
//!
//! Enrollment is owned by the course-management collaborator. It is read on
//! every delivery request and never cached here, so a revoked enrollment
//! takes effect on the viewer's next request.

use async_trait::async_trait;

use crate::domain::foundation::{CourseId, DomainError, ViewerId};

/// Reads the set of courses a viewer is enrolled in.
#[async_trait]
pub trait EnrollmentReader: Send + Sync {
    /// Returns the courses `viewer` is currently enrolled in.
    ///
    /// Unknown viewers have no enrollments; that is not an error.
    async fn enrolled_courses(&self, viewer: &ViewerId) -> Result<Vec<CourseId>, DomainError>;
}

//! The viewer an access decision is made for.

use std::collections::HashSet;

use crate::domain::foundation::{AuthenticatedUser, CourseId, ViewerId, ViewerRole};

/// Authenticated principal plus the enrollment set read for this request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Viewer {
    pub id: ViewerId,
    pub role: ViewerRole,
    pub enrolled_courses: HashSet<CourseId>,
}

impl Viewer {
    pub fn new(
        id: ViewerId,
        role: ViewerRole,
        enrolled_courses: impl IntoIterator<Item = CourseId>,
    ) -> Self {
        Self {
            id,
            role,
            enrolled_courses: enrolled_courses.into_iter().collect(),
        }
    }

    /// Builds a viewer from an authenticated user and freshly read enrollments.
    pub fn from_user(user: &AuthenticatedUser, enrolled_courses: Vec<CourseId>) -> Self {
        Self::new(user.id.clone(), user.role, enrolled_courses)
    }

    pub fn is_enrolled_in(&self, course: &CourseId) -> bool {
        self.enrolled_courses.contains(course)
    }
}

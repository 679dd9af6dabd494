//! Shared in-memory wiring for handler tests.

use std::sync::Arc;

use crate::adapters::memory::{
    InMemoryCourseDirectory, InMemorySessionContentStore, InMemoryUploadedResourceStore,
    InMemoryViewEventLog,
};
use crate::adapters::storage::InMemoryContentStorage;
use crate::application::{ContentRegistry, DeliveryResolver, ViewTracker, ViewerDirectory};
use crate::domain::content::test_support::{lightweight, uploaded};
use crate::domain::content::ContentKind;
use crate::domain::foundation::{AuthenticatedUser, CourseId, SessionId, ViewerId, ViewerRole};
use crate::domain::views::ViewWindow;

pub struct Fixture {
    pub uploads: InMemoryUploadedResourceStore,
    pub contents: InMemorySessionContentStore,
    pub directory: InMemoryCourseDirectory,
    pub storage: InMemoryContentStorage,
    pub log: InMemoryViewEventLog,
    pub session: SessionId,
    pub course: CourseId,
}

impl Fixture {
    /// Session 1 owned by course 100.
    pub async fn new() -> Self {
        let fixture = Self {
            uploads: InMemoryUploadedResourceStore::new(),
            contents: InMemorySessionContentStore::new(),
            directory: InMemoryCourseDirectory::new(),
            storage: InMemoryContentStorage::new(),
            log: InMemoryViewEventLog::new(),
            session: SessionId::from_i64(1),
            course: CourseId::from_i64(100),
        };
        fixture
            .directory
            .assign_session(fixture.session, fixture.course)
            .await;
        fixture
    }

    pub fn registry(&self) -> ContentRegistry {
        ContentRegistry::new(Arc::new(self.uploads.clone()), Arc::new(self.contents.clone()))
    }

    pub fn viewers(&self) -> ViewerDirectory {
        ViewerDirectory::new(Arc::new(self.directory.clone()), Arc::new(self.directory.clone()))
    }

    pub fn resolver(&self) -> DeliveryResolver {
        DeliveryResolver::new(Arc::new(self.storage.clone()))
    }

    pub fn tracker(&self) -> ViewTracker {
        ViewTracker::new(Arc::new(self.log.clone()), ViewWindow::Permanent)
    }

    pub fn user(&self, id: &str, role: ViewerRole) -> AuthenticatedUser {
        AuthenticatedUser::new(ViewerId::new(id).unwrap(), role, None)
    }

    pub async fn enrolled_student(&self) -> AuthenticatedUser {
        let user = self.user("student-1", ViewerRole::Student);
        self.directory.enroll(&user.id, self.course).await;
        user
    }

    /// Uploaded resource with its bytes in storage.
    pub async fn add_upload(&self, id: i64, key: &str, created: i64) {
        self.uploads
            .insert(uploaded(id, self.session.as_i64(), key, created))
            .await;
        self.storage
            .put(key, format!("bytes of {}", key).into_bytes(), None)
            .await;
    }

    pub async fn add_link(&self, id: i64, kind: ContentKind, locator: &str, created: i64) {
        self.contents
            .insert(lightweight(id, self.session.as_i64(), kind, locator, created))
            .await;
    }
}

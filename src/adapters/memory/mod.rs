//! In-memory adapters for the record store, course directory and view log.
//!
//! Used by tests and by local development without a database.

mod content_store;
mod course_directory;
mod view_event_log;

pub use content_store::{InMemorySessionContentStore, InMemoryUploadedResourceStore};
pub use course_directory::InMemoryCourseDirectory;
pub use view_event_log::InMemoryViewEventLog;

//! PostgreSQL adapters - Database implementations of the read and view-log ports.
//!
//! - `PostgresUploadedResourceStore` / `PostgresSessionContentStore` - The two record stores
//! - `PostgresCourseDirectory` - Session placement and enrollment reads
//! - `PostgresViewEventLog` - Append-only view log with maintained counters

mod content_stores;
mod course_directory;
mod view_event_log;

pub use content_stores::{PostgresSessionContentStore, PostgresUploadedResourceStore};
pub use course_directory::PostgresCourseDirectory;
pub use view_event_log::PostgresViewEventLog;

//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! ## Identity Ports
//!
//! - `SessionValidator` - Token to viewer id and role
//! - `EnrollmentReader` - Viewer to enrolled course ids
//! - `SessionCourseLookup` - Session to owning course
//!
//! ## Content Ports
//!
//! - `UploadedResourceStore` / `SessionContentStore` - Backing record stores
//! - `ContentStorage` - Stored bytes for streaming
//!
//! ## View Ports
//!
//! - `ViewEventLog` - Append-only view log with maintained counters

mod content_storage;
mod content_store;
mod enrollment_reader;
mod session_course_lookup;
mod session_validator;
mod view_event_log;

pub use content_storage::{BoxedReader, ByteSource, ContentStorage, StorageError, StorageStat};
pub use content_store::{SessionContentStore, UploadedResourceStore};
pub use enrollment_reader::EnrollmentReader;
pub use session_course_lookup::SessionCourseLookup;
pub use session_validator::SessionValidator;
pub use view_event_log::ViewEventLog;

//! Storage Adapters
//!
//! Implementations of the ContentStorage port.
//!
//! ## Available Adapters
//!
//! - **LocalContentStorage** - Reads objects from a local directory
//! - **InMemoryContentStorage** - Holds objects in memory (testing/development)
//!
//! ## Usage
//!
//! ```ignore
//! use adapters::storage::{InMemoryContentStorage, LocalContentStorage};
//!
//! // Production: directory-backed storage
//! let storage = LocalContentStorage::new("./data/content", Duration::from_secs(10));
//!
//! // Testing: in-memory storage
//! let storage = InMemoryContentStorage::new();
//! ```

mod in_memory_content_storage;
mod local_content_storage;

pub use in_memory_content_storage::InMemoryContentStorage;
pub use local_content_storage::LocalContentStorage;

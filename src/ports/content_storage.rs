//! Content storage port.
//!
//! Abstracts where uploaded bytes live. The shipped adapters read from a
//! local directory or from memory; an object store would implement the
//! same trait.
//!
//! # Contract
//!
//! - `stat` and `open_for_read` return `StorageError::NotFound` when the
//!   object is missing, so callers can report it distinctly.
//! - Reads are bounded by the adapter's own timeout and never retried.
//! - The returned reader owns its handle; dropping it releases the object.

use async_trait::async_trait;
use std::fmt;
use std::pin::Pin;
use tokio::io::AsyncRead;

use crate::domain::content::StorageKey;
use crate::domain::delivery::ByteRange;

/// Size and type information for a stored object.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageStat {
    pub size: u64,
    pub mime_hint: Option<String>,
}

/// Boxed async reader over object bytes.
pub type BoxedReader = Pin<Box<dyn AsyncRead + Send>>;

/// An open read over a stored object, limited to the requested range.
pub struct ByteSource {
    pub reader: BoxedReader,
    /// Bytes the reader will yield.
    pub length: u64,
}

impl fmt::Debug for ByteSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ByteSource")
            .field("length", &self.length)
            .finish_non_exhaustive()
    }
}

#[derive(Debug, Clone, thiserror::Error)]
pub enum StorageError {
    #[error("Object not found: {0}")]
    NotFound(String),

    #[error("Invalid storage key: {0}")]
    InvalidKey(String),

    #[error("Storage read timed out after {0} ms")]
    Timeout(u64),

    #[error("Storage I/O error: {0}")]
    Io(String),
}

#[async_trait]
pub trait ContentStorage: Send + Sync {
    /// Returns the object's size and any stored type hint.
    async fn stat(&self, key: &StorageKey) -> Result<StorageStat, StorageError>;

    /// Opens the object for reading. `None` reads the whole object.
    async fn open_for_read(
        &self,
        key: &StorageKey,
        range: Option<ByteRange>,
    ) -> Result<ByteSource, StorageError>;
}

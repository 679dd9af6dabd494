//! Local directory content storage adapter.
//!
//! Storage keys are relative paths under a root directory. Absolute keys and
//! keys that climb out of the root are rejected before touching the disk.

use async_trait::async_trait;
use std::io::{ErrorKind, SeekFrom};
use std::path::{Component, Path, PathBuf};
use std::time::Duration;
use tokio::fs;
use tokio::io::{AsyncReadExt, AsyncSeekExt};

use crate::domain::content::StorageKey;
use crate::domain::delivery::ByteRange;
use crate::ports::{ByteSource, ContentStorage, StorageError, StorageStat};

/// Reads stored objects from a directory on local disk.
#[derive(Debug, Clone)]
pub struct LocalContentStorage {
    root: PathBuf,
    read_timeout: Duration,
}

impl LocalContentStorage {
    /// Create a storage rooted at `root`.
    ///
    /// # Example
    /// ```ignore
    /// let storage = LocalContentStorage::new("./data/content", Duration::from_secs(10));
    /// ```
    pub fn new<P: AsRef<Path>>(root: P, read_timeout: Duration) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
            read_timeout,
        }
    }

    /// Maps a key to a path under the root.
    fn object_path(&self, key: &StorageKey) -> Result<PathBuf, StorageError> {
        let relative = Path::new(key.as_str());
        let mut path = self.root.clone();
        for component in relative.components() {
            match component {
                Component::Normal(part) => path.push(part),
                Component::CurDir => {}
                Component::ParentDir | Component::RootDir | Component::Prefix(_) => {
                    return Err(StorageError::InvalidKey(key.to_string()));
                }
            }
        }
        if path == self.root {
            return Err(StorageError::InvalidKey(key.to_string()));
        }
        Ok(path)
    }

    async fn bounded<T, F>(&self, op: F) -> Result<T, StorageError>
    where
        F: std::future::Future<Output = std::io::Result<T>>,
    {
        match tokio::time::timeout(self.read_timeout, op).await {
            Ok(result) => result.map_err(map_io_error),
            Err(_) => Err(StorageError::Timeout(self.read_timeout.as_millis() as u64)),
        }
    }
}

fn map_io_error(err: std::io::Error) -> StorageError {
    match err.kind() {
        ErrorKind::NotFound => StorageError::NotFound(err.to_string()),
        _ => StorageError::Io(err.to_string()),
    }
}

#[async_trait]
impl ContentStorage for LocalContentStorage {
    async fn stat(&self, key: &StorageKey) -> Result<StorageStat, StorageError> {
        let path = self.object_path(key)?;
        let metadata = self.bounded(fs::metadata(&path)).await?;
        if !metadata.is_file() {
            return Err(StorageError::NotFound(key.to_string()));
        }
        Ok(StorageStat {
            size: metadata.len(),
            mime_hint: None,
        })
    }

    async fn open_for_read(
        &self,
        key: &StorageKey,
        range: Option<ByteRange>,
    ) -> Result<ByteSource, StorageError> {
        let path = self.object_path(key)?;
        let open = async {
            let mut file = fs::File::open(&path).await?;
            let size = file.metadata().await?.len();
            match range {
                Some(range) => {
                    file.seek(SeekFrom::Start(range.start)).await?;
                    Ok::<_, std::io::Error>((file, range.length()))
                }
                None => Ok((file, size)),
            }
        };
        let (file, length) = self.bounded(open).await?;

        tracing::debug!(key = %key, length, "Opened stored object");
        Ok(ByteSource {
            reader: Box::pin(file.take(length)),
            length,
        })
    }
}

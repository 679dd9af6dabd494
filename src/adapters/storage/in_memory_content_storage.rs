//! In-Memory Content Storage Adapter
//!
//! Holds object bytes in memory. Useful for testing and development.

use async_trait::async_trait;
use std::collections::HashMap;
use std::io::Cursor;
use std::sync::Arc;
use tokio::io::AsyncReadExt;
use tokio::sync::RwLock;

use crate::domain::content::StorageKey;
use crate::domain::delivery::ByteRange;
use crate::ports::{ByteSource, ContentStorage, StorageError, StorageStat};

#[derive(Debug, Clone)]
struct StoredObject {
    bytes: Arc<Vec<u8>>,
    mime_hint: Option<String>,
}

/// In-memory object storage
#[derive(Debug, Clone, Default)]
pub struct InMemoryContentStorage {
    objects: Arc<RwLock<HashMap<String, StoredObject>>>,
}

impl InMemoryContentStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store an object under `key`, replacing any previous bytes.
    pub async fn put(&self, key: &str, bytes: impl Into<Vec<u8>>, mime_hint: Option<&str>) {
        self.objects.write().await.insert(
            key.to_string(),
            StoredObject {
                bytes: Arc::new(bytes.into()),
                mime_hint: mime_hint.map(str::to_string),
            },
        );
    }

    /// Remove an object (simulates a missing backing file).
    pub async fn remove(&self, key: &str) {
        self.objects.write().await.remove(key);
    }

    async fn get(&self, key: &StorageKey) -> Result<StoredObject, StorageError> {
        self.objects
            .read()
            .await
            .get(key.as_str())
            .cloned()
            .ok_or_else(|| StorageError::NotFound(key.to_string()))
    }
}

#[async_trait]
impl ContentStorage for InMemoryContentStorage {
    async fn stat(&self, key: &StorageKey) -> Result<StorageStat, StorageError> {
        let object = self.get(key).await?;
        Ok(StorageStat {
            size: object.bytes.len() as u64,
            mime_hint: object.mime_hint,
        })
    }

    async fn open_for_read(
        &self,
        key: &StorageKey,
        range: Option<ByteRange>,
    ) -> Result<ByteSource, StorageError> {
        let object = self.get(key).await?;
        let size = object.bytes.len() as u64;
        let (start, length) = match range {
            Some(range) => {
                let start = range.start.min(size);
                (start, range.length().min(size - start))
            }
            None => (0, size),
        };

        let mut cursor = Cursor::new(object.bytes.as_ref().clone());
        cursor.set_position(start);
        Ok(ByteSource {
            reader: Box::pin(cursor.take(length)),
            length,
        })
    }
}

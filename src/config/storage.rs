//! Content storage configuration

use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;

use super::error::ValidationError;

const MIN_CHUNK_SIZE: usize = 1024;
const MAX_CHUNK_SIZE: usize = 8 * 1024 * 1024;

/// Where uploaded objects live and how they are read back.
#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    /// Root directory holding uploaded objects
    #[serde(default = "default_root")]
    pub root: PathBuf,

    /// Upper bound on a single storage read, in seconds
    #[serde(default = "default_read_timeout")]
    pub read_timeout_secs: u64,

    /// Bytes per streamed body chunk
    #[serde(default = "default_chunk_size")]
    pub chunk_size: usize,
}

impl StorageConfig {
    pub fn read_timeout(&self) -> Duration {
        Duration::from_secs(self.read_timeout_secs)
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.root.as_os_str().is_empty() {
            return Err(ValidationError::MissingRequired("STORAGE__ROOT"));
        }
        if self.read_timeout_secs == 0 {
            return Err(ValidationError::InvalidTimeout);
        }
        if !(MIN_CHUNK_SIZE..=MAX_CHUNK_SIZE).contains(&self.chunk_size) {
            return Err(ValidationError::InvalidChunkSize);
        }
        Ok(())
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            root: default_root(),
            read_timeout_secs: default_read_timeout(),
            chunk_size: default_chunk_size(),
        }
    }
}

fn default_root() -> PathBuf {
    PathBuf::from("./data/content")
}

fn default_read_timeout() -> u64 {
    10
}

fn default_chunk_size() -> usize {
    64 * 1024
}

//! Content locators: where an item's bytes or target live.
//!
//! A locator is either a key into content storage or an absolute external
//! URL. Locators read back from the record store are kept as-is and only
//! checked when an item is resolved for delivery, so a malformed stored URL
//! surfaces as `InvalidLocator` for that one item instead of breaking the
//! whole listing.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use url::Url;

use super::ContentKind;
use crate::domain::foundation::ValidationError;

/// Key of an object in content storage.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StorageKey(String);

impl StorageKey {
    /// Creates a storage key, rejecting blank values.
    pub fn new(key: impl Into<String>) -> Result<Self, ValidationError> {
        let key = key.into();
        if key.trim().is_empty() {
            return Err(ValidationError::empty_field("storage_key"));
        }
        Ok(Self(key))
    }

    pub(crate) fn from_stored(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Final path segment, used as the suggested download name.
    pub fn file_name(&self) -> &str {
        self.0
            .rsplit(['/', '\\'])
            .find(|segment| !segment.is_empty())
            .unwrap_or(&self.0)
    }

    /// Lower-cased file extension, if any.
    pub fn extension(&self) -> Option<String> {
        Path::new(self.file_name())
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.to_ascii_lowercase())
    }
}

impl fmt::Display for StorageKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// An external URL as stored. [`ExternalUrl::validate`] checks it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ExternalUrl(String);

impl ExternalUrl {
    fn from_stored(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    /// Accepts only absolute `http`/`https` URLs with a host.
    fn check(raw: &str) -> Result<Url, ValidationError> {
        let url = Url::parse(raw.trim())
            .map_err(|e| ValidationError::invalid_format("locator", e.to_string()))?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(ValidationError::invalid_format(
                "locator",
                format!("scheme '{}' is not http or https", url.scheme()),
            ));
        }
        if url.host_str().map_or(true, str::is_empty) {
            return Err(ValidationError::invalid_format("locator", "URL has no host"));
        }
        Ok(url)
    }

    /// Checks the stored value, returning the parsed URL.
    pub fn validate(&self) -> Result<Url, ValidationError> {
        Self::check(&self.0)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ExternalUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Where a content item points.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum Locator {
    Storage(StorageKey),
    External(ExternalUrl),
}

impl Locator {
    /// Wraps a stored locator without checking it.
    pub fn from_stored(kind: ContentKind, raw: impl Into<String>) -> Self {
        let raw = raw.into();
        match kind {
            ContentKind::UploadedResource => Locator::Storage(StorageKey::from_stored(raw)),
            ContentKind::ExternalLink | ContentKind::MeetingLink => {
                Locator::External(ExternalUrl::from_stored(raw))
            }
            ContentKind::Video | ContentKind::Material => {
                if looks_external(&raw) {
                    Locator::External(ExternalUrl::from_stored(raw))
                } else {
                    Locator::Storage(StorageKey::from_stored(raw))
                }
            }
        }
    }

    /// Checks a stored locator before it is used for delivery.
    pub fn validate(&self) -> Result<(), ValidationError> {
        match self {
            Locator::Storage(key) => StorageKey::new(key.as_str()).map(|_| ()),
            Locator::External(url) => url.validate().map(|_| ()),
        }
    }

    pub fn is_external(&self) -> bool {
        matches!(self, Locator::External(_))
    }

    pub fn as_str(&self) -> &str {
        match self {
            Locator::Storage(key) => key.as_str(),
            Locator::External(url) => url.as_str(),
        }
    }
}

fn looks_external(raw: &str) -> bool {
    raw.contains("://")
}

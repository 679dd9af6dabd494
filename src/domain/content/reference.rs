//! Content references as they appear in request paths.

use std::fmt;
use std::str::FromStr;

use super::ContentSource;
use crate::domain::foundation::{ContentItemId, ValidationError};

/// A content id, optionally pinned to one backing store.
///
/// Accepts `42`, `resource_42` or `content_42`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ContentRef {
    pub id: ContentItemId,
    pub source: Option<ContentSource>,
}

impl ContentRef {
    /// A bare id that may live in either store.
    pub fn any(id: ContentItemId) -> Self {
        Self { id, source: None }
    }

    pub fn in_source(id: ContentItemId, source: ContentSource) -> Self {
        Self {
            id,
            source: Some(source),
        }
    }
}

impl FromStr for ContentRef {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let (source, number) = [ContentSource::UploadedResource, ContentSource::SessionContent]
            .into_iter()
            .find_map(|source| {
                s.strip_prefix(source.prefix())
                    .and_then(|rest| rest.strip_prefix('_'))
                    .map(|rest| (Some(source), rest))
            })
            .unwrap_or((None, s));

        let raw: i64 = number.parse().map_err(|_| {
            ValidationError::invalid_format("content_id", format!("'{}' is not a content id", s))
        })?;
        let id = ContentItemId::new(raw)?;
        Ok(Self { id, source })
    }
}

impl fmt::Display for ContentRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.source {
            Some(source) => write!(f, "{}_{}", source.prefix(), self.id),
            None => write!(f, "{}", self.id),
        }
    }
}

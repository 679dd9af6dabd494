//! Content kind discriminator and backing-store source.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::domain::foundation::ValidationError;

/// The kind of a content item, attached when the two backing stores are
/// unioned into one listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ContentKind {
    UploadedResource,
    ExternalLink,
    MeetingLink,
    Video,
    Material,
}

impl ContentKind {
    /// Returns all kinds.
    pub fn all() -> &'static [ContentKind] {
        &[
            ContentKind::UploadedResource,
            ContentKind::ExternalLink,
            ContentKind::MeetingLink,
            ContentKind::Video,
            ContentKind::Material,
        ]
    }

    /// The stored discriminator value.
    pub fn as_str(&self) -> &'static str {
        match self {
            ContentKind::UploadedResource => "UPLOADED_RESOURCE",
            ContentKind::ExternalLink => "EXTERNAL_LINK",
            ContentKind::MeetingLink => "MEETING_LINK",
            ContentKind::Video => "VIDEO",
            ContentKind::Material => "MATERIAL",
        }
    }

    /// Which backing store holds records of this kind.
    pub fn source(&self) -> ContentSource {
        match self {
            ContentKind::UploadedResource => ContentSource::UploadedResource,
            ContentKind::ExternalLink
            | ContentKind::MeetingLink
            | ContentKind::Video
            | ContentKind::Material => ContentSource::SessionContent,
        }
    }

    /// Kinds whose locator must always be an external URL.
    pub fn requires_external_locator(&self) -> bool {
        matches!(self, ContentKind::ExternalLink | ContentKind::MeetingLink)
    }
}

impl fmt::Display for ContentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ContentKind {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ContentKind::all()
            .iter()
            .copied()
            .find(|kind| kind.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| {
                ValidationError::invalid_format("kind", format!("unknown content kind '{}'", s))
            })
    }
}

/// Backing store a content record lives in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContentSource {
    /// Uploaded files with a storage key, size and MIME hint.
    UploadedResource,
    /// Lightweight link, meeting, video and material records.
    SessionContent,
}

impl ContentSource {
    /// Prefix accepted in content references naming this store.
    pub fn prefix(&self) -> &'static str {
        match self {
            ContentSource::UploadedResource => "resource",
            ContentSource::SessionContent => "content",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_parses_stored_discriminator() {
        assert_eq!("EXTERNAL_LINK".parse::<ContentKind>().unwrap(), ContentKind::ExternalLink);
        assert_eq!("video".parse::<ContentKind>().unwrap(), ContentKind::Video);
    }

    #[test]
    fn unknown_kind_is_rejected() {
        assert!("PODCAST".parse::<ContentKind>().is_err());
    }

    #[test]
    fn only_uploaded_resources_live_in_the_resource_store() {
        for kind in ContentKind::all() {
            let expected = if *kind == ContentKind::UploadedResource {
                ContentSource::UploadedResource
            } else {
                ContentSource::SessionContent
            };
            assert_eq!(kind.source(), expected);
        }
    }

    #[test]
    fn kind_serializes_screaming_snake_case() {
        let json = serde_json::to_string(&ContentKind::MeetingLink).unwrap();
        assert_eq!(json, "\"MEETING_LINK\"");
    }

    #[test]
    fn link_kinds_require_external_locator() {
        assert!(ContentKind::ExternalLink.requires_external_locator());
        assert!(ContentKind::MeetingLink.requires_external_locator());
        assert!(!ContentKind::Video.requires_external_locator());
    }
}

//! Error taxonomy for content resolution and delivery.

use crate::domain::foundation::{ContentItemId, DomainError, SessionId, ValidationError};

/// Errors surfaced by listing, authorization, delivery and view tracking.
#[derive(Debug, Clone, thiserror::Error)]
pub enum ContentError {
    #[error("{0} not found")]
    NotFound(String),

    #[error("Viewer is not enrolled in the course owning this content")]
    NotEnrolled,

    #[error("Viewer is not authorized for this content")]
    Unauthorized,

    #[error("Content locator is invalid: {0}")]
    InvalidLocator(String),

    #[error("Stored content is unavailable: {0}")]
    StreamUnavailable(String),

    #[error("Requested range not satisfiable for {size} bytes")]
    RangeNotSatisfiable { size: u64 },

    #[error("Content id {0} exists in more than one store")]
    AmbiguousContentIdentifier(ContentItemId),

    #[error("Content item {0} still exists")]
    StillReferenced(ContentItemId),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Infrastructure failure: {0}")]
    Infrastructure(String),
}

impl ContentError {
    pub fn not_found(what: impl Into<String>) -> Self {
        Self::NotFound(what.into())
    }

    pub fn content_not_found(id: ContentItemId) -> Self {
        Self::NotFound(format!("Content item {}", id))
    }

    pub fn session_not_found(id: SessionId) -> Self {
        Self::NotFound(format!("Session {}", id))
    }

    /// Stable machine-readable code.
    pub fn code(&self) -> &'static str {
        match self {
            ContentError::NotFound(_) => "NOT_FOUND",
            ContentError::NotEnrolled => "NOT_ENROLLED",
            ContentError::Unauthorized => "UNAUTHORIZED",
            ContentError::InvalidLocator(_) => "INVALID_LOCATOR",
            ContentError::StreamUnavailable(_) => "STREAM_UNAVAILABLE",
            ContentError::RangeNotSatisfiable { .. } => "RANGE_NOT_SATISFIABLE",
            ContentError::AmbiguousContentIdentifier(_) => "AMBIGUOUS_CONTENT_IDENTIFIER",
            ContentError::StillReferenced(_) => "STILL_REFERENCED",
            ContentError::Validation(_) => "VALIDATION_FAILED",
            ContentError::Infrastructure(_) => "INTERNAL_ERROR",
        }
    }
}

impl From<DomainError> for ContentError {
    fn from(err: DomainError) -> Self {
        ContentError::Infrastructure(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::ErrorCode;

    #[test]
    fn codes_are_stable() {
        assert_eq!(ContentError::NotEnrolled.code(), "NOT_ENROLLED");
        assert_eq!(
            ContentError::RangeNotSatisfiable { size: 10 }.code(),
            "RANGE_NOT_SATISFIABLE"
        );
        assert_eq!(
            ContentError::AmbiguousContentIdentifier(ContentItemId::from_i64(1)).code(),
            "AMBIGUOUS_CONTENT_IDENTIFIER"
        );
    }

    #[test]
    fn domain_errors_become_infrastructure() {
        let err: ContentError = DomainError::new(ErrorCode::DatabaseError, "pool closed").into();
        assert!(matches!(err, ContentError::Infrastructure(ref m) if m.contains("pool closed")));
        assert_eq!(err.code(), "INTERNAL_ERROR");
    }

    #[test]
    fn not_found_names_the_item() {
        let err = ContentError::content_not_found(ContentItemId::from_i64(12));
        assert_eq!(err.to_string(), "Content item 12 not found");
        assert_eq!(
            ContentError::session_not_found(SessionId::from_i64(4)).to_string(),
            "Session 4 not found"
        );
    }
}

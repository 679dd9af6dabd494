//! Error types shared by the domain and the port boundary.

use std::collections::HashMap;
use std::error::Error;
use std::fmt;
use thiserror::Error;

/// Errors that occur during value object construction.
#[derive(Debug, Clone, Error)]
pub enum ValidationError {
    #[error("Field '{field}' cannot be empty")]
    EmptyField { field: String },

    #[error("Field '{field}' must be between {min} and {max}, got {actual}")]
    OutOfRange {
        field: String,
        min: i64,
        max: i64,
        actual: i64,
    },

    #[error("Field '{field}' has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

impl ValidationError {
    pub fn empty_field(field: impl Into<String>) -> Self {
        ValidationError::EmptyField { field: field.into() }
    }

    pub fn out_of_range(field: impl Into<String>, min: i64, max: i64, actual: i64) -> Self {
        ValidationError::OutOfRange {
            field: field.into(),
            min,
            max,
            actual,
        }
    }

    pub fn invalid_format(field: impl Into<String>, reason: impl Into<String>) -> Self {
        ValidationError::InvalidFormat {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

/// Failure categories reported by port implementations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    /// The backing database rejected or failed the operation.
    DatabaseError,
    /// A stored row could not be turned into a domain record.
    CorruptRecord,
    /// A collaborator (identity, enrollment) did not answer.
    CollaboratorUnavailable,
    InternalError,
}

impl ErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::DatabaseError => "DATABASE_ERROR",
            ErrorCode::CorruptRecord => "CORRUPT_RECORD",
            ErrorCode::CollaboratorUnavailable => "COLLABORATOR_UNAVAILABLE",
            ErrorCode::InternalError => "INTERNAL_ERROR",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Port-level failure with a category, message and optional details.
///
/// Application services fold these into `ContentError::Infrastructure`; the
/// message is logged but never shown to clients.
#[derive(Debug, Clone)]
pub struct DomainError {
    pub code: ErrorCode,
    pub message: String,
    pub details: HashMap<String, String>,
}

impl DomainError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            details: HashMap::new(),
        }
    }

    /// A database failure with the operation that hit it.
    pub fn database(context: &str, cause: impl fmt::Display) -> Self {
        Self::new(ErrorCode::DatabaseError, format!("{}: {}", context, cause))
    }

    pub fn corrupt_record(context: &str, cause: impl fmt::Display) -> Self {
        Self::new(ErrorCode::CorruptRecord, format!("{}: {}", context, cause))
    }

    pub fn with_detail(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.details.insert(key.into(), value.into());
        self
    }
}

impl fmt::Display for DomainError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)
    }
}

impl Error for DomainError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn out_of_range_names_bounds_and_value() {
        let err = ValidationError::out_of_range("days", 1, 365, 400);
        assert_eq!(
            err.to_string(),
            "Field 'days' must be between 1 and 365, got 400"
        );
    }

    #[test]
    fn invalid_format_carries_reason() {
        let err = ValidationError::invalid_format("locator", "missing scheme");
        assert_eq!(
            err.to_string(),
            "Field 'locator' has invalid format: missing scheme"
        );
    }

    #[test]
    fn database_error_includes_context_and_cause() {
        let err = DomainError::database("Failed to fetch content", "connection reset");
        assert_eq!(err.code, ErrorCode::DatabaseError);
        assert_eq!(
            err.to_string(),
            "[DATABASE_ERROR] Failed to fetch content: connection reset"
        );
    }

    #[test]
    fn corrupt_record_is_its_own_category() {
        let err = DomainError::corrupt_record("Invalid content kind", "PODCAST")
            .with_detail("table", "session_contents");
        assert_eq!(err.code, ErrorCode::CorruptRecord);
        assert_eq!(err.details.get("table").map(String::as_str), Some("session_contents"));
    }
}

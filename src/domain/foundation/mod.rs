//! Foundation module - Shared domain primitives.
//!
//! Identifiers, timestamps, roles and error types that the content,
//! access, delivery and view modules build on.

mod auth;
mod errors;
mod ids;
mod role;
mod timestamp;

pub use auth::{AuthError, AuthenticatedUser};
pub use errors::{DomainError, ErrorCode, ValidationError};
pub use ids::{ContentItemId, CourseId, SessionId, ViewerId};
pub use role::ViewerRole;
pub use timestamp::Timestamp;

//! Bearer token validation port.
//!
//! The token format belongs to the identity collaborator. Whatever the
//! adapter, it must check the signature, issuer, audience and expiry before
//! trusting any claim.

use async_trait::async_trait;

use crate::domain::foundation::{AuthError, AuthenticatedUser};

/// Turns a bearer token into the viewer id and role it was issued for.
///
/// Error contract:
/// - `InvalidToken` for malformed tokens, bad signatures or foreign issuers
/// - `TokenExpired` once `exp` has passed
/// - `UnknownRole` when the role claim maps to no `ViewerRole`
/// - `ServiceUnavailable` when the identity collaborator cannot be reached
#[async_trait]
pub trait SessionValidator: Send + Sync {
    /// `token` is the raw value without the `Bearer ` prefix.
    async fn validate(&self, token: &str) -> Result<AuthenticatedUser, AuthError>;
}

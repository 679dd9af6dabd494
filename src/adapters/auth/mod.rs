//! Authentication adapters.
//!
//! Implementations of the `SessionValidator` port:
//!
//! - `jwt` - HS256 shared-secret validation of platform access tokens
//! - `mock` - Fixed token table for tests and local development

mod jwt;
mod mock;

pub use jwt::{AccessClaims, Audience, JwtConfig, JwtSessionValidator};
pub use mock::MockSessionValidator;

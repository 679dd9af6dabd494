//! Mock session validator for tests and local development.
//!
//! # Example
//!
//! ```ignore
//! use session_content::adapters::auth::MockSessionValidator;
//! use session_content::domain::foundation::ViewerRole;
//!
//! let validator = MockSessionValidator::new()
//!     .with_test_user("student-token", "student-1", ViewerRole::Student);
//!
//! let user = validator.validate("student-token").await?;
//! ```

use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};

use async_trait::async_trait;

use crate::domain::foundation::{AuthError, AuthenticatedUser, ViewerId, ViewerRole};
use crate::ports::SessionValidator;

/// Maps fixed tokens to users. Tokens not in the map return `InvalidToken`.
#[derive(Debug, Default)]
pub struct MockSessionValidator {
    tokens: RwLock<HashMap<String, AuthenticatedUser>>,
    /// Returned for every validation when set.
    force_error: RwLock<Option<AuthError>>,
}

impl MockSessionValidator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_user(mut self, token: impl Into<String>, user: AuthenticatedUser) -> Self {
        self.tokens
            .get_mut()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(token.into(), user);
        self
    }

    /// Adds a token for a user with the given id and role.
    ///
    /// Blank ids are ignored.
    pub fn with_test_user(
        self,
        token: impl Into<String>,
        viewer_id: impl Into<String>,
        role: ViewerRole,
    ) -> Self {
        let viewer_id = viewer_id.into();
        match ViewerId::new(viewer_id.clone()) {
            Ok(id) => {
                let user = AuthenticatedUser::new(id, role, Some(format!("Test {}", viewer_id)));
                self.with_user(token, user)
            }
            Err(_) => self,
        }
    }

    pub fn with_error(mut self, error: AuthError) -> Self {
        *self
            .force_error
            .get_mut()
            .unwrap_or_else(PoisonError::into_inner) = Some(error);
        self
    }

    pub fn clear_error(&self) {
        *self
            .force_error
            .write()
            .unwrap_or_else(PoisonError::into_inner) = None;
    }

    /// Registers a token at runtime.
    pub fn add_token(&self, token: impl Into<String>, user: AuthenticatedUser) {
        self.tokens
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(token.into(), user);
    }

    pub fn remove_token(&self, token: &str) {
        self.tokens
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(token);
    }
}

#[async_trait]
impl SessionValidator for MockSessionValidator {
    async fn validate(&self, token: &str) -> Result<AuthenticatedUser, AuthError> {
        if let Some(error) = self
            .force_error
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
        {
            return Err(error);
        }

        self.tokens
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(token)
            .cloned()
            .ok_or(AuthError::InvalidToken)
    }
}

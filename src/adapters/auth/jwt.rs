//! HS256 JWT adapter for bearer token validation.
//!
//! Tokens are issued by the platform's identity service and signed with a
//! shared secret. This adapter validates:
//!
//! - **Signature**: HS256 against the configured secret
//! - **Issuer (iss)**: Must match the configured issuer
//! - **Audience (aud)**: Must contain the configured audience
//! - **Expiry (exp)**: Must be in the future
//!
//! and maps `sub` and `role` onto the domain `AuthenticatedUser`.

use async_trait::async_trait;
use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

use crate::domain::foundation::{AuthError, AuthenticatedUser, ViewerId, ViewerRole};
use crate::ports::SessionValidator;

/// Configuration for the JWT adapter.
#[derive(Clone)]
pub struct JwtConfig {
    pub issuer: String,
    pub audience: String,
    pub secret: SecretString,
    /// Clock skew tolerated on `exp`, in seconds.
    pub leeway_secs: u64,
}

impl JwtConfig {
    pub fn new(issuer: impl Into<String>, audience: impl Into<String>, secret: SecretString) -> Self {
        Self {
            issuer: issuer.into(),
            audience: audience.into(),
            secret,
            leeway_secs: 0,
        }
    }

    pub fn with_leeway(mut self, leeway_secs: u64) -> Self {
        self.leeway_secs = leeway_secs;
        self
    }
}

impl std::fmt::Debug for JwtConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtConfig")
            .field("issuer", &self.issuer)
            .field("audience", &self.audience)
            .field("secret", &"[REDACTED]")
            .field("leeway_secs", &self.leeway_secs)
            .finish()
    }
}

/// Claims carried by platform access tokens.
#[derive(Debug, Serialize, Deserialize)]
pub struct AccessClaims {
    /// Subject - the viewer id
    pub sub: String,
    pub iss: String,
    #[serde(default)]
    pub aud: Audience,
    pub exp: i64,
    pub role: String,
    #[serde(default)]
    pub name: Option<String>,
}

/// Audience can be a single string or array of strings in JWTs.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Audience {
    #[default]
    None,
    Single(String),
    Multiple(Vec<String>),
}

impl Audience {
    fn contains(&self, expected: &str) -> bool {
        match self {
            Audience::None => false,
            Audience::Single(s) => s == expected,
            Audience::Multiple(v) => v.iter().any(|s| s == expected),
        }
    }
}

/// Shared-secret session validator.
pub struct JwtSessionValidator {
    config: JwtConfig,
    decoding_key: DecodingKey,
    validation: Validation,
}

impl JwtSessionValidator {
    pub fn new(config: JwtConfig) -> Self {
        let decoding_key = DecodingKey::from_secret(config.secret.expose_secret().as_bytes());

        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_issuer(&[&config.issuer]);
        validation.set_audience(&[&config.audience]);
        validation.validate_exp = true;
        validation.leeway = config.leeway_secs;
        validation.set_required_spec_claims(&["exp", "iss", "sub", "aud"]);

        Self {
            config,
            decoding_key,
            validation,
        }
    }

    fn decode_claims(&self, token: &str) -> Result<AccessClaims, AuthError> {
        decode::<AccessClaims>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| {
                use jsonwebtoken::errors::ErrorKind;
                match e.kind() {
                    ErrorKind::ExpiredSignature => {
                        tracing::debug!("Token expired");
                        AuthError::TokenExpired
                    }
                    ErrorKind::InvalidIssuer | ErrorKind::InvalidAudience => {
                        tracing::warn!(error = %e, "Token issued for another service");
                        AuthError::InvalidToken
                    }
                    _ => {
                        tracing::warn!(error = %e, "Token validation failed");
                        AuthError::InvalidToken
                    }
                }
            })
    }
}

#[async_trait]
impl SessionValidator for JwtSessionValidator {
    async fn validate(&self, token: &str) -> Result<AuthenticatedUser, AuthError> {
        let claims = self.decode_claims(token)?;

        if !claims.aud.contains(&self.config.audience) {
            return Err(AuthError::InvalidToken);
        }

        let viewer_id = ViewerId::new(&claims.sub).map_err(|_| {
            tracing::warn!("Token subject is blank");
            AuthError::InvalidToken
        })?;

        let role: ViewerRole = claims.role.parse().map_err(|_| {
            tracing::warn!(role = %claims.role, "Token carries an unknown role");
            AuthError::UnknownRole(claims.role.clone())
        })?;

        Ok(AuthenticatedUser::new(viewer_id, role, claims.name))
    }
}

impl std::fmt::Debug for JwtSessionValidator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtSessionValidator")
            .field("issuer", &self.config.issuer)
            .field("audience", &self.config.audience)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jsonwebtoken::{encode, EncodingKey, Header};

    const SECRET: &str = "test-signing-secret";
    const ISSUER: &str = "https://id.example.com";
    const AUDIENCE: &str = "session-content";

    fn validator() -> JwtSessionValidator {
        JwtSessionValidator::new(JwtConfig::new(
            ISSUER,
            AUDIENCE,
            SecretString::new(SECRET.to_string()),
        ))
    }

    fn claims(role: &str, exp_offset: i64) -> AccessClaims {
        AccessClaims {
            sub: "viewer-1".to_string(),
            iss: ISSUER.to_string(),
            aud: Audience::Single(AUDIENCE.to_string()),
            exp: chrono::Utc::now().timestamp() + exp_offset,
            role: role.to_string(),
            name: Some("Viewer One".to_string()),
        }
    }

    fn sign(claims: &AccessClaims, secret: &str) -> String {
        encode(
            &Header::new(Algorithm::HS256),
            claims,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
        .unwrap()
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Success Tests
    // ════════════════════════════════════════════════════════════════════════════

    #[tokio::test]
    async fn valid_token_yields_viewer_and_role() {
        let token = sign(&claims("presenter", 600), SECRET);

        let user = validator().validate(&token).await.unwrap();

        assert_eq!(user.id.as_str(), "viewer-1");
        assert_eq!(user.role, ViewerRole::Presenter);
        assert_eq!(user.display_name.as_deref(), Some("Viewer One"));
    }

    #[tokio::test]
    async fn audience_list_is_accepted() {
        let mut c = claims("student", 600);
        c.aud = Audience::Multiple(vec!["other".to_string(), AUDIENCE.to_string()]);

        assert!(validator().validate(&sign(&c, SECRET)).await.is_ok());
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Failure Tests
    // ════════════════════════════════════════════════════════════════════════════

    #[tokio::test]
    async fn expired_token_is_rejected_as_expired() {
        let token = sign(&claims("student", -3600), SECRET);
        assert!(matches!(
            validator().validate(&token).await,
            Err(AuthError::TokenExpired)
        ));
    }

    #[tokio::test]
    async fn wrong_secret_is_invalid() {
        let token = sign(&claims("student", 600), "another-secret");
        assert!(matches!(
            validator().validate(&token).await,
            Err(AuthError::InvalidToken)
        ));
    }

    #[tokio::test]
    async fn wrong_audience_is_invalid() {
        let mut c = claims("student", 600);
        c.aud = Audience::Single("billing".to_string());
        assert!(matches!(
            validator().validate(&sign(&c, SECRET)).await,
            Err(AuthError::InvalidToken)
        ));
    }

    #[tokio::test]
    async fn unknown_role_is_reported() {
        let token = sign(&claims("janitor", 600), SECRET);
        assert!(matches!(
            validator().validate(&token).await,
            Err(AuthError::UnknownRole(role)) if role == "janitor"
        ));
    }

    #[tokio::test]
    async fn garbage_is_invalid() {
        assert!(matches!(
            validator().validate("not-a-jwt").await,
            Err(AuthError::InvalidToken)
        ));
    }

    #[test]
    fn debug_redacts_secret() {
        let config = JwtConfig::new(ISSUER, AUDIENCE, SecretString::new(SECRET.to_string()));
        assert!(!format!("{:?}", config).contains(SECRET));
    }

    #[tokio::test]
    async fn leeway_tolerates_small_clock_skew() {
        let token = sign(&claims("student", -10), SECRET);
        let lenient = JwtSessionValidator::new(
            JwtConfig::new(ISSUER, AUDIENCE, SecretString::new(SECRET.to_string()))
                .with_leeway(30),
        );

        assert!(lenient.validate(&token).await.is_ok());
        assert!(matches!(
            validator().validate(&token).await,
            Err(AuthError::TokenExpired)
        ));
    }
}

//! Application configuration module
//!
//! Configuration is read from environment variables (and a `.env` file in
//! development) using the `config` and `dotenvy` crates. Variables carry the
//! `SESSION_CONTENT` prefix and nested values are separated by `__`.
//!
//! # Example
//!
//! ```no_run
//! use session_content::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//! ```

mod auth;
mod database;
mod error;
mod server;
mod storage;
mod views;

pub use auth::AuthConfig;
pub use database::DatabaseConfig;
pub use error::{ConfigError, ValidationError};
pub use server::{Environment, ServerConfig};
pub use storage::StorageConfig;
pub use views::ViewsConfig;

use serde::Deserialize;

/// Root application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Bind address, environment and HTTP limits
    #[serde(default)]
    pub server: ServerConfig,

    /// PostgreSQL connection
    pub database: DatabaseConfig,

    /// Bearer token validation
    pub auth: AuthConfig,

    /// Uploaded object storage
    #[serde(default)]
    pub storage: StorageConfig,

    /// View counting and analytics bounds
    #[serde(default)]
    pub views: ViewsConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// # Environment Variable Format
    ///
    /// - `SESSION_CONTENT__SERVER__PORT=8080` -> `server.port = 8080`
    /// - `SESSION_CONTENT__DATABASE__URL=...` -> `database.url = ...`
    /// - `SESSION_CONTENT__VIEWS__TRACK_STAFF_VIEWS=true`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing or values
    /// cannot be parsed.
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("SESSION_CONTENT")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.server.validate()?;
        self.database.validate()?;
        self.auth.validate(&self.server.environment)?;
        self.storage.validate()?;
        self.views.validate()?;
        Ok(())
    }

    pub fn is_production(&self) -> bool {
        self.server.is_production()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::sync::Mutex;

    // Env vars are process-global.
    static ENV_MUTEX: Mutex<()> = Mutex::new(());

    const VARS: &[&str] = &[
        "SESSION_CONTENT__DATABASE__URL",
        "SESSION_CONTENT__AUTH__JWT_SECRET",
        "SESSION_CONTENT__AUTH__ISSUER",
        "SESSION_CONTENT__SERVER__PORT",
        "SESSION_CONTENT__SERVER__ENVIRONMENT",
        "SESSION_CONTENT__VIEWS__TRACK_STAFF_VIEWS",
        "SESSION_CONTENT__STORAGE__ROOT",
    ];

    fn set_minimal_env() {
        env::set_var("SESSION_CONTENT__DATABASE__URL", "postgresql://test@localhost/test");
        env::set_var(
            "SESSION_CONTENT__AUTH__JWT_SECRET",
            "a-development-secret-that-is-long-enough",
        );
        env::set_var("SESSION_CONTENT__AUTH__ISSUER", "https://id.example.com");
    }

    fn clear_env() {
        for var in VARS {
            env::remove_var(var);
        }
    }

    fn load_with(extra: &[(&str, &str)]) -> Result<AppConfig, ConfigError> {
        set_minimal_env();
        for (key, value) in extra {
            env::set_var(key, value);
        }
        let result = AppConfig::load();
        clear_env();
        result
    }

    #[test]
    fn test_load_from_environment() {
        let _guard = ENV_MUTEX.lock().unwrap();
        let result = load_with(&[]);

        assert!(result.is_ok(), "Failed to load config: {:?}", result.err());
        let config = result.unwrap();
        assert_eq!(config.database.url, "postgresql://test@localhost/test");
        assert_eq!(config.auth.issuer, "https://id.example.com");
        assert_eq!(config.auth.audience, "session-content");
    }

    #[test]
    fn test_validate_full_config() {
        let _guard = ENV_MUTEX.lock().unwrap();
        let config = load_with(&[]).unwrap();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_section_defaults() {
        let _guard = ENV_MUTEX.lock().unwrap();
        let config = load_with(&[]).unwrap();

        assert_eq!(config.server.port, 8080);
        assert_eq!(config.server.environment, Environment::Development);
        assert_eq!(config.storage.chunk_size, 64 * 1024);
        assert!(!config.views.track_staff_views);
        assert_eq!(config.views.top_limit_max, 100);
    }

    #[test]
    fn test_nested_overrides() {
        let _guard = ENV_MUTEX.lock().unwrap();
        let config = load_with(&[
            ("SESSION_CONTENT__SERVER__PORT", "3000"),
            ("SESSION_CONTENT__VIEWS__TRACK_STAFF_VIEWS", "true"),
            ("SESSION_CONTENT__STORAGE__ROOT", "/srv/content"),
        ])
        .unwrap();

        assert_eq!(config.server.port, 3000);
        assert!(config.views.track_staff_views);
        assert_eq!(config.storage.root, std::path::PathBuf::from("/srv/content"));
    }

    #[test]
    fn test_is_production() {
        let _guard = ENV_MUTEX.lock().unwrap();
        let config = load_with(&[("SESSION_CONTENT__SERVER__ENVIRONMENT", "production")]).unwrap();
        assert!(config.is_production());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_missing_auth_section_fails_to_load() {
        let _guard = ENV_MUTEX.lock().unwrap();
        env::set_var("SESSION_CONTENT__DATABASE__URL", "postgresql://test@localhost/test");
        let result = AppConfig::load();
        clear_env();
        assert!(result.is_err());
    }
}

//! Application configuration schemas.
//!
//! All configuration structs are deserialized from TOML files via the
//! `config` crate. Each sub-module represents a logical configuration
//! section. Every field has a default so a partial file is enough.

pub mod app;
pub mod auth;
pub mod database;
pub mod logging;
pub mod rate_limit;
pub mod tenant;

use serde::{Deserialize, Serialize};

pub use self::app::{CorsConfig, ServerConfig};
pub use self::auth::AuthConfig;
pub use self::database::{DatabaseBackend, DatabaseConfig};
pub use self::logging::LoggingConfig;
pub use self::rate_limit::RateLimitConfig;
pub use self::tenant::TenantConfig;

use crate::error::AppError;

/// Environment variable holding the access-token signing secret.
pub const JWT_SECRET_ENV: &str = "JWT_SECRET";
/// Environment variable holding the refresh-token signing secret.
pub const JWT_REFRESH_SECRET_ENV: &str = "JWT_REFRESH_SECRET";

/// Root application configuration.
///
/// Top-level deserialization target for the merged configuration
/// (default.toml + environment overlay + environment variables).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Deployment environment: `"development"`, `"test"` or `"production"`.
    #[serde(default = "default_environment")]
    pub environment: String,
    /// HTTP server settings.
    #[serde(default)]
    pub server: ServerConfig,
    /// Database connection settings.
    #[serde(default)]
    pub database: DatabaseConfig,
    /// Authentication settings.
    #[serde(default)]
    pub auth: AuthConfig,
    /// Tenant isolation settings.
    #[serde(default)]
    pub tenant: TenantConfig,
    /// Auth endpoint rate limiting.
    #[serde(default)]
    pub rate_limit: RateLimitConfig,
    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            environment: default_environment(),
            server: ServerConfig::default(),
            database: DatabaseConfig::default(),
            auth: AuthConfig::default(),
            tenant: TenantConfig::default(),
            rate_limit: RateLimitConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl AppConfig {
    /// Load configuration for the given environment.
    ///
    /// Sources, later ones winning:
    /// 1. `{dir}/default.toml`
    /// 2. `{dir}/{env}.toml`
    /// 3. `EDUHUB__SECTION__KEY` environment variables
    /// 4. `JWT_SECRET` / `JWT_REFRESH_SECRET`
    ///
    /// The merged result is validated before it is returned.
    pub fn load(dir: &str, env: &str) -> Result<Self, AppError> {
        let config = config::Config::builder()
            .set_default("environment", env)?
            .add_source(config::File::with_name(&format!("{dir}/default")).required(false))
            .add_source(config::File::with_name(&format!("{dir}/{env}")).required(false))
            .add_source(
                config::Environment::with_prefix("EDUHUB")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .set_override_option("auth.jwt_secret", std::env::var(JWT_SECRET_ENV).ok())?
            .set_override_option(
                "auth.jwt_refresh_secret",
                std::env::var(JWT_REFRESH_SECRET_ENV).ok(),
            )?
            .build()
            .map_err(|e| AppError::configuration(format!("Failed to build config: {e}")))?;

        let app_config: AppConfig = config
            .try_deserialize()
            .map_err(|e| AppError::configuration(format!("Failed to deserialize config: {e}")))?;

        app_config.validate()?;
        Ok(app_config)
    }

    /// Check cross-field invariants that serde defaults cannot express.
    pub fn validate(&self) -> Result<(), AppError> {
        self.auth.validate()?;
        if self.server.port == 0 {
            return Err(AppError::configuration("server.port must be non-zero"));
        }
        if self.database.backend == DatabaseBackend::Postgres && self.database.url.is_empty() {
            return Err(AppError::configuration(
                "database.url is required for the postgres backend",
            ));
        }
        Ok(())
    }

    /// Whether the server runs in production (secure cookies, etc.).
    pub fn is_production(&self) -> bool {
        self.environment.eq_ignore_ascii_case("production")
    }
}

fn default_environment() -> String {
    "development".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid() -> AppConfig {
        AppConfig {
            auth: AuthConfig {
                jwt_secret: "a".repeat(32),
                jwt_refresh_secret: "b".repeat(32),
                ..AuthConfig::default()
            },
            ..AppConfig::default()
        }
    }

    #[test]
    fn test_valid_config_passes() {
        assert!(valid().validate().is_ok());
    }

    #[test]
    fn test_default_secrets_are_rejected() {
        assert!(AppConfig::default().validate().is_err());
    }

    #[test]
    fn test_postgres_requires_url() {
        let mut config = valid();
        config.database.url.clear();
        assert!(config.validate().is_err());

        config.database.backend = DatabaseBackend::Memory;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_is_production() {
        let mut config = valid();
        assert!(!config.is_production());
        config.environment = "Production".to_string();
        assert!(config.is_production());
    }
}

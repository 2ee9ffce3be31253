//! Authentication configuration.

use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// Minimum length of either signing secret.
pub const MIN_SECRET_LENGTH: usize = 32;

/// Longest accepted access token lifetime (one day).
pub const MAX_ACCESS_TTL_MINUTES: u64 = 24 * 60;

/// Longest accepted refresh token lifetime (one year).
pub const MAX_REFRESH_TTL_DAYS: u64 = 365;

/// Authentication and credential configuration.
#[derive(Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Secret key for access-token signing (HMAC-SHA256).
    #[serde(default)]
    pub jwt_secret: String,
    /// Secret key for refresh-token signing (HMAC-SHA256).
    #[serde(default)]
    pub jwt_refresh_secret: String,
    /// Access token TTL in minutes.
    #[serde(default = "default_access_ttl")]
    pub jwt_access_ttl_minutes: u64,
    /// Refresh token TTL in days.
    #[serde(default = "default_refresh_ttl")]
    pub jwt_refresh_ttl_days: u64,
    /// Minimum password length for new accounts.
    #[serde(default = "default_password_min")]
    pub password_min_length: usize,
    /// Name of the HTTP-only cookie carrying the refresh token.
    #[serde(default = "default_refresh_cookie")]
    pub refresh_cookie_name: String,
}

impl std::fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthConfig")
            .field("jwt_secret", &"<redacted>")
            .field("jwt_refresh_secret", &"<redacted>")
            .field("jwt_access_ttl_minutes", &self.jwt_access_ttl_minutes)
            .field("jwt_refresh_ttl_days", &self.jwt_refresh_ttl_days)
            .field("password_min_length", &self.password_min_length)
            .field("refresh_cookie_name", &self.refresh_cookie_name)
            .finish()
    }
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt_secret: String::new(),
            jwt_refresh_secret: String::new(),
            jwt_access_ttl_minutes: default_access_ttl(),
            jwt_refresh_ttl_days: default_refresh_ttl(),
            password_min_length: default_password_min(),
            refresh_cookie_name: default_refresh_cookie(),
        }
    }
}

impl AuthConfig {
    /// Validates secret strength and token lifetimes.
    pub fn validate(&self) -> Result<(), AppError> {
        if self.jwt_secret.len() < MIN_SECRET_LENGTH {
            return Err(AppError::configuration(format!(
                "auth.jwt_secret (JWT_SECRET) must be at least {MIN_SECRET_LENGTH} characters"
            )));
        }
        if self.jwt_refresh_secret.len() < MIN_SECRET_LENGTH {
            return Err(AppError::configuration(format!(
                "auth.jwt_refresh_secret (JWT_REFRESH_SECRET) must be at least {MIN_SECRET_LENGTH} characters"
            )));
        }
        if self.jwt_secret == self.jwt_refresh_secret {
            return Err(AppError::configuration(
                "Access and refresh token secrets must differ",
            ));
        }
        if self.jwt_access_ttl_minutes == 0 || self.jwt_refresh_ttl_days == 0 {
            return Err(AppError::configuration("Token lifetimes must be non-zero"));
        }
        if self.jwt_access_ttl_minutes > MAX_ACCESS_TTL_MINUTES {
            return Err(AppError::configuration(format!(
                "auth.jwt_access_ttl_minutes must be at most {MAX_ACCESS_TTL_MINUTES}"
            )));
        }
        if self.jwt_refresh_ttl_days > MAX_REFRESH_TTL_DAYS {
            return Err(AppError::configuration(format!(
                "auth.jwt_refresh_ttl_days must be at most {MAX_REFRESH_TTL_DAYS}"
            )));
        }
        Ok(())
    }

    /// Access token lifetime in minutes, capped at [`MAX_ACCESS_TTL_MINUTES`].
    pub fn access_ttl_minutes(&self) -> i64 {
        self.jwt_access_ttl_minutes.min(MAX_ACCESS_TTL_MINUTES) as i64
    }

    /// Refresh token lifetime in days, capped at [`MAX_REFRESH_TTL_DAYS`].
    pub fn refresh_ttl_days(&self) -> i64 {
        self.jwt_refresh_ttl_days.min(MAX_REFRESH_TTL_DAYS) as i64
    }

    /// Refresh token lifetime in seconds (also the cookie max-age).
    pub fn refresh_ttl_seconds(&self) -> i64 {
        self.refresh_ttl_days() * 24 * 60 * 60
    }
}

fn default_access_ttl() -> u64 {
    15
}

fn default_refresh_ttl() -> u64 {
    7
}

fn default_password_min() -> usize {
    8
}

fn default_refresh_cookie() -> String {
    "refreshToken".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_secrets_must_differ() {
        let config = AuthConfig {
            jwt_secret: "s".repeat(40),
            jwt_refresh_secret: "s".repeat(40),
            ..AuthConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_short_secret_rejected() {
        let config = AuthConfig {
            jwt_secret: "short".to_string(),
            jwt_refresh_secret: "r".repeat(32),
            ..AuthConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_debug_redacts_secrets() {
        let config = AuthConfig {
            jwt_secret: "top-secret-value-that-is-long-enough".to_string(),
            ..AuthConfig::default()
        };
        let rendered = format!("{config:?}");
        assert!(!rendered.contains("top-secret"));
    }

    #[test]
    fn test_oversized_ttls_rejected_and_capped() {
        let base = AuthConfig {
            jwt_secret: "a".repeat(32),
            jwt_refresh_secret: "b".repeat(32),
            ..AuthConfig::default()
        };
        assert!(base.validate().is_ok());

        let huge_access = AuthConfig {
            jwt_access_ttl_minutes: u64::MAX,
            ..base.clone()
        };
        assert!(huge_access.validate().is_err());
        assert_eq!(huge_access.access_ttl_minutes(), MAX_ACCESS_TTL_MINUTES as i64);

        let huge_refresh = AuthConfig {
            jwt_refresh_ttl_days: u64::MAX,
            ..base
        };
        assert!(huge_refresh.validate().is_err());
        assert_eq!(huge_refresh.refresh_ttl_seconds(), 365 * 86_400);
    }

    #[test]
    fn test_refresh_ttl_is_seven_days() {
        assert_eq!(AuthConfig::default().refresh_ttl_seconds(), 604_800);
    }
}

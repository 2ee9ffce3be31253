//! JWT token creation with separate access/refresh secrets.

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{EncodingKey, Header, encode};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use eduhub_core::config::AuthConfig;
use eduhub_core::error::AppError;

use super::claims::{Claims, TokenPayload, TokenType};

/// Creates signed JWT access and refresh tokens.
#[derive(Clone)]
pub struct JwtEncoder {
    access_key: EncodingKey,
    refresh_key: EncodingKey,
    access_ttl: Duration,
    refresh_ttl: Duration,
}

impl std::fmt::Debug for JwtEncoder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtEncoder")
            .field("access_ttl", &self.access_ttl)
            .field("refresh_ttl", &self.refresh_ttl)
            .finish()
    }
}

/// Result of a successful token pair generation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenPair {
    /// Short-lived access token.
    pub access_token: String,
    /// Long-lived refresh token.
    pub refresh_token: String,
    /// Access token expiration timestamp.
    pub access_expires_at: DateTime<Utc>,
    /// Refresh token expiration timestamp.
    pub refresh_expires_at: DateTime<Utc>,
}

impl JwtEncoder {
    /// Creates a new encoder from auth configuration.
    pub fn new(config: &AuthConfig) -> Self {
        Self {
            access_key: EncodingKey::from_secret(config.jwt_secret.as_bytes()),
            refresh_key: EncodingKey::from_secret(config.jwt_refresh_secret.as_bytes()),
            access_ttl: Duration::minutes(config.access_ttl_minutes()),
            refresh_ttl: Duration::days(config.refresh_ttl_days()),
        }
    }

    /// Signs a single token of the given type, issued at `now`.
    pub fn issue_at(
        &self,
        payload: &TokenPayload,
        token_type: TokenType,
        now: DateTime<Utc>,
    ) -> Result<(String, DateTime<Utc>), AppError> {
        let (key, ttl) = match token_type {
            TokenType::Access => (&self.access_key, self.access_ttl),
            TokenType::Refresh => (&self.refresh_key, self.refresh_ttl),
        };
        let exp = now + ttl;

        let claims = Claims {
            sub: payload.user_id,
            email: payload.email.clone(),
            role: payload.role,
            institute_id: payload.institute_id,
            iat: now.timestamp(),
            exp: exp.timestamp(),
            jti: Uuid::new_v4(),
            token_type,
        };

        let token = encode(&Header::default(), &claims, key)
            .map_err(|e| AppError::internal(format!("Failed to encode {token_type:?} token: {e}")))?;

        Ok((token, exp))
    }

    /// Signs an access token issued now.
    pub fn issue_access(&self, payload: &TokenPayload) -> Result<String, AppError> {
        self.issue_at(payload, TokenType::Access, Utc::now())
            .map(|(token, _)| token)
    }

    /// Generates an access + refresh pair issued at `now`.
    pub fn generate_token_pair_at(
        &self,
        payload: &TokenPayload,
        now: DateTime<Utc>,
    ) -> Result<TokenPair, AppError> {
        let (access_token, access_expires_at) = self.issue_at(payload, TokenType::Access, now)?;
        let (refresh_token, refresh_expires_at) = self.issue_at(payload, TokenType::Refresh, now)?;

        Ok(TokenPair {
            access_token,
            refresh_token,
            access_expires_at,
            refresh_expires_at,
        })
    }

    /// Generates an access + refresh pair issued now.
    pub fn generate_token_pair(&self, payload: &TokenPayload) -> Result<TokenPair, AppError> {
        self.generate_token_pair_at(payload, Utc::now())
    }
}

//! JWT token verification.

use chrono::{DateTime, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode};

use eduhub_core::config::AuthConfig;

use super::LEEWAY_SECONDS;
use super::claims::{Claims, TokenType};
use super::error::TokenError;

/// Verifies access and refresh tokens.
///
/// Expiry is checked here against the caller's clock rather than inside
/// `jsonwebtoken`, so callers can verify at an arbitrary instant.
#[derive(Clone)]
pub struct JwtDecoder {
    access_key: DecodingKey,
    refresh_key: DecodingKey,
    validation: Validation,
}

impl std::fmt::Debug for JwtDecoder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtDecoder")
            .field("validation", &self.validation)
            .finish()
    }
}

impl JwtDecoder {
    /// Creates a new decoder from auth configuration.
    pub fn new(config: &AuthConfig) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = false;
        validation.leeway = 0;

        Self {
            access_key: DecodingKey::from_secret(config.jwt_secret.as_bytes()),
            refresh_key: DecodingKey::from_secret(config.jwt_refresh_secret.as_bytes()),
            validation,
        }
    }

    /// Verifies an access token against the current time.
    pub fn decode_access(&self, token: &str) -> Result<Claims, TokenError> {
        self.decode_access_at(token, Utc::now())
    }

    /// Verifies an access token as of `now`.
    pub fn decode_access_at(&self, token: &str, now: DateTime<Utc>) -> Result<Claims, TokenError> {
        self.decode_typed(token, TokenType::Access, now)
    }

    /// Verifies a refresh token against the current time.
    pub fn decode_refresh(&self, token: &str) -> Result<Claims, TokenError> {
        self.decode_refresh_at(token, Utc::now())
    }

    /// Verifies a refresh token as of `now`.
    pub fn decode_refresh_at(&self, token: &str, now: DateTime<Utc>) -> Result<Claims, TokenError> {
        self.decode_typed(token, TokenType::Refresh, now)
    }

    fn key(&self, token_type: TokenType) -> &DecodingKey {
        match token_type {
            TokenType::Access => &self.access_key,
            TokenType::Refresh => &self.refresh_key,
        }
    }

    fn decode_typed(
        &self,
        token: &str,
        expected: TokenType,
        now: DateTime<Utc>,
    ) -> Result<Claims, TokenError> {
        let claims = match decode::<Claims>(token, self.key(expected), &self.validation) {
            Ok(data) => data.claims,
            Err(e) => {
                let err = TokenError::from(e);
                // A genuine token of the other type fails the signature
                // check first; report it as the wrong type instead.
                if err == TokenError::InvalidSignature && self.is_other_type(token, expected) {
                    return Err(TokenError::Malformed);
                }
                return Err(err);
            }
        };

        if claims.token_type != expected {
            return Err(TokenError::Malformed);
        }
        if now.timestamp() > claims.exp + LEEWAY_SECONDS {
            return Err(TokenError::Expired);
        }

        Ok(claims)
    }

    fn is_other_type(&self, token: &str, expected: TokenType) -> bool {
        let other = match expected {
            TokenType::Access => TokenType::Refresh,
            TokenType::Refresh => TokenType::Access,
        };
        decode::<Claims>(token, self.key(other), &self.validation)
            .is_ok_and(|data| data.claims.token_type == other)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    use eduhub_core::types::{InstituteId, UserId};
    use eduhub_entity::user::UserRole;

    use crate::jwt::{JwtEncoder, TokenPayload};

    fn config() -> AuthConfig {
        AuthConfig {
            jwt_secret: "access-secret-access-secret-access-secret".into(),
            jwt_refresh_secret: "refresh-secret-refresh-secret-refresh-sec".into(),
            ..AuthConfig::default()
        }
    }

    fn payload() -> TokenPayload {
        TokenPayload {
            user_id: UserId::generate(),
            email: "teacher@school.edu".into(),
            role: UserRole::Teacher,
            institute_id: Some(InstituteId::generate()),
        }
    }

    #[test]
    fn test_roundtrip_preserves_identity() {
        let encoder = JwtEncoder::new(&config());
        let decoder = JwtDecoder::new(&config());
        let p = payload();

        let pair = encoder.generate_token_pair(&p).unwrap();
        assert_eq!(decoder.decode_access(&pair.access_token).unwrap().payload(), p);
        assert_eq!(decoder.decode_refresh(&pair.refresh_token).unwrap().payload(), p);
    }

    #[test]
    fn test_expired_after_ttl() {
        let encoder = JwtEncoder::new(&config());
        let decoder = JwtDecoder::new(&config());
        let issued = Utc::now();
        let pair = encoder.generate_token_pair_at(&payload(), issued).unwrap();

        let later = issued + Duration::minutes(16);
        assert_eq!(
            decoder.decode_access_at(&pair.access_token, later).unwrap_err(),
            TokenError::Expired
        );
        assert!(decoder.decode_refresh_at(&pair.refresh_token, later).is_ok());
    }

    #[test]
    fn test_leeway_tolerates_small_skew() {
        let encoder = JwtEncoder::new(&config());
        let decoder = JwtDecoder::new(&config());
        let issued = Utc::now();
        let pair = encoder.generate_token_pair_at(&payload(), issued).unwrap();

        let edge = issued + Duration::minutes(15) + Duration::seconds(3);
        assert!(decoder.decode_access_at(&pair.access_token, edge).is_ok());
    }

    #[test]
    fn test_wrong_secret_is_invalid_signature() {
        let encoder = JwtEncoder::new(&config());
        let other = AuthConfig {
            jwt_secret: "a-completely-different-access-secret-value".into(),
            ..config()
        };
        let decoder = JwtDecoder::new(&other);
        let token = encoder.issue_access(&payload()).unwrap();

        assert_eq!(
            decoder.decode_access(&token).unwrap_err(),
            TokenError::InvalidSignature
        );
    }

    #[test]
    fn test_token_type_confusion_is_malformed() {
        let encoder = JwtEncoder::new(&config());
        let decoder = JwtDecoder::new(&config());
        let pair = encoder.generate_token_pair(&payload()).unwrap();

        assert_eq!(
            decoder.decode_access(&pair.refresh_token).unwrap_err(),
            TokenError::Malformed
        );
        assert_eq!(
            decoder.decode_refresh(&pair.access_token).unwrap_err(),
            TokenError::Malformed
        );
    }

    #[test]
    fn test_oversized_ttls_are_capped() {
        let config = AuthConfig {
            jwt_access_ttl_minutes: u64::MAX,
            jwt_refresh_ttl_days: u64::MAX,
            ..config()
        };
        let now = Utc::now();
        let pair = JwtEncoder::new(&config)
            .generate_token_pair_at(&payload(), now)
            .unwrap();

        assert_eq!(pair.access_expires_at, now + Duration::days(1));
        assert_eq!(pair.refresh_expires_at, now + Duration::days(365));
    }

    #[test]
    fn test_garbage_is_malformed() {
        let decoder = JwtDecoder::new(&config());
        assert_eq!(
            decoder.decode_access("not.a.jwt").unwrap_err(),
            TokenError::Malformed
        );
        assert_eq!(decoder.decode_access("").unwrap_err(), TokenError::Malformed);
    }
}

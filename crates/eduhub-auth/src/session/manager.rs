//! Session lifecycle manager: login and refresh flows.

use std::sync::Arc;

use chrono::Utc;
use tracing::{debug, info, warn};

use eduhub_core::config::AuthConfig;
use eduhub_core::error::AppError;
use eduhub_database::store::UserStore;
use eduhub_entity::user::User;

use crate::context::RequestContext;
use crate::jwt::{JwtDecoder, JwtEncoder, TokenPair, TokenPayload};
use crate::password::PasswordHasher;

/// Result of a successful login or refresh.
#[derive(Debug, Clone)]
pub struct LoginOutcome {
    /// The principal as currently stored.
    pub user: User,
    /// Freshly issued tokens.
    pub tokens: TokenPair,
}

/// Validates credentials and issues token pairs.
#[derive(Clone)]
pub struct SessionManager {
    users: Arc<dyn UserStore>,
    hasher: PasswordHasher,
    encoder: Arc<JwtEncoder>,
    decoder: Arc<JwtDecoder>,
}

impl std::fmt::Debug for SessionManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionManager")
            .field("encoder", &self.encoder)
            .finish()
    }
}

impl SessionManager {
    /// Creates a session manager over the principal store.
    pub fn new(users: Arc<dyn UserStore>, config: &AuthConfig) -> Self {
        let hasher = PasswordHasher::new();
        if !hasher.prepare_dummy() {
            warn!("Placeholder password hash unavailable; unknown-email logins skip hashing");
        }
        Self {
            users,
            hasher,
            encoder: Arc::new(JwtEncoder::new(config)),
            decoder: Arc::new(JwtDecoder::new(config)),
        }
    }

    /// The token verifier shared with the HTTP layer.
    pub fn decoder(&self) -> &JwtDecoder {
        &self.decoder
    }

    /// Performs the login flow:
    ///
    /// 1. Look up the principal by email (case-insensitive)
    /// 2. Verify the password, or a placeholder hash if there is no principal
    /// 3. Issue an access + refresh pair
    /// 4. Record the login time in the background
    ///
    /// Unknown email and wrong password fail identically.
    pub async fn login(&self, email: &str, password: &str) -> Result<LoginOutcome, AppError> {
        let user = self.users.find_by_email(email.trim()).await?;

        let matched = self
            .hasher
            .verify_or_dummy(password, user.as_ref().map(|u| u.password_hash.as_str()))?;

        let user = match user {
            Some(user) if matched => user,
            _ => {
                debug!("Login rejected");
                return Err(AppError::invalid_credentials());
            }
        };

        let tokens = self.issue_tokens(&user)?;
        self.record_login(&user);

        info!(
            user_id = %user.id,
            role = %user.role,
            institute_id = ?user.institute_id,
            "Login successful"
        );

        Ok(LoginOutcome { user, tokens })
    }

    /// Exchanges a refresh token for a new pair.
    ///
    /// The principal is reloaded so role or institute changes made since
    /// the old token was issued are reflected.
    pub async fn refresh(&self, refresh_token: &str) -> Result<LoginOutcome, AppError> {
        let claims = self.decoder.decode_refresh(refresh_token)?;

        let user = self
            .users
            .find_by_id(claims.sub)
            .await?
            .ok_or_else(|| AppError::unauthorized("Account no longer exists"))?;

        let tokens = self.issue_tokens(&user)?;

        info!(
            user_id = %user.id,
            institute_id = ?user.institute_id,
            "Tokens refreshed"
        );

        Ok(LoginOutcome { user, tokens })
    }

    /// Verifies an access token and returns the caller's identity.
    pub fn authenticate(&self, access_token: &str) -> Result<RequestContext, AppError> {
        let claims = self.decoder.decode_access(access_token)?;
        Ok(RequestContext::from_claims(&claims))
    }

    /// Issues a pair for the principal's current state.
    pub fn issue_tokens(&self, user: &User) -> Result<TokenPair, AppError> {
        self.encoder
            .generate_token_pair(&TokenPayload::for_user(user))
    }

    fn record_login(&self, user: &User) {
        let users = Arc::clone(&self.users);
        let user_id = user.id;
        tokio::spawn(async move {
            if let Err(e) = users.update_last_login(user_id, Utc::now()).await {
                warn!(user_id = %user_id, error = %e, "Failed to record last login");
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use eduhub_database::memory::MemoryUserStore;

    use super::*;
    use crate::password::hasher::dummy_hash_built;

    #[test]
    fn test_new_builds_placeholder_hash() {
        let config = AuthConfig {
            jwt_secret: "a".repeat(32),
            jwt_refresh_secret: "b".repeat(32),
            ..AuthConfig::default()
        };
        let _manager = SessionManager::new(Arc::new(MemoryUserStore::new()), &config);
        assert!(dummy_hash_built());
    }
}

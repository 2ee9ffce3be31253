//! JWT claims structure used in access and refresh tokens.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use eduhub_core::types::{InstituteId, UserId};
use eduhub_entity::user::{User, UserRole};

/// Claims embedded in every token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject: the user ID.
    pub sub: UserId,
    /// Email at issuance.
    pub email: String,
    /// Role at issuance.
    pub role: UserRole,
    /// Bound institute at issuance, if any.
    #[serde(default)]
    pub institute_id: Option<InstituteId>,
    /// Issued-at timestamp (seconds since epoch).
    pub iat: i64,
    /// Expiration timestamp (seconds since epoch).
    pub exp: i64,
    /// Unique token ID.
    pub jti: Uuid,
    /// Token type: "access" or "refresh".
    pub token_type: TokenType,
}

/// Distinguishes access tokens from refresh tokens.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum TokenType {
    /// Short-lived token for API requests.
    Access,
    /// Long-lived token for obtaining new access tokens.
    Refresh,
}

/// Identity fields carried by a token, independent of timing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenPayload {
    /// Principal ID.
    pub user_id: UserId,
    /// Principal email.
    pub email: String,
    /// Principal role.
    pub role: UserRole,
    /// Principal's institute.
    pub institute_id: Option<InstituteId>,
}

impl TokenPayload {
    /// Payload for a stored principal.
    pub fn for_user(user: &User) -> Self {
        Self {
            user_id: user.id,
            email: user.email.clone(),
            role: user.role,
            institute_id: user.institute_id,
        }
    }
}

impl Claims {
    /// The identity part of the claims.
    pub fn payload(&self) -> TokenPayload {
        TokenPayload {
            user_id: self.sub,
            email: self.email.clone(),
            role: self.role,
            institute_id: self.institute_id,
        }
    }
}

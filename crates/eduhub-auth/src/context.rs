//! Request context carrying the authenticated principal's identity.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use eduhub_core::types::{InstituteId, UserId};
use eduhub_entity::tenant::TenantOwned;
use eduhub_entity::user::UserRole;

use crate::jwt::Claims;

/// Identity of the caller, derived from a verified access token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequestContext {
    /// The authenticated user's ID.
    pub user_id: UserId,
    /// The user's email.
    pub email: String,
    /// The user's role.
    pub role: UserRole,
    /// The institute carried by the token, if any.
    pub institute_id: Option<InstituteId>,
    /// When the request was received.
    pub request_time: DateTime<Utc>,
}

impl RequestContext {
    /// Build a context from verified access-token claims.
    pub fn from_claims(claims: &Claims) -> Self {
        Self {
            user_id: claims.sub,
            email: claims.email.clone(),
            role: claims.role,
            institute_id: claims.institute_id,
            request_time: Utc::now(),
        }
    }
}

impl TenantOwned for RequestContext {
    fn institute_id(&self) -> Option<InstituteId> {
        self.institute_id
    }
}

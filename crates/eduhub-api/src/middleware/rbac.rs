//! Role checks for route handlers.

use eduhub_core::error::AppError;
use eduhub_entity::user::UserRole;

use crate::extractors::AuthUser;
use crate::state::AppState;

/// Checks that the caller may modify institute records: an institute
/// admin or an exempt role.
pub fn require_record_manager(state: &AppState, auth: &AuthUser) -> Result<(), AppError> {
    if auth.role == UserRole::InstituteAdmin || state.tenant_guard.is_exempt(auth.role) {
        return Ok(());
    }
    Err(AppError::forbidden(
        "Institute administrator access required",
    ))
}

/// Checks that the caller holds an exempt (platform) role.
pub fn require_exempt(state: &AppState, auth: &AuthUser) -> Result<(), AppError> {
    if state.tenant_guard.is_exempt(auth.role) {
        return Ok(());
    }
    Err(AppError::forbidden("Platform administrator access required"))
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use eduhub_auth::RequestContext;
    use eduhub_core::config::{AppConfig, AuthConfig};
    use eduhub_core::types::UserId;
    use eduhub_database::Stores;

    use super::*;

    fn state(exempt_roles: &[&str]) -> AppState {
        let mut config = AppConfig {
            auth: AuthConfig {
                jwt_secret: "a".repeat(32),
                jwt_refresh_secret: "b".repeat(32),
                ..AuthConfig::default()
            },
            ..AppConfig::default()
        };
        config.tenant.exempt_roles = exempt_roles.iter().map(|r| r.to_string()).collect();
        AppState::new(config, &Stores::memory()).unwrap()
    }

    fn caller(role: UserRole) -> AuthUser {
        AuthUser(RequestContext {
            user_id: UserId::generate(),
            email: "pat@oak.edu".to_string(),
            role,
            institute_id: None,
            request_time: Utc::now(),
        })
    }

    #[test]
    fn test_record_manager_roles() {
        let state = state(&["super_admin"]);
        assert!(require_record_manager(&state, &caller(UserRole::InstituteAdmin)).is_ok());
        assert!(require_record_manager(&state, &caller(UserRole::SuperAdmin)).is_ok());
        assert!(require_record_manager(&state, &caller(UserRole::Teacher)).is_err());
        assert!(require_record_manager(&state, &caller(UserRole::Student)).is_err());
    }

    #[test]
    fn test_record_manager_follows_configured_exempt_roles() {
        let state = state(&["teacher"]);
        assert!(require_record_manager(&state, &caller(UserRole::Teacher)).is_ok());
        assert!(require_record_manager(&state, &caller(UserRole::SuperAdmin)).is_err());
        assert!(require_exempt(&state, &caller(UserRole::Teacher)).is_ok());
        assert!(require_exempt(&state, &caller(UserRole::SuperAdmin)).is_err());
    }
}

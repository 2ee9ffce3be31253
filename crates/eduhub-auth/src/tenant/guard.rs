//! Request-level enforcement of institute context.

use std::collections::HashSet;

use tracing::warn;

use eduhub_core::config::TenantConfig;
use eduhub_core::error::{AppError, codes};
use eduhub_core::types::InstituteId;
use eduhub_entity::user::UserRole;

use crate::context::RequestContext;

use super::scope::TenantScope;

/// Outcome of evaluating a caller against the guard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardState {
    /// No verified identity.
    Unauthenticated,
    /// Role is exempt; any institute carried by the token is ignored.
    Exempt,
    /// Non-exempt caller bound to an institute.
    TenantBound(InstituteId),
    /// Non-exempt caller with no institute.
    Rejected,
}

/// Decides whether a caller may touch tenant-scoped data, and under which
/// scope.
#[derive(Debug, Clone)]
pub struct TenantGuard {
    exempt_roles: HashSet<UserRole>,
}

impl TenantGuard {
    /// Builds a guard from configuration. Unknown role names are a
    /// configuration error.
    pub fn new(config: &TenantConfig) -> Result<Self, AppError> {
        let exempt_roles = config
            .exempt_roles
            .iter()
            .map(|name| {
                name.parse::<UserRole>().map_err(|_| {
                    AppError::configuration(format!(
                        "tenant.exempt_roles: unknown role '{name}'"
                    ))
                })
            })
            .collect::<Result<HashSet<_>, _>>()?;

        Ok(Self { exempt_roles })
    }

    /// Builds a guard with an explicit exempt set.
    pub fn with_exempt_roles(roles: impl IntoIterator<Item = UserRole>) -> Self {
        Self {
            exempt_roles: roles.into_iter().collect(),
        }
    }

    /// Whether the role bypasses institute scoping.
    pub fn is_exempt(&self, role: UserRole) -> bool {
        self.exempt_roles.contains(&role)
    }

    /// Classifies the caller.
    pub fn evaluate(&self, ctx: Option<&RequestContext>) -> GuardState {
        match ctx {
            None => GuardState::Unauthenticated,
            Some(ctx) if self.is_exempt(ctx.role) => GuardState::Exempt,
            Some(RequestContext {
                institute_id: Some(id),
                ..
            }) => GuardState::TenantBound(*id),
            Some(_) => GuardState::Rejected,
        }
    }

    /// Classifies the caller and converts the outcome into a scope or an
    /// error.
    pub fn enforce(&self, ctx: Option<&RequestContext>) -> Result<TenantScope, AppError> {
        match self.evaluate(ctx) {
            GuardState::Unauthenticated => Err(AppError::unauthorized("Authentication required")
                .with_code(codes::MISSING_TOKEN)),
            GuardState::Exempt => Ok(TenantScope::AllInstitutes),
            GuardState::TenantBound(id) => Ok(TenantScope::Institute(id)),
            GuardState::Rejected => {
                if let Some(ctx) = ctx {
                    warn!(
                        user_id = %ctx.user_id,
                        role = %ctx.role,
                        "Rejected request without institute context"
                    );
                }
                Err(AppError::missing_institute_context())
            }
        }
    }
}

impl Default for TenantGuard {
    fn default() -> Self {
        Self::with_exempt_roles([UserRole::SuperAdmin])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use eduhub_core::error::ErrorKind;
    use eduhub_core::types::UserId;

    fn ctx(role: UserRole, institute_id: Option<InstituteId>) -> RequestContext {
        RequestContext {
            user_id: UserId::generate(),
            email: "someone@school.edu".into(),
            role,
            institute_id,
            request_time: Utc::now(),
        }
    }

    #[test]
    fn test_exempt_roles_never_rejected() {
        let guard = TenantGuard::default();
        for institute in [None, Some(InstituteId::generate())] {
            let c = ctx(UserRole::SuperAdmin, institute);
            assert_eq!(guard.evaluate(Some(&c)), GuardState::Exempt);
            assert_eq!(guard.enforce(Some(&c)).unwrap(), TenantScope::AllInstitutes);
        }
    }

    #[test]
    fn test_non_exempt_without_institute_rejected() {
        let guard = TenantGuard::default();
        for role in [UserRole::InstituteAdmin, UserRole::Teacher, UserRole::Student] {
            let c = ctx(role, None);
            assert_eq!(guard.evaluate(Some(&c)), GuardState::Rejected);

            let err = guard.enforce(Some(&c)).unwrap_err();
            assert_eq!(err.kind, ErrorKind::Forbidden);
            assert_eq!(err.code, Some(codes::MISSING_INSTITUTE_CONTEXT));
        }
    }

    #[test]
    fn test_bound_caller_scoped_to_institute() {
        let guard = TenantGuard::default();
        let id = InstituteId::generate();
        let c = ctx(UserRole::Teacher, Some(id));
        assert_eq!(guard.evaluate(Some(&c)), GuardState::TenantBound(id));
        assert_eq!(guard.enforce(Some(&c)).unwrap(), TenantScope::Institute(id));
    }

    #[test]
    fn test_unauthenticated() {
        let guard = TenantGuard::default();
        assert_eq!(guard.evaluate(None), GuardState::Unauthenticated);
        assert_eq!(guard.enforce(None).unwrap_err().kind, ErrorKind::Unauthorized);
    }

    #[test]
    fn test_config_parses_roles() {
        let guard = TenantGuard::new(&TenantConfig {
            exempt_roles: vec!["super-admin".into(), "Institute_Admin".into()],
        })
        .unwrap();
        assert!(guard.is_exempt(UserRole::SuperAdmin));
        assert!(guard.is_exempt(UserRole::InstituteAdmin));
        assert!(!guard.is_exempt(UserRole::Teacher));

        let bad = TenantGuard::new(&TenantConfig {
            exempt_roles: vec!["janitor".into()],
        });
        assert!(bad.is_err());
    }
}

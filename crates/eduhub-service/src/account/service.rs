//! Account operations: registration, profile lookup, and administrative
//! institute assignment.

use std::sync::Arc;

use tracing::info;

use eduhub_auth::password::{PasswordHasher, PasswordValidator};
use eduhub_auth::{RequestContext, TenantGuard, TenantScope};
use eduhub_core::config::AuthConfig;
use eduhub_core::error::AppError;
use eduhub_core::types::{InstituteId, UserId};
use eduhub_database::store::{InstituteStore, UserStore};
use eduhub_entity::user::{CreateUser, User, UserRole};

/// Input for a new principal.
#[derive(Clone)]
pub struct Registration {
    /// Login email.
    pub email: String,
    /// Display name.
    pub name: String,
    /// Plaintext password, validated and hashed here.
    pub password: String,
    /// Requested role.
    pub role: UserRole,
}

/// Handles principal lifecycle operations.
#[derive(Clone)]
pub struct AccountService {
    users: Arc<dyn UserStore>,
    institutes: Arc<dyn InstituteStore>,
    hasher: PasswordHasher,
    validator: PasswordValidator,
    guard: TenantGuard,
}

impl AccountService {
    /// Creates a new account service.
    pub fn new(
        users: Arc<dyn UserStore>,
        institutes: Arc<dyn InstituteStore>,
        auth: &AuthConfig,
        guard: TenantGuard,
    ) -> Self {
        Self {
            users,
            institutes,
            hasher: PasswordHasher::new(),
            validator: PasswordValidator::new(auth),
            guard,
        }
    }

    /// Registers a principal with no institute.
    ///
    /// Exempt roles cannot be self-assigned.
    pub async fn register(&self, reg: Registration) -> Result<User, AppError> {
        if self.guard.is_exempt(reg.role) {
            return Err(AppError::forbidden(format!(
                "Role '{}' cannot be requested at registration",
                reg.role
            )));
        }

        let email = reg.email.trim().to_string();
        let name = reg.name.trim().to_string();
        if name.is_empty() {
            return Err(AppError::validation("Name cannot be empty"));
        }

        self.validator
            .validate(&reg.password, &[email.as_str(), name.as_str()])?;

        if self.users.find_by_email(&email).await?.is_some() {
            return Err(AppError::conflict("Email already in use"));
        }

        let password_hash = self.hasher.hash_password(&reg.password)?;
        let user = self
            .users
            .create(&CreateUser {
                email,
                name,
                password_hash,
                role: reg.role,
            })
            .await?;

        info!(user_id = %user.id, role = %user.role, "Principal registered");

        Ok(user)
    }

    /// The caller's stored profile.
    pub async fn profile(&self, ctx: &RequestContext) -> Result<User, AppError> {
        self.users
            .find_by_id(ctx.user_id)
            .await?
            .ok_or_else(|| AppError::not_found("User not found"))
    }

    /// Moves any principal to an institute. Cross-institute scope only.
    pub async fn assign_institute(
        &self,
        scope: TenantScope,
        user_id: UserId,
        institute_id: InstituteId,
    ) -> Result<User, AppError> {
        if !scope.is_all() {
            return Err(AppError::forbidden(
                "Only platform administrators may reassign institutes",
            ));
        }

        self.institutes
            .find_by_id(institute_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Institute {institute_id} not found")))?;

        if !self.users.reassign_institute(user_id, institute_id).await? {
            return Err(AppError::not_found(format!("User {user_id} not found")));
        }

        info!(user_id = %user_id, institute_id = %institute_id, "Institute reassigned");

        self.users
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("User {user_id} not found")))
    }
}

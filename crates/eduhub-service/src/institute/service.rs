//! Institute operations.

use std::sync::Arc;

use tracing::{info, warn};

use eduhub_auth::{RequestContext, TenantGuard, TenantScope};
use eduhub_core::error::AppError;
use eduhub_database::store::{InstituteStore, UserStore};
use eduhub_entity::institute::{CreateInstitute, Institute};
use eduhub_entity::user::UserRole;

/// Creates institutes and resolves the caller's institute.
#[derive(Clone)]
pub struct InstituteService {
    institutes: Arc<dyn InstituteStore>,
    users: Arc<dyn UserStore>,
    guard: TenantGuard,
}

impl InstituteService {
    /// Creates a new institute service.
    pub fn new(
        institutes: Arc<dyn InstituteStore>,
        users: Arc<dyn UserStore>,
        guard: TenantGuard,
    ) -> Self {
        Self {
            institutes,
            users,
            guard,
        }
    }

    /// Creates an institute.
    ///
    /// An institute admin without an institute becomes bound to the new
    /// one; an admin who already has one cannot create another. Exempt
    /// callers create institutes without being bound.
    pub async fn create(
        &self,
        ctx: &RequestContext,
        data: CreateInstitute,
    ) -> Result<Institute, AppError> {
        let exempt = self.guard.is_exempt(ctx.role);
        if !exempt && ctx.role != UserRole::InstituteAdmin {
            return Err(AppError::forbidden(
                "Only institute administrators may create an institute",
            ));
        }

        let name = data.name.trim();
        if name.is_empty() {
            return Err(AppError::validation("Institute name cannot be empty"));
        }

        if !exempt {
            let current = self
                .users
                .find_by_id(ctx.user_id)
                .await?
                .ok_or_else(|| AppError::not_found("User not found"))?;
            if current.institute_id.is_some() {
                return Err(AppError::conflict("You already belong to an institute"));
            }
        }

        let institute = self
            .institutes
            .create(&CreateInstitute {
                name: name.to_string(),
                institute_type: data.institute_type,
            })
            .await?;

        if !exempt && !self.users.bind_institute(ctx.user_id, institute.id).await? {
            // Lost a race with a concurrent create; the new institute stays
            // orphaned but the caller keeps the first binding.
            warn!(
                user_id = %ctx.user_id,
                institute_id = %institute.id,
                "Creator was bound to another institute concurrently"
            );
            return Err(AppError::conflict("You already belong to an institute"));
        }

        info!(
            user_id = %ctx.user_id,
            institute_id = %institute.id,
            "Institute created"
        );

        Ok(institute)
    }

    /// The institute the scope is bound to.
    pub async fn current(&self, scope: TenantScope) -> Result<Institute, AppError> {
        let id = scope.institute_id().ok_or_else(|| {
            AppError::not_found("Platform administrators have no current institute")
        })?;

        self.institutes
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Institute {id} not found")))
    }

    /// Every institute. Cross-institute scope only.
    pub async fn list_all(&self, scope: TenantScope) -> Result<Vec<Institute>, AppError> {
        if !scope.is_all() {
            return Err(AppError::forbidden(
                "Only platform administrators may list institutes",
            ));
        }
        self.institutes.find_all().await
    }
}

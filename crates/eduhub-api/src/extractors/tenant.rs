//! `Tenant` extractor: the scope attached by the tenant guard.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use eduhub_auth::TenantScope;
use eduhub_core::error::AppError;

use crate::error::ApiError;

/// The request's [`TenantScope`].
///
/// Only routes behind the `require_tenant` middleware carry a scope; using
/// this extractor anywhere else fails with `MISSING_TENANT_CONTEXT`.
#[derive(Debug, Clone, Copy)]
pub struct Tenant(pub TenantScope);

impl<S: Send + Sync> FromRequestParts<S> for Tenant {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<TenantScope>()
            .copied()
            .map(Tenant)
            .ok_or_else(|| {
                tracing::error!(path = %parts.uri.path(), "Tenant scope requested on an unguarded route");
                AppError::missing_tenant_context().into()
            })
    }
}

//! Tenant guard middleware.

use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::Response;

use eduhub_auth::RequestContext;

use crate::error::ApiError;
use crate::state::AppState;

/// Resolves the caller's [`TenantScope`](eduhub_auth::TenantScope) and
/// attaches it to the request. Must run after `require_auth`.
pub async fn require_tenant(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let scope = state
        .tenant_guard
        .enforce(request.extensions().get::<RequestContext>())?;

    request.extensions_mut().insert(scope);
    Ok(next.run(request).await)
}

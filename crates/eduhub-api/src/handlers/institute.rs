//! Institute handlers.

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;

use eduhub_auth::TenantScope;
use eduhub_entity::institute::Institute;

use crate::dto::request::CreateInstituteRequest;
use crate::dto::response::ApiResponse;
use crate::error::ApiResult;
use crate::extractors::{AuthUser, Tenant, ValidatedJson};
use crate::middleware::rbac::require_exempt;
use crate::state::AppState;

/// POST /api/institutes
pub async fn create_institute(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(req): ValidatedJson<CreateInstituteRequest>,
) -> ApiResult<(StatusCode, Json<ApiResponse<Institute>>)> {
    let institute = state.institute_service.create(&auth, req.into()).await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::ok(institute))))
}

/// GET /api/institutes
pub async fn list_institutes(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<Json<ApiResponse<Vec<Institute>>>> {
    require_exempt(&state, &auth)?;
    let institutes = state
        .institute_service
        .list_all(TenantScope::AllInstitutes)
        .await?;
    Ok(Json(ApiResponse::ok(institutes)))
}

/// GET /api/institutes/current
pub async fn current_institute(
    State(state): State<AppState>,
    Tenant(scope): Tenant,
) -> ApiResult<Json<ApiResponse<Institute>>> {
    let institute = state.institute_service.current(scope).await?;
    Ok(Json(ApiResponse::ok(institute)))
}

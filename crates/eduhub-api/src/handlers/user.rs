//! Administrative user handlers.

use axum::Json;
use axum::extract::State;

use eduhub_core::types::UserId;

use crate::dto::request::AssignInstituteRequest;
use crate::dto::response::{ApiResponse, UserResponse};
use crate::error::ApiResult;
use crate::extractors::{IdPath, Tenant, ValidatedJson};
use crate::state::AppState;

/// PUT /api/users/{id}/institute
pub async fn assign_institute(
    State(state): State<AppState>,
    Tenant(scope): Tenant,
    IdPath(user_id): IdPath<UserId>,
    ValidatedJson(req): ValidatedJson<AssignInstituteRequest>,
) -> ApiResult<Json<ApiResponse<UserResponse>>> {
    let user = state
        .account_service
        .assign_institute(scope, user_id, req.institute_id)
        .await?;
    Ok(Json(ApiResponse::ok(user.into())))
}

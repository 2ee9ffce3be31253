//! Handlers shared by the course, student and teacher routes.
//!
//! Each record type is mounted with the same four endpoints; the type
//! parameter selects the service and the create body.

use std::str::FromStr;

use axum::Json;
use axum::extract::{Query, State};
use axum::http::StatusCode;

use eduhub_entity::record::{Course, Student, Teacher};
use eduhub_entity::tenant::{NewRecord, TenantRecord};
use eduhub_service::RecordService;

use crate::dto::request::{
    CreateCourseRequest, CreateRecordRequest, CreateStudentRequest, CreateTeacherRequest,
    ListParams,
};
use crate::dto::response::{ApiResponse, MessageResponse};
use crate::error::ApiResult;
use crate::extractors::{AuthUser, IdPath, Tenant, ValidatedJson};
use crate::middleware::rbac::require_record_manager;
use crate::state::AppState;

/// A record type exposed over HTTP.
pub trait Resource: TenantRecord {
    /// Body accepted by the create endpoint.
    type Create: CreateRecordRequest<New: NewRecord<Record = Self>>;

    /// The service for this record type.
    fn service(state: &AppState) -> &RecordService<Self>;
}

impl Resource for Course {
    type Create = CreateCourseRequest;

    fn service(state: &AppState) -> &RecordService<Self> {
        &state.course_service
    }
}

impl Resource for Student {
    type Create = CreateStudentRequest;

    fn service(state: &AppState) -> &RecordService<Self> {
        &state.student_service
    }
}

impl Resource for Teacher {
    type Create = CreateTeacherRequest;

    fn service(state: &AppState) -> &RecordService<Self> {
        &state.teacher_service
    }
}

/// GET /api/{records}?q=&institute_id=
pub async fn list<R>(
    State(state): State<AppState>,
    Tenant(scope): Tenant,
    Query(params): Query<ListParams>,
) -> ApiResult<Json<ApiResponse<Vec<R>>>>
where
    R: Resource,
    R::Id: FromStr,
{
    let records = R::service(&state).list(scope, params.into_query()?).await?;
    Ok(Json(ApiResponse::ok(records)))
}

/// GET /api/{records}/{id}
pub async fn get<R>(
    State(state): State<AppState>,
    Tenant(scope): Tenant,
    IdPath(id): IdPath<R::Id>,
) -> ApiResult<Json<ApiResponse<R>>>
where
    R: Resource,
    R::Id: FromStr,
{
    let record = R::service(&state).get(scope, id).await?;
    Ok(Json(ApiResponse::ok(record)))
}

/// POST /api/{records}
pub async fn create<R>(
    State(state): State<AppState>,
    auth: AuthUser,
    Tenant(scope): Tenant,
    ValidatedJson(req): ValidatedJson<R::Create>,
) -> ApiResult<(StatusCode, Json<ApiResponse<R>>)>
where
    R: Resource,
    R::Id: FromStr,
{
    require_record_manager(&state, &auth)?;

    let (input, target) = req.into_parts();
    let record = R::service(&state).create(scope, input, target).await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::ok(record))))
}

/// DELETE /api/{records}/{id}
pub async fn delete<R>(
    State(state): State<AppState>,
    auth: AuthUser,
    Tenant(scope): Tenant,
    IdPath(id): IdPath<R::Id>,
) -> ApiResult<Json<ApiResponse<MessageResponse>>>
where
    R: Resource,
    R::Id: FromStr,
{
    require_record_manager(&state, &auth)?;

    R::service(&state).delete(scope, id).await?;
    Ok(Json(ApiResponse::ok(MessageResponse::new(format!(
        "{} deleted",
        R::LABEL
    )))))
}

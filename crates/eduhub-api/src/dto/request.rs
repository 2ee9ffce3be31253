//! Request DTOs with validation.

use serde::{Deserialize, Serialize};
use serde::de::DeserializeOwned;
use validator::Validate;

use eduhub_core::error::AppError;
use eduhub_core::types::InstituteId;
use eduhub_entity::institute::{CreateInstitute, InstituteType};
use eduhub_entity::record::{NewCourse, NewStudent, NewTeacher};
use eduhub_entity::tenant::NewRecord;
use eduhub_entity::user::UserRole;
use eduhub_service::{ListQuery, Registration};

/// Registration request body.
#[derive(Clone, Deserialize, Validate)]
pub struct RegisterRequest {
    /// Login email.
    #[validate(email(message = "must be a valid email address"))]
    pub email: String,
    /// Display name.
    #[validate(length(min = 1, max = 100, message = "must be 1 to 100 characters"))]
    pub name: String,
    /// Password; strength is checked by the account service.
    #[validate(length(min = 1, message = "is required"))]
    pub password: String,
    /// Requested role. Defaults to `student`.
    #[serde(default = "default_role")]
    pub role: UserRole,
}

fn default_role() -> UserRole {
    UserRole::Student
}

impl From<RegisterRequest> for Registration {
    fn from(req: RegisterRequest) -> Self {
        Registration {
            email: req.email,
            name: req.name,
            password: req.password,
            role: req.role,
        }
    }
}

/// Login request body.
#[derive(Clone, Deserialize, Validate)]
pub struct LoginRequest {
    /// Email.
    #[validate(length(min = 1, message = "is required"))]
    pub email: String,
    /// Password.
    #[validate(length(min = 1, message = "is required"))]
    pub password: String,
}

/// Create institute request.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateInstituteRequest {
    /// Display name.
    #[validate(length(min = 1, max = 200, message = "must be 1 to 200 characters"))]
    pub name: String,
    /// Organization type.
    pub institute_type: InstituteType,
}

impl From<CreateInstituteRequest> for CreateInstitute {
    fn from(req: CreateInstituteRequest) -> Self {
        CreateInstitute {
            name: req.name,
            institute_type: req.institute_type,
        }
    }
}

/// Administrative institute assignment.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct AssignInstituteRequest {
    /// Target institute.
    pub institute_id: InstituteId,
}

/// Query string accepted by record list endpoints.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListParams {
    /// Free-text search on the record's title or name.
    pub q: Option<String>,
    /// Narrow to one institute (platform administrators only).
    pub institute_id: Option<String>,
}

impl ListParams {
    /// Parses the raw query into a service query.
    pub fn into_query(self) -> Result<ListQuery, AppError> {
        let institute_id = self
            .institute_id
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(InstituteId::parse)
            .transpose()?;

        Ok(ListQuery {
            institute_id,
            search: self.q,
        })
    }
}

/// A create body for an institute-scoped record.
///
/// The optional `institute_id` is only honored for platform administrators.
pub trait CreateRecordRequest: DeserializeOwned + Validate + Send + 'static {
    /// Entity input built from the body.
    type New: NewRecord;

    /// Splits the body into the entity input and the requested institute.
    fn into_parts(self) -> (Self::New, Option<InstituteId>);
}

/// Create course request.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateCourseRequest {
    /// Course title.
    #[validate(length(min = 1, max = 200, message = "must be 1 to 200 characters"))]
    pub title: String,
    /// Optional description.
    #[validate(length(max = 5000))]
    pub description: Option<String>,
    /// Target institute (platform administrators only).
    pub institute_id: Option<InstituteId>,
}

impl CreateRecordRequest for CreateCourseRequest {
    type New = NewCourse;

    fn into_parts(self) -> (NewCourse, Option<InstituteId>) {
        (
            NewCourse {
                title: self.title.trim().to_string(),
                description: self.description,
            },
            self.institute_id,
        )
    }
}

/// Create student request.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateStudentRequest {
    /// Full name.
    #[validate(length(min = 1, max = 100, message = "must be 1 to 100 characters"))]
    pub name: String,
    /// Contact email.
    #[validate(email(message = "must be a valid email address"))]
    pub email: String,
    /// Target institute (platform administrators only).
    pub institute_id: Option<InstituteId>,
}

impl CreateRecordRequest for CreateStudentRequest {
    type New = NewStudent;

    fn into_parts(self) -> (NewStudent, Option<InstituteId>) {
        (
            NewStudent {
                name: self.name.trim().to_string(),
                email: self.email,
            },
            self.institute_id,
        )
    }
}

/// Create teacher request.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateTeacherRequest {
    /// Full name.
    #[validate(length(min = 1, max = 100, message = "must be 1 to 100 characters"))]
    pub name: String,
    /// Contact email.
    #[validate(email(message = "must be a valid email address"))]
    pub email: String,
    /// Primary subject.
    #[validate(length(max = 100))]
    pub subject: Option<String>,
    /// Target institute (platform administrators only).
    pub institute_id: Option<InstituteId>,
}

impl CreateRecordRequest for CreateTeacherRequest {
    type New = NewTeacher;

    fn into_parts(self) -> (NewTeacher, Option<InstituteId>) {
        (
            NewTeacher {
                name: self.name.trim().to_string(),
                email: self.email,
                subject: self.subject,
            },
            self.institute_id,
        )
    }
}

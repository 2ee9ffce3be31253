//! Course entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use eduhub_core::types::{CourseId, InstituteId};

use crate::tenant::{NewRecord, TenantOwned, TenantRecord};

/// A course offered by an institute.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Course {
    /// Unique course identifier.
    pub id: CourseId,
    /// Owning institute.
    pub institute_id: InstituteId,
    /// Course title.
    pub title: String,
    /// Optional long description.
    pub description: Option<String>,
    /// When the course was created.
    pub created_at: DateTime<Utc>,
}

impl TenantOwned for Course {
    fn institute_id(&self) -> Option<InstituteId> {
        Some(self.institute_id)
    }
}

impl TenantRecord for Course {
    type Id = CourseId;

    const TABLE: &'static str = "courses";
    const COLUMNS: &'static [&'static str] = &["id", "institute_id", "title", "description"];
    const LABEL: &'static str = "Course";
    const SEARCH_COLUMN: &'static str = "title";

    fn id(&self) -> CourseId {
        self.id
    }
}

/// Input for a new course.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewCourse {
    /// Course title.
    pub title: String,
    /// Optional long description.
    pub description: Option<String>,
}

impl NewRecord for NewCourse {
    type Record = Course;

    fn into_record(self, institute_id: InstituteId) -> Course {
        Course {
            id: CourseId::generate(),
            institute_id,
            title: self.title,
            description: self.description,
            created_at: Utc::now(),
        }
    }
}

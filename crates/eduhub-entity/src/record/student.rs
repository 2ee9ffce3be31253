//! Student entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use eduhub_core::types::{InstituteId, StudentId};

use crate::tenant::{NewRecord, TenantOwned, TenantRecord};

/// A student enrolled at an institute.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Student {
    /// Unique student identifier.
    pub id: StudentId,
    /// Owning institute.
    pub institute_id: InstituteId,
    /// Full name.
    pub name: String,
    /// Contact email.
    pub email: String,
    /// Enrollment time.
    pub enrolled_at: DateTime<Utc>,
}

impl TenantOwned for Student {
    fn institute_id(&self) -> Option<InstituteId> {
        Some(self.institute_id)
    }
}

impl TenantRecord for Student {
    type Id = StudentId;

    const TABLE: &'static str = "students";
    const COLUMNS: &'static [&'static str] = &["id", "institute_id", "name", "email"];
    const LABEL: &'static str = "Student";
    const SEARCH_COLUMN: &'static str = "name";

    fn id(&self) -> StudentId {
        self.id
    }
}

/// Input for a new student.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewStudent {
    /// Full name.
    pub name: String,
    /// Contact email.
    pub email: String,
}

impl NewRecord for NewStudent {
    type Record = Student;

    fn into_record(self, institute_id: InstituteId) -> Student {
        Student {
            id: StudentId::generate(),
            institute_id,
            name: self.name,
            email: self.email,
            enrolled_at: Utc::now(),
        }
    }
}

//! Teacher entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use eduhub_core::types::{InstituteId, TeacherId};

use crate::tenant::{NewRecord, TenantOwned, TenantRecord};

/// A member of an institute's teaching staff.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Teacher {
    /// Unique teacher identifier.
    pub id: TeacherId,
    /// Owning institute.
    pub institute_id: InstituteId,
    /// Full name.
    pub name: String,
    /// Contact email.
    pub email: String,
    /// Primary subject taught.
    pub subject: Option<String>,
    /// When the teacher joined.
    pub joined_at: DateTime<Utc>,
}

impl TenantOwned for Teacher {
    fn institute_id(&self) -> Option<InstituteId> {
        Some(self.institute_id)
    }
}

impl TenantRecord for Teacher {
    type Id = TeacherId;

    const TABLE: &'static str = "teachers";
    const COLUMNS: &'static [&'static str] = &["id", "institute_id", "name", "email", "subject"];
    const LABEL: &'static str = "Teacher";
    const SEARCH_COLUMN: &'static str = "name";

    fn id(&self) -> TeacherId {
        self.id
    }
}

/// Input for a new teacher.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewTeacher {
    /// Full name.
    pub name: String,
    /// Contact email.
    pub email: String,
    /// Primary subject taught.
    pub subject: Option<String>,
}

impl NewRecord for NewTeacher {
    type Record = Teacher;

    fn into_record(self, institute_id: InstituteId) -> Teacher {
        Teacher {
            id: TeacherId::generate(),
            institute_id,
            name: self.name,
            email: self.email,
            subject: self.subject,
            joined_at: Utc::now(),
        }
    }
}

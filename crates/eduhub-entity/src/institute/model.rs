//! Institute entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use eduhub_core::types::InstituteId;

use super::kind::InstituteType;

/// An institute. Owns every tenant-scoped record.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Institute {
    /// Unique institute identifier.
    pub id: InstituteId,
    /// Display name.
    pub name: String,
    /// Organization type.
    pub institute_type: InstituteType,
    /// When the institute was created.
    pub created_at: DateTime<Utc>,
}

/// Data required to create an institute.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateInstitute {
    /// Display name.
    pub name: String,
    /// Organization type.
    pub institute_type: InstituteType,
}

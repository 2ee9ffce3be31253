//! Tenant ownership traits shared by every institute-scoped entity.

use std::fmt::Display;
use std::hash::Hash;

use serde::Serialize;
use serde::de::DeserializeOwned;
use uuid::Uuid;

use eduhub_core::types::{FilterValue, InstituteId};

/// Name of the tenant column on every scoped table.
pub const TENANT_COLUMN: &str = "institute_id";

/// Anything that may belong to an institute.
pub trait TenantOwned {
    /// The owning institute, if any.
    fn institute_id(&self) -> Option<InstituteId>;
}

/// A row in an institute-scoped table.
///
/// `COLUMNS` is the allow-list of filterable columns; the serialized form
/// of the record uses the same names so filters evaluate identically in
/// SQL and in memory.
pub trait TenantRecord:
    TenantOwned + Serialize + DeserializeOwned + Clone + Send + Sync + 'static
{
    /// Strongly typed primary key.
    type Id: Copy + Eq + Hash + Display + Into<Uuid> + Into<FilterValue> + Send + Sync + 'static;

    /// Table name.
    const TABLE: &'static str;
    /// Columns that filters may reference.
    const COLUMNS: &'static [&'static str];
    /// Human-readable entity name for error messages.
    const LABEL: &'static str;
    /// Text column matched by free-text search.
    const SEARCH_COLUMN: &'static str;

    /// Primary key of this row.
    fn id(&self) -> Self::Id;
}

/// Caller-supplied fields for a new scoped row. The institute is never
/// taken from the caller's payload; it is supplied by the tenant scope.
pub trait NewRecord: Send + Sync {
    /// The row type this input builds.
    type Record: TenantRecord;

    /// Build the row for the given institute.
    fn into_record(self, institute_id: InstituteId) -> Self::Record;
}

//! Institute type enumeration.

use serde::{Deserialize, Serialize};
use std::fmt;

/// What sort of organization an institute is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "institute_type", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum InstituteType {
    /// Primary or secondary school.
    School,
    /// College.
    College,
    /// University.
    University,
    /// Coaching or tutoring center.
    Coaching,
    /// Anything else.
    Other,
}

impl fmt::Display for InstituteType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::School => "school",
            Self::College => "college",
            Self::University => "university",
            Self::Coaching => "coaching",
            Self::Other => "other",
        };
        f.write_str(s)
    }
}

//! User role enumeration.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Closed set of principal roles.
///
/// `SuperAdmin` operates the platform across institutes; the others act
/// inside a single institute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "user_role", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum UserRole {
    /// Platform operator.
    SuperAdmin,
    /// Administers one institute.
    InstituteAdmin,
    /// Teaching staff of an institute.
    Teacher,
    /// Enrolled learner.
    Student,
}

impl UserRole {
    /// All roles, for validation messages and tests.
    pub const ALL: [UserRole; 4] = [
        Self::SuperAdmin,
        Self::InstituteAdmin,
        Self::Teacher,
        Self::Student,
    ];

    /// Return the role as a snake_case string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::SuperAdmin => "super_admin",
            Self::InstituteAdmin => "institute_admin",
            Self::Teacher => "teacher",
            Self::Student => "student",
        }
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for UserRole {
    type Err = eduhub_core::AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase().replace('-', "_");
        Self::ALL
            .into_iter()
            .find(|role| role.as_str() == normalized)
            .ok_or_else(|| {
                eduhub_core::AppError::validation(format!(
                    "Invalid user role: '{s}'. Expected one of: super_admin, institute_admin, teacher, student"
                ))
            })
    }
}

//! Newtype wrappers around [`uuid::Uuid`] for domain identifiers.
//!
//! Distinct types keep a `UserId` from being passed where an `InstituteId`
//! is expected, which matters most for the tenant column. With the `sqlx`
//! feature each type is a transparent PostgreSQL `UUID`.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::AppError;
use crate::types::filter::FilterValue;

macro_rules! define_id {
    (
        $(#[$meta:meta])*
        $name:ident, $label:literal
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[cfg_attr(feature = "sqlx", derive(sqlx::Type), sqlx(transparent))]
        #[serde(transparent)]
        pub struct $name(pub Uuid);

        impl $name {
            /// Generate a fresh random identifier.
            pub fn generate() -> Self {
                Self(Uuid::new_v4())
            }

            /// Wrap an existing UUID.
            pub fn from_uuid(uuid: Uuid) -> Self {
                Self(uuid)
            }

            /// Return the inner UUID value.
            pub fn into_uuid(self) -> Uuid {
                self.0
            }

            /// Parse from user input, mapping failure to a validation error.
            pub fn parse(s: &str) -> Result<Self, AppError> {
                s.parse()
                    .map_err(|_| AppError::validation(format!("Invalid {}: {s}", $label)))
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                self.0.fmt(f)
            }
        }

        impl FromStr for $name {
            type Err = uuid::Error;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Uuid::parse_str(s).map(Self)
            }
        }

        impl From<Uuid> for $name {
            fn from(uuid: Uuid) -> Self {
                Self(uuid)
            }
        }

        impl From<$name> for Uuid {
            fn from(id: $name) -> Uuid {
                id.0
            }
        }

        impl From<$name> for FilterValue {
            fn from(id: $name) -> FilterValue {
                FilterValue::Uuid(id.0)
            }
        }
    };
}

define_id!(
    /// Identifier of a principal (user account).
    UserId, "user id"
);

define_id!(
    /// Identifier of an institute, the tenant boundary.
    InstituteId, "institute id"
);

define_id!(
    /// Identifier of a course.
    CourseId, "course id"
);

define_id!(
    /// Identifier of a student record.
    StudentId, "student id"
);

define_id!(
    /// Identifier of a teacher record.
    TeacherId, "teacher id"
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_is_unique() {
        assert_ne!(UserId::generate(), UserId::generate());
    }

    #[test]
    fn test_display_matches_uuid() {
        let uuid = Uuid::new_v4();
        assert_eq!(InstituteId::from_uuid(uuid).to_string(), uuid.to_string());
    }

    #[test]
    fn test_parse_rejects_garbage() {
        let err = CourseId::parse("not-a-uuid").unwrap_err();
        assert_eq!(err.kind, crate::error::ErrorKind::Validation);
        assert!(err.message.contains("course id"));
    }

    #[test]
    fn test_serializes_as_bare_uuid() {
        let uuid = Uuid::new_v4();
        let json = serde_json::to_string(&InstituteId::from_uuid(uuid)).expect("serialize");
        assert_eq!(json, format!("\"{uuid}\""));
    }
}

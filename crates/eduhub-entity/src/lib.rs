//! # eduhub-entity
//!
//! Domain entity models for EduHub. Every struct in this crate represents
//! a database table row or a domain value object. Database entities derive
//! `sqlx::FromRow`; tenant-scoped rows implement [`tenant::TenantRecord`].

pub mod institute;
pub mod record;
pub mod tenant;
pub mod user;

pub use institute::{Institute, InstituteType};
pub use record::{Course, Student, Teacher};
pub use tenant::{NewRecord, TENANT_COLUMN, TenantOwned, TenantRecord};
pub use user::{User, UserRole};

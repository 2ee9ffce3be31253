//! # eduhub-service
//!
//! Business logic service layer for EduHub. Services take the caller's
//! identity or [`TenantScope`](eduhub_auth::TenantScope) explicitly and
//! scope every store call through it.
//!
//! Services follow constructor injection; store dependencies are provided
//! at construction time as `Arc<dyn …Store>`.

pub mod account;
pub mod institute;
pub mod record;

pub use account::{AccountService, Registration};
pub use institute::InstituteService;
pub use record::{CourseService, ListQuery, RecordService, StudentService, TeacherService};

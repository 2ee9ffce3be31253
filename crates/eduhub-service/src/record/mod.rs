//! Services over institute-scoped records.

pub mod service;

pub use service::{ListQuery, RecordService};

use eduhub_entity::record::{Course, Student, Teacher};

/// Course catalogue.
pub type CourseService = RecordService<Course>;
/// Student roster.
pub type StudentService = RecordService<Student>;
/// Teacher roster.
pub type TeacherService = RecordService<Teacher>;

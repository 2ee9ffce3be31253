//! Institute-scoped records: courses and rosters.

pub mod course;
pub mod student;
pub mod teacher;

pub use course::{Course, NewCourse};
pub use student::{NewStudent, Student};
pub use teacher::{NewTeacher, Teacher};

//! PostgreSQL repository implementations for all EduHub entities.

pub mod institute;
pub mod record;
pub mod user;

pub use institute::InstituteRepository;
pub use record::{PgRecord, PgRecordRepository};
pub use user::UserRepository;

//! Process-local store implementations backed by `DashMap`.
//!
//! Filters are evaluated against each record's JSON form, so a condition
//! behaves the same here as in the PostgreSQL repositories.

pub mod institute;
pub mod record;
pub mod user;

pub use institute::MemoryInstituteStore;
pub use record::MemoryRecordStore;
pub use user::MemoryUserStore;

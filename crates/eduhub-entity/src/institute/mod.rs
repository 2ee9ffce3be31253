//! Institute (tenant) entities.

pub mod kind;
pub mod model;

pub use kind::InstituteType;
pub use model::{CreateInstitute, Institute};

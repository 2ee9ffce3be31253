//! # eduhub-core
//!
//! Core crate for EduHub. Contains configuration schemas, typed
//! identifiers, dynamic query filters, and the unified error system.
//!
//! This crate has **no** internal dependencies on other EduHub crates.

pub mod config;
pub mod error;
pub mod result;
pub mod types;

pub use error::AppError;
pub use result::AppResult;

//! Core type definitions used across the EduHub workspace.

pub mod filter;
pub mod id;

pub use filter::{Filter, FilterField, FilterOp, FilterValue};
pub use id::*;

//! Principal registration, profile, and institute assignment.

pub mod service;

pub use service::{AccountService, Registration};

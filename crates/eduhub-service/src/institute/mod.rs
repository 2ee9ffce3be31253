//! Institute onboarding and lookup.

pub mod service;

pub use service::InstituteService;

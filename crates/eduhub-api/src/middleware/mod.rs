//! Axum middleware stack.

pub mod auth;
pub mod cors;
pub mod logging;
pub mod rate_limit;
pub mod rbac;
pub mod tenant;

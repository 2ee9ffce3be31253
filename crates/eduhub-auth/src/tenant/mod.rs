//! Tenant isolation.
//!
//! [`TenantGuard`] turns the caller's identity into a [`TenantScope`] at
//! the edge of every tenant-scoped route; the helpers in [`scope`] apply
//! that scope to store filters and check fetched records against it.

pub mod guard;
pub mod scope;

pub use guard::{GuardState, TenantGuard};
pub use scope::{TenantScope, scope_filter, validate_ownership};

//! # eduhub-auth
//!
//! Authentication and tenant isolation for EduHub.
//!
//! ## Modules
//!
//! - `jwt`: access/refresh token issuing and verification
//! - `password`: Argon2id hashing and password policy
//! - `session`: credential login and the refresh flow
//! - `tenant`: the tenant guard and tenant-scoped filter helpers
//! - `context`: the authenticated identity attached to each request

pub mod context;
pub mod jwt;
pub mod password;
pub mod session;
pub mod tenant;

pub use context::RequestContext;
pub use jwt::{Claims, JwtDecoder, JwtEncoder, TokenError, TokenPair};
pub use password::{PasswordHasher, PasswordValidator};
pub use session::{LoginOutcome, SessionManager};
pub use tenant::{GuardState, TenantGuard, TenantScope};

//! Custom Axum extractors.

pub mod auth;
pub mod json;
pub mod path;
pub mod tenant;

pub use auth::AuthUser;
pub use json::ValidatedJson;
pub use path::IdPath;
pub use tenant::Tenant;

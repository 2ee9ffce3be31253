//! JWT token encoding, decoding, and claims management.
//!
//! Access and refresh tokens are signed with separate HS256 secrets. Both
//! sides take an explicit `now` so expiry is deterministic under test.

pub mod claims;
pub mod decoder;
pub mod encoder;
pub mod error;

pub use claims::{Claims, TokenPayload, TokenType};
pub use decoder::JwtDecoder;
pub use encoder::{JwtEncoder, TokenPair};
pub use error::TokenError;

/// Clock skew tolerated when checking `exp`, in seconds.
pub const LEEWAY_SECONDS: i64 = 5;

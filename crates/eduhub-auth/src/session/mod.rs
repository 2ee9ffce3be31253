//! Credential login and the refresh-token flow.
//!
//! Sessions are stateless: the refresh token itself is the session, and
//! logout only clears the client's cookie.

pub mod manager;

pub use manager::{LoginOutcome, SessionManager};

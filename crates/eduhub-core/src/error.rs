//! Unified application error types for EduHub.
//!
//! All crates map their internal errors into [`AppError`] for consistent
//! propagation through the ? operator. Failures the client must be able to
//! tell apart (expired token, missing institute context, ...) additionally
//! carry a machine-readable code from [`codes`].

use std::fmt;
use thiserror::Error;

/// Machine-readable error codes surfaced in API error bodies.
pub mod codes {
    /// Email unknown or password mismatch.
    pub const INVALID_CREDENTIALS: &str = "INVALID_CREDENTIALS";
    /// Token signature does not verify against the server secret.
    pub const INVALID_SIGNATURE: &str = "INVALID_SIGNATURE";
    /// Token is past its expiry.
    pub const TOKEN_EXPIRED: &str = "TOKEN_EXPIRED";
    /// Token could not be decoded, or is of the wrong type.
    pub const MALFORMED_TOKEN: &str = "MALFORMED_TOKEN";
    /// No bearer token was presented.
    pub const MISSING_TOKEN: &str = "MISSING_TOKEN";
    /// A non-exempt principal is not bound to an institute.
    pub const MISSING_INSTITUTE_CONTEXT: &str = "MISSING_INSTITUTE_CONTEXT";
    /// A tenant-scoped query ran without a resolvable institute.
    pub const MISSING_TENANT_CONTEXT: &str = "MISSING_TENANT_CONTEXT";
}

/// Top-level error kind categorization used across the entire application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum ErrorKind {
    /// The requested resource was not found.
    NotFound,
    /// Authentication failed (invalid credentials, expired token, etc.).
    Unauthorized,
    /// The caller is authenticated but may not perform the action.
    Forbidden,
    /// Input validation failed.
    Validation,
    /// A conflict occurred (duplicate entry).
    Conflict,
    /// A rate limit was exceeded.
    RateLimited,
    /// An internal server error occurred.
    Internal,
    /// A database error occurred.
    Database,
    /// A configuration error occurred.
    Configuration,
    /// A serialization/deserialization error occurred.
    Serialization,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFound => write!(f, "NOT_FOUND"),
            Self::Unauthorized => write!(f, "UNAUTHORIZED"),
            Self::Forbidden => write!(f, "FORBIDDEN"),
            Self::Validation => write!(f, "VALIDATION"),
            Self::Conflict => write!(f, "CONFLICT"),
            Self::RateLimited => write!(f, "RATE_LIMITED"),
            Self::Internal => write!(f, "INTERNAL"),
            Self::Database => write!(f, "DATABASE"),
            Self::Configuration => write!(f, "CONFIGURATION"),
            Self::Serialization => write!(f, "SERIALIZATION"),
        }
    }
}

/// The unified application error used throughout EduHub.
#[derive(Debug, Error)]
#[error("{kind}: {message}")]
pub struct AppError {
    /// The category of error.
    pub kind: ErrorKind,
    /// A human-readable error message.
    pub message: String,
    /// Optional machine-readable code (see [`codes`]).
    pub code: Option<&'static str>,
    /// Optional underlying cause.
    #[source]
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl AppError {
    /// Create a new application error.
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            code: None,
            source: None,
        }
    }

    /// Create a new application error with an underlying cause.
    pub fn with_source(
        kind: ErrorKind,
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self {
            kind,
            message: message.into(),
            code: None,
            source: Some(Box::new(source)),
        }
    }

    /// Attach a machine-readable code.
    pub fn with_code(mut self, code: &'static str) -> Self {
        self.code = Some(code);
        self
    }

    /// Create a not-found error.
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::NotFound, message)
    }

    /// Create an unauthorized error.
    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Unauthorized, message)
    }

    /// Create a forbidden error.
    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Forbidden, message)
    }

    /// Create a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Validation, message)
    }

    /// Create a conflict error.
    pub fn conflict(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Conflict, message)
    }

    /// Create a rate-limit error.
    pub fn rate_limited(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::RateLimited, message)
    }

    /// Create an internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Internal, message)
    }

    /// Create a database error.
    pub fn database(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Database, message)
    }

    /// Create a configuration error.
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Configuration, message)
    }

    /// Login failed. Unknown email and wrong password share this error.
    pub fn invalid_credentials() -> Self {
        Self::unauthorized("Invalid email or password").with_code(codes::INVALID_CREDENTIALS)
    }

    /// A non-exempt principal reached a tenant-scoped route without an institute.
    pub fn missing_institute_context() -> Self {
        Self::forbidden("An institute context is required for this operation")
            .with_code(codes::MISSING_INSTITUTE_CONTEXT)
    }

    /// A tenant-scoped query was built without a tenant. Always a bug upstream.
    pub fn missing_tenant_context() -> Self {
        Self::internal("Tenant-scoped query executed without a tenant context")
            .with_code(codes::MISSING_TENANT_CONTEXT)
    }
}

impl Clone for AppError {
    fn clone(&self) -> Self {
        Self {
            kind: self.kind,
            message: self.message.clone(),
            code: self.code,
            source: None,
        }
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        Self::with_source(
            ErrorKind::Serialization,
            format!("JSON serialization error: {err}"),
            err,
        )
    }
}

impl From<config::ConfigError> for AppError {
    fn from(err: config::ConfigError) -> Self {
        Self::with_source(
            ErrorKind::Configuration,
            format!("Configuration error: {err}"),
            err,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tenant_errors_carry_codes() {
        let err = AppError::missing_institute_context();
        assert_eq!(err.kind, ErrorKind::Forbidden);
        assert_eq!(err.code, Some(codes::MISSING_INSTITUTE_CONTEXT));

        let err = AppError::missing_tenant_context();
        assert_eq!(err.kind, ErrorKind::Internal);
        assert_eq!(err.code, Some(codes::MISSING_TENANT_CONTEXT));
    }

    #[test]
    fn test_clone_keeps_code_drops_source() {
        let io = std::io::Error::other("disk");
        let err = AppError::with_source(ErrorKind::Database, "boom", io).with_code("X");
        let cloned = err.clone();
        assert_eq!(cloned.code, Some("X"));
        assert!(cloned.source.is_none());
        assert_eq!(cloned.to_string(), "DATABASE: boom");
    }
}

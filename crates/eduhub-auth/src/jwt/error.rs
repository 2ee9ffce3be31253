//! Token verification failures.

use thiserror::Error;

use eduhub_core::error::{AppError, codes};

/// Why a token was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TokenError {
    /// Signature does not match the expected secret.
    #[error("Invalid token signature")]
    InvalidSignature,
    /// `exp` is in the past (beyond the leeway).
    #[error("Token has expired")]
    Expired,
    /// Not a decodable JWT, missing claims, or the wrong token type.
    #[error("Malformed token")]
    Malformed,
}

impl TokenError {
    /// Machine-readable error code.
    pub fn code(self) -> &'static str {
        match self {
            Self::InvalidSignature => codes::INVALID_SIGNATURE,
            Self::Expired => codes::TOKEN_EXPIRED,
            Self::Malformed => codes::MALFORMED_TOKEN,
        }
    }
}

impl From<jsonwebtoken::errors::Error> for TokenError {
    fn from(err: jsonwebtoken::errors::Error) -> Self {
        use jsonwebtoken::errors::ErrorKind;
        match err.kind() {
            ErrorKind::InvalidSignature => Self::InvalidSignature,
            ErrorKind::ExpiredSignature => Self::Expired,
            _ => Self::Malformed,
        }
    }
}

impl From<TokenError> for AppError {
    fn from(err: TokenError) -> Self {
        AppError::unauthorized(err.to_string()).with_code(err.code())
    }
}

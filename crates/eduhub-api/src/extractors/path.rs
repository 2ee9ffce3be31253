//! Typed path parameter helpers.

use std::str::FromStr;

use axum::extract::{FromRequestParts, Path};
use axum::http::request::Parts;

use eduhub_core::error::AppError;

use crate::error::ApiError;

/// A single `{id}` path segment parsed into a typed identifier.
///
/// Malformed ids are a validation error rather than Axum's plain-text
/// rejection.
#[derive(Debug, Clone, Copy)]
pub struct IdPath<T>(pub T);

impl<T, S> FromRequestParts<S> for IdPath<T>
where
    T: FromStr + Send,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|e| AppError::validation(e.body_text()))?;

        raw.parse::<T>()
            .map(IdPath)
            .map_err(|_| AppError::validation(format!("Invalid id: {raw}")).into())
    }
}

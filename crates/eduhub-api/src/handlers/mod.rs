//! Route handlers organized by domain.

pub mod auth;
pub mod health;
pub mod institute;
pub mod record;
pub mod user;

use axum::http::Uri;

use eduhub_core::error::AppError;

use crate::error::ApiError;

/// Fallback for unmatched routes.
pub async fn not_found(uri: Uri) -> ApiError {
    AppError::not_found(format!("No route for {}", uri.path())).into()
}

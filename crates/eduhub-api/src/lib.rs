//! # eduhub-api
//!
//! HTTP API layer for EduHub built on Axum.
//!
//! Provides the REST endpoints, middleware (authentication, tenant guard,
//! role checks, rate limiting, CORS, logging), extractors, DTOs, and the
//! mapping from [`AppError`](eduhub_core::AppError) to JSON error bodies.

pub mod app;
pub mod dto;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod state;

pub use app::{build_app, run_server};
pub use state::AppState;

//! Route definitions for the EduHub HTTP API.
//!
//! Routes are grouped by the middleware they need and mounted under `/api`:
//!
//! - public: health, logout
//! - credentials: register, login, refresh (rate limited)
//! - authenticated: profile, institute onboarding
//! - tenant: everything that reads or writes institute-scoped data

use axum::{
    Router,
    middleware::from_fn_with_state,
    routing::{get, post, put},
};

use eduhub_entity::record::{Course, Student, Teacher};

use crate::handlers::{self, record};
use crate::middleware::{auth::require_auth, rate_limit::rate_limit, tenant::require_tenant};
use crate::state::AppState;

/// Build the API router with per-group middleware.
///
/// Receives the fully-constructed `AppState` and threads it through
/// every route via `.with_state(state)`.
pub fn build_router(state: AppState) -> Router {
    let api_routes = Router::new()
        .merge(public_routes())
        .merge(credential_routes(&state))
        .merge(authenticated_routes(&state))
        .merge(tenant_routes(&state));

    Router::new()
        .nest("/api", api_routes)
        .fallback(handlers::not_found)
        .with_state(state)
}

fn public_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(handlers::health::health))
        .route("/auth/logout", post(handlers::auth::logout))
}

fn credential_routes(state: &AppState) -> Router<AppState> {
    Router::new()
        .route("/auth/register", post(handlers::auth::register))
        .route("/auth/login", post(handlers::auth::login))
        .route("/auth/refresh", post(handlers::auth::refresh))
        .route_layer(from_fn_with_state(state.clone(), rate_limit))
}

/// Routes that need an identity but no institute: an institute admin
/// creates their institute from here.
fn authenticated_routes(state: &AppState) -> Router<AppState> {
    Router::new()
        .route("/auth/profile", get(handlers::auth::profile))
        .route(
            "/institutes",
            post(handlers::institute::create_institute).get(handlers::institute::list_institutes),
        )
        .route_layer(from_fn_with_state(state.clone(), require_auth))
}

/// Layers run bottom-up: authentication first, then the tenant guard.
fn tenant_routes(state: &AppState) -> Router<AppState> {
    Router::new()
        .route(
            "/institutes/current",
            get(handlers::institute::current_institute),
        )
        .route(
            "/users/{id}/institute",
            put(handlers::user::assign_institute),
        )
        .route(
            "/courses",
            get(record::list::<Course>).post(record::create::<Course>),
        )
        .route(
            "/courses/{id}",
            get(record::get::<Course>).delete(record::delete::<Course>),
        )
        .route(
            "/students",
            get(record::list::<Student>).post(record::create::<Student>),
        )
        .route(
            "/students/{id}",
            get(record::get::<Student>).delete(record::delete::<Student>),
        )
        .route(
            "/teachers",
            get(record::list::<Teacher>).post(record::create::<Teacher>),
        )
        .route(
            "/teachers/{id}",
            get(record::get::<Teacher>).delete(record::delete::<Teacher>),
        )
        .route_layer(from_fn_with_state(state.clone(), require_tenant))
        .route_layer(from_fn_with_state(state.clone(), require_auth))
}

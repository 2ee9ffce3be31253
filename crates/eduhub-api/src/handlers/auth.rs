//! Auth handlers: register, login, refresh, logout, profile.

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};

use eduhub_auth::LoginOutcome;
use eduhub_core::error::{AppError, codes};

use crate::dto::request::{LoginRequest, RegisterRequest};
use crate::dto::response::{ApiResponse, AuthResponse, MessageResponse, UserResponse};
use crate::error::ApiResult;
use crate::extractors::{AuthUser, ValidatedJson};
use crate::state::AppState;

/// Path the refresh cookie is scoped to.
pub const REFRESH_COOKIE_PATH: &str = "/api/auth";

fn refresh_cookie(state: &AppState, token: String, max_age: time::Duration) -> Cookie<'static> {
    Cookie::build((state.config.auth.refresh_cookie_name.clone(), token))
        .http_only(true)
        .secure(state.config.is_production())
        .same_site(SameSite::Strict)
        .path(REFRESH_COOKIE_PATH)
        .max_age(max_age)
        .build()
}

fn respond(
    state: &AppState,
    jar: CookieJar,
    outcome: LoginOutcome,
) -> (CookieJar, Json<ApiResponse<AuthResponse>>) {
    let LoginOutcome { user, tokens } = outcome;
    let max_age = time::Duration::seconds(state.config.auth.refresh_ttl_seconds());
    let jar = jar.add(refresh_cookie(state, tokens.refresh_token, max_age));

    let body = AuthResponse {
        access_token: tokens.access_token,
        token_type: "Bearer".to_string(),
        access_expires_at: tokens.access_expires_at,
        user: UserResponse::from(user),
    };
    (jar, Json(ApiResponse::ok(body)))
}

/// POST /api/auth/register
pub async fn register(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<RegisterRequest>,
) -> ApiResult<(StatusCode, Json<ApiResponse<UserResponse>>)> {
    let user = state.account_service.register(req.into()).await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::ok(user.into()))))
}

/// POST /api/auth/login
pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    ValidatedJson(req): ValidatedJson<LoginRequest>,
) -> ApiResult<(CookieJar, Json<ApiResponse<AuthResponse>>)> {
    let outcome = state
        .session_manager
        .login(&req.email, &req.password)
        .await?;

    Ok(respond(&state, jar, outcome))
}

/// POST /api/auth/refresh
///
/// Reads the refresh cookie and rotates it alongside the new access token.
pub async fn refresh(
    State(state): State<AppState>,
    jar: CookieJar,
) -> ApiResult<(CookieJar, Json<ApiResponse<AuthResponse>>)> {
    let token = jar
        .get(&state.config.auth.refresh_cookie_name)
        .map(|c| c.value().to_string())
        .filter(|v| !v.is_empty())
        .ok_or_else(|| {
            AppError::unauthorized("Missing refresh token").with_code(codes::MISSING_TOKEN)
        })?;

    let outcome = state.session_manager.refresh(&token).await?;
    Ok(respond(&state, jar, outcome))
}

/// POST /api/auth/logout
///
/// Tokens are stateless; logging out only expires the refresh cookie, whether
/// or not the request carried one.
pub async fn logout(
    State(state): State<AppState>,
    jar: CookieJar,
) -> (CookieJar, Json<ApiResponse<MessageResponse>>) {
    let expired = refresh_cookie(&state, String::new(), time::Duration::ZERO);
    (
        jar.add(expired),
        Json(ApiResponse::ok(MessageResponse::new("Logged out"))),
    )
}

/// GET /api/auth/profile
pub async fn profile(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<Json<ApiResponse<UserResponse>>> {
    let user = state.account_service.profile(&auth).await?;
    Ok(Json(ApiResponse::ok(user.into())))
}

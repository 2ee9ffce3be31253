//! JWT authentication middleware.

use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::Response;

use crate::error::ApiError;
use crate::extractors::auth::bearer_token;
use crate::state::AppState;

/// Verifies the bearer access token and attaches the caller's
/// [`RequestContext`](eduhub_auth::RequestContext) to the request.
///
/// Missing tokens fail with `MISSING_TOKEN`; invalid ones with the token
/// error's own code.
pub async fn require_auth(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let ctx = {
        let token = bearer_token(request.headers())?;
        state.session_manager.authenticate(token)?
    };

    tracing::debug!(user_id = %ctx.user_id, role = %ctx.role, "Authenticated request");
    request.extensions_mut().insert(ctx);

    Ok(next.run(request).await)
}

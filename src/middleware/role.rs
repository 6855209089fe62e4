//! Router-level role gate.
//!
//! ```rust,ignore
//! Router::new()
//!     .route("/", get(list_users))
//!     .route_layer(middleware::from_fn_with_state(state.clone(), require_admin));
//! ```

use axum::{
    extract::{FromRequestParts, Request, State},
    middleware::Next,
    response::{IntoResponse, Response},
};

use shopfront_auth::{ROLE_ADMIN, require_role};
use shopfront_core::AppError;

use crate::middleware::auth::AuthUser;
use crate::state::AppState;

/// Passes the request through iff the caller's role equals `required`.
/// 401 when the caller is not authenticated, 403 on a role mismatch.
pub async fn require_roles(
    State(state): State<AppState>,
    req: Request,
    next: Next,
    required: &'static str,
) -> Result<Response, AppError> {
    let (mut parts, body) = req.into_parts();

    let auth_user = AuthUser::from_request_parts(&mut parts, &state).await?;
    require_role(&auth_user.0, required)?;

    parts.extensions.insert(auth_user.0);
    Ok(next.run(Request::from_parts(parts, body)).await)
}

pub async fn require_admin(State(state): State<AppState>, req: Request, next: Next) -> Response {
    match require_roles(State(state), req, next, ROLE_ADMIN).await {
        Ok(response) => response,
        Err(err) => err.into_response(),
    }
}

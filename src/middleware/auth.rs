//! Bearer token authentication.
//!
//! [`require_auth`] guards whole routers: it verifies the token once and
//! stores the [`Claims`] in the request extensions. [`AuthUser`] hands those
//! claims to handlers, verifying the header itself when no middleware ran.

use axum::{
    extract::{FromRequestParts, Request, State},
    http::{HeaderMap, header, request::Parts},
    middleware::Next,
    response::Response,
};

use shopfront_auth::{Claims, ROLE_ADMIN, is_admin, require_role, verify_token};
use shopfront_core::AppError;
use shopfront_models::UserId;

use crate::state::AppState;

/// Pulls the token out of `Authorization: Bearer <token>`.
pub fn bearer_token(headers: &HeaderMap) -> Result<&str, AppError> {
    let value = headers
        .get(header::AUTHORIZATION)
        .ok_or_else(|| AppError::unauthorized("Authorization header missing"))?
        .to_str()
        .map_err(|_| AppError::unauthorized("Invalid authorization header format"))?;

    let token = value
        .strip_prefix("Bearer ")
        .ok_or_else(|| AppError::unauthorized("Invalid authorization header format"))?
        .trim();

    if token.is_empty() {
        return Err(AppError::unauthorized("Bearer token missing"));
    }

    Ok(token)
}

fn authenticate(parts: &Parts, state: &AppState) -> Result<Claims, AppError> {
    if let Some(claims) = parts.extensions.get::<Claims>() {
        return Ok(claims.clone());
    }

    let token = bearer_token(&parts.headers)?;
    verify_token(token, &state.jwt_config)
}

/// Rejects the request with 401 unless it carries a valid token.
pub async fn require_auth(
    State(state): State<AppState>,
    req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let (mut parts, body) = req.into_parts();
    let claims = authenticate(&parts, &state)?;

    parts.extensions.insert(claims);

    Ok(next.run(Request::from_parts(parts, body)).await)
}

/// The authenticated caller.
#[derive(Debug, Clone)]
pub struct AuthUser(pub Claims);

impl AuthUser {
    pub fn user_id(&self) -> Result<UserId, AppError> {
        self.0.user_id().map(UserId::from)
    }

    pub fn is_admin(&self) -> bool {
        is_admin(&self.0)
    }
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        authenticate(parts, state).map(AuthUser)
    }
}

/// An authenticated caller whose role is exactly `admin`. Used on
/// individual write handlers of routers that are otherwise open to any
/// authenticated user.
#[derive(Debug, Clone)]
pub struct AdminUser(pub AuthUser);

impl FromRequestParts<AppState> for AdminUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let auth_user = AuthUser::from_request_parts(parts, state).await?;
        require_role(&auth_user.0, ROLE_ADMIN)?;
        Ok(AdminUser(auth_user))
    }
}

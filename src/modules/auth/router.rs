use axum::{
    Router,
    routing::{get, post},
};

use super::controller::{login_user, me, register_user};
use crate::middleware::rate_limit::auth_rate_limiter;
use crate::state::AppState;

pub fn init_auth_router(state: &AppState) -> Router<AppState> {
    let credentials = Router::new()
        .route("/register", post(register_user))
        .route("/signup", post(register_user))
        .route("/login", post(login_user));

    let credentials = match auth_rate_limiter(&state.rate_limit_config) {
        Some(limiter) => credentials.layer(limiter),
        None => credentials,
    };

    credentials.route("/me", get(me))
}

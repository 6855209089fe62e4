use axum::{Router, routing::get};

use super::controller::admin_dashboard;
use crate::state::AppState;

pub fn init_admin_router() -> Router<AppState> {
    Router::new().route("/", get(admin_dashboard))
}
